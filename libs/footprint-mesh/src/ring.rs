//! # Ring Extraction
//!
//! Geometry stores flatten multi-polygons by concatenating every ring
//! (exterior, holes, further polygons) back to back. Only the first ring is
//! extruded: it runs from index 0 up to and including the first coordinate
//! that repeats the start point exactly.

use crate::error::MeshError;
use crate::geometry::Point3;

/// Returns the first closed ring of a flattened coordinate sequence.
///
/// Equality is exact on x, y and z. Rings of one or two points are returned
/// as-is; the extruder decides what to do with them.
///
/// # Errors
///
/// [`MeshError::MalformedGeometry`] when the start point never repeats.
///
/// # Example
///
/// ```rust
/// use footprint_mesh::ring::extract_first_ring;
/// use glam::DVec3;
///
/// let p0 = DVec3::new(0.0, 0.0, 0.0);
/// let p1 = DVec3::new(1.0, 0.0, 0.0);
/// let p2 = DVec3::new(0.0, 1.0, 0.0);
/// let q0 = DVec3::new(5.0, 5.0, 0.0);
/// let coords = [p0, p1, p2, p0, q0, q0];
/// let ring = extract_first_ring("a", &coords).unwrap();
/// assert_eq!(ring, &[p0, p1, p2, p0]);
/// ```
pub fn extract_first_ring<'a>(
    feature_id: &str,
    coordinates: &'a [Point3],
) -> Result<&'a [Point3], MeshError> {
    let Some(start) = coordinates.first() else {
        return Err(MeshError::malformed(feature_id, 0));
    };

    let closing = coordinates
        .iter()
        .skip(1)
        .position(|c| c.x == start.x && c.y == start.y && c.z == start.z)
        .ok_or_else(|| MeshError::malformed(feature_id, coordinates.len()))?;

    // `position` counts from index 1
    Ok(&coordinates[..closing + 2])
}
