//! # Prism Extrusion
//!
//! Extrudes a footprint ring straight up to a flat roof.
//!
//! For a ring of `n` points the solid has:
//! - `2n` vertices (base and lifted copy per point)
//! - `n - 1` wall quads between consecutive points
//! - one closing wall quad from the last point back to the first when `n >= 4`
//! - one roof face over every lifted vertex in ring order (when `n >= 2`)
//!
//! Rings shorter than two points only emit vertices, an empty group is
//! preferable to failing the whole conversion over one bad footprint.

use crate::geometry::Point3;
use crate::mesh::{ExtrudedSolid, Face};
use crate::transform::NormalizationTransform;

/// Minimum ring length that receives the closing wall quad.
const CLOSING_WALL_MIN_POINTS: usize = 4;

#[inline]
fn base(i: usize) -> usize {
    2 * i
}

#[inline]
fn top(i: usize) -> usize {
    2 * i + 1
}

/// Extrudes `ring` to `height` raw units and normalizes every vertex.
///
/// The lifted copy of a point keeps x and y and takes `z = height` before
/// normalization, so heights are scaled exactly like the footprint.
///
/// Wall quads wind as (current base, current top, previous top, previous
/// base) for every segment including the closing one.
///
/// # Example
///
/// ```rust
/// use footprint_mesh::ops::extrude::extrude_ring;
/// use footprint_mesh::{BoundingBox, NormalizationTransform};
/// use glam::DVec3;
///
/// let transform = NormalizationTransform::from_bounds(&BoundingBox::new(0.0, 0.0, 10.0, 10.0), 100.0).unwrap();
/// let ring = [
///     DVec3::new(0.0, 0.0, 0.0),
///     DVec3::new(10.0, 0.0, 0.0),
///     DVec3::new(10.0, 10.0, 0.0),
///     DVec3::new(0.0, 10.0, 0.0),
///     DVec3::new(0.0, 0.0, 0.0),
/// ];
/// let solid = extrude_ring(&ring, 3.0, &transform);
/// assert_eq!(solid.vertex_count(), 10);
/// assert_eq!(solid.wall_count(), 5);
/// assert_eq!(solid.vertices()[1].z, 30.0);
/// ```
pub fn extrude_ring(ring: &[Point3], height: f64, transform: &NormalizationTransform) -> ExtrudedSolid {
    let n = ring.len();
    let mut solid = ExtrudedSolid::with_capacity(2 * n, n + 1);

    for (i, point) in ring.iter().enumerate() {
        solid.add_vertex(transform.apply(*point));
        solid.add_vertex(transform.apply(Point3::new(point.x, point.y, height)));

        if i > 0 {
            solid.add_wall(Face::quad(base(i), top(i), top(i - 1), base(i - 1)));
        }
    }

    if n >= CLOSING_WALL_MIN_POINTS {
        solid.add_wall(Face::quad(base(0), top(0), top(n - 1), base(n - 1)));
    }

    if n >= 2 {
        solid.set_roof(Face::new((0..n).map(top).collect()));
    }

    solid
}
