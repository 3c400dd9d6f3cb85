//! # Ground Plane
//!
//! A single quad spanning a bounding box at z = 0, normalized with the same
//! transform as the extruded footprints.

use crate::geometry::BoundingBox;
use crate::mesh::{ExtrudedSolid, Face, MeshGroup};
use crate::transform::NormalizationTransform;
use config::constants::{GROUND_GROUP_NAME, TERRAIN_MATERIAL};

/// Builds the `ground` group for `bounds`.
///
/// Always four vertices (upper-left, bottom-left, upper-right, bottom-right)
/// and one quad, whatever the aspect ratio. A zero-width or zero-height box
/// yields a collapsed quad; the division by the width happens only when the
/// transform is created.
///
/// # Example
///
/// ```rust
/// use footprint_mesh::ops::ground::build_ground_plane;
/// use footprint_mesh::{BoundingBox, NormalizationTransform};
///
/// let bbox = BoundingBox::new(0.0, 0.0, 200.0, 50.0);
/// let transform = NormalizationTransform::from_bounds(&bbox, 100.0).unwrap();
/// let ground = build_ground_plane(&bbox, &transform);
/// assert_eq!(ground.name, "ground");
/// assert_eq!(ground.solid.vertex_count(), 4);
/// assert_eq!(ground.solid.face_count(), 1);
/// ```
pub fn build_ground_plane(bounds: &BoundingBox, transform: &NormalizationTransform) -> MeshGroup {
    let mut solid = ExtrudedSolid::with_capacity(4, 1);
    for corner in bounds.corners() {
        solid.add_vertex(transform.apply(corner));
    }
    // bottom-right, upper-right, upper-left, bottom-left
    solid.add_face(Face::quad(3, 2, 0, 1));
    MeshGroup::new(GROUND_GROUP_NAME, TERRAIN_MATERIAL, solid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    fn transform() -> NormalizationTransform {
        NormalizationTransform::from_bounds(&BoundingBox::new(10.0, 10.0, 60.0, 40.0), 100.0).unwrap()
    }

    #[test]
    fn test_ground_corners_are_normalized() {
        let bbox = BoundingBox::new(10.0, 10.0, 60.0, 40.0);
        let ground = build_ground_plane(&bbox, &transform());
        let v = ground.solid.vertices();
        assert_eq!(v[0], DVec3::new(0.0, 60.0, 0.0));
        assert_eq!(v[1], DVec3::new(0.0, 0.0, 0.0));
        assert_eq!(v[2], DVec3::new(100.0, 60.0, 0.0));
        assert_eq!(v[3], DVec3::new(100.0, 0.0, 0.0));
        assert_eq!(ground.material, "Terrain");
    }

    #[test]
    fn test_ground_face_matches_obj_form() {
        let ground = build_ground_plane(&BoundingBox::new(10.0, 10.0, 60.0, 40.0), &transform());
        let face = &ground.solid.faces()[0];
        assert_eq!(face.relative_indices(4), vec![-1, -2, -4, -3]);
    }

    #[test]
    fn test_degenerate_boxes_still_yield_one_quad() {
        for bbox in [
            BoundingBox::new(10.0, 20.0, 60.0, 20.0),
            BoundingBox::new(30.0, 10.0, 30.0, 40.0),
            BoundingBox::new(30.0, 30.0, 30.0, 30.0),
        ] {
            let ground = build_ground_plane(&bbox, &transform());
            assert_eq!(ground.solid.vertex_count(), 4);
            assert_eq!(ground.solid.face_count(), 1);
            assert!(ground.solid.vertices().iter().all(|v| v.is_finite()));
        }
    }
}
