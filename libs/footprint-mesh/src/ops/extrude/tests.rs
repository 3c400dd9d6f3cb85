//! # Extrusion Tests
//!
//! Face/vertex bookkeeping of `extrude_ring` and the height fallback.

use super::*;
use crate::geometry::BoundingBox;
use crate::transform::NormalizationTransform;
use approx::assert_relative_eq;
use glam::DVec3;

fn identity() -> NormalizationTransform {
    NormalizationTransform::from_bounds(&BoundingBox::new(0.0, 0.0, 100.0, 100.0), 100.0).unwrap()
}

fn closed_ring(n: usize) -> Vec<DVec3> {
    // n - 1 distinct points on a circle plus the closing repeat
    let distinct = n.saturating_sub(1).max(1);
    let mut ring: Vec<DVec3> = (0..distinct)
        .map(|i| {
            let angle = std::f64::consts::TAU * i as f64 / distinct as f64;
            DVec3::new(50.0 + 10.0 * angle.cos(), 50.0 + 10.0 * angle.sin(), 0.0)
        })
        .collect();
    if n > 1 {
        ring.push(ring[0]);
    }
    ring
}

#[test]
fn test_counts_for_rings_of_four_or_more() {
    for n in 4..12 {
        let solid = extrude_ring(&closed_ring(n), 5.0, &identity());
        assert_eq!(solid.vertex_count(), 2 * n, "n = {n}");
        assert_eq!(solid.wall_count(), n, "n = {n}");
        assert_eq!(solid.face_count(), n + 1, "n = {n}");
        assert!(solid.roof().is_some());
        assert!(solid.validate());
    }
}

#[test]
fn test_no_closing_wall_below_four() {
    for n in 2..4 {
        let solid = extrude_ring(&closed_ring(n), 5.0, &identity());
        assert_eq!(solid.vertex_count(), 2 * n);
        assert_eq!(solid.wall_count(), n - 1);
        assert_eq!(solid.face_count(), n);
    }
}

#[test]
fn test_degenerate_rings_emit_vertices_only() {
    let solid = extrude_ring(&[DVec3::new(1.0, 1.0, 0.0)], 5.0, &identity());
    assert_eq!(solid.vertex_count(), 2);
    assert_eq!(solid.face_count(), 0);
    assert!(solid.roof().is_none());

    let empty = extrude_ring(&[], 5.0, &identity());
    assert_eq!(empty.vertex_count(), 0);
    assert_eq!(empty.face_count(), 0);
}

#[test]
fn test_vertices_interleave_base_and_top() {
    let ring = closed_ring(5);
    let solid = extrude_ring(&ring, 7.0, &identity());
    for (i, point) in ring.iter().enumerate() {
        let b = solid.vertices()[2 * i];
        let t = solid.vertices()[2 * i + 1];
        assert_eq!(b, *point);
        assert_eq!(t, DVec3::new(point.x, point.y, 7.0));
    }
}

#[test]
fn test_wall_winding() {
    let solid = extrude_ring(&closed_ring(5), 5.0, &identity());
    let faces = solid.faces();
    // First wall joins point 1 to point 0
    assert_eq!(faces[0].indices(), &[2, 3, 1, 0]);
    // Closing wall joins the first point back to the last
    assert_eq!(faces[4].indices(), &[0, 1, 9, 8]);
}

#[test]
fn test_roof_lists_tops_in_ring_order() {
    let solid = extrude_ring(&closed_ring(5), 5.0, &identity());
    let roof = solid.roof().unwrap();
    assert_eq!(roof.indices(), &[1, 3, 5, 7, 9]);
    assert_eq!(roof.relative_indices(solid.vertex_count()), vec![-9, -7, -5, -3, -1]);
}

#[test]
fn test_height_is_scaled_with_footprint() {
    let transform =
        NormalizationTransform::from_bounds(&BoundingBox::new(0.0, 0.0, 50.0, 50.0), 100.0).unwrap();
    let ring = [
        DVec3::new(25.0, 10.0, 0.0),
        DVec3::new(30.0, 10.0, 0.0),
        DVec3::new(30.0, 20.0, 0.0),
        DVec3::new(25.0, 10.0, 0.0),
    ];
    let solid = extrude_ring(&ring, 3.0, &transform);
    let top = solid.vertices()[1];
    assert_relative_eq!(top.x, 50.0);
    assert_relative_eq!(top.y, 20.0);
    assert_relative_eq!(top.z, 6.0);
    assert_relative_eq!(solid.vertices()[0].z, 0.0);
}

#[test]
fn test_effective_height_fallback() {
    assert_eq!(effective_height(Some(0.5), 5.0), 5.0);
    assert_eq!(effective_height(None, 5.0), 5.0);
    assert_eq!(effective_height(Some(f64::NAN), 5.0), 5.0);
    assert_eq!(effective_height(Some(-3.0), 5.0), 5.0);
    assert_eq!(effective_height(Some(1.0), 5.0), 1.0);
    assert_eq!(effective_height(Some(23.4), 5.0), 23.4);
}
