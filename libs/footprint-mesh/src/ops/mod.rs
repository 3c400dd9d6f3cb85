//! # Mesh Operations
//!
//! Footprint extrusion and the ground plane.

pub mod extrude;
pub mod ground;

pub use extrude::{effective_height, extrude_ring};
pub use ground::build_ground_plane;
