//! # Footprint Mesh
//!
//! Turns 2D polygon footprints (building outlines, wooded areas) into
//! flat-roofed prisms on a ground plane, written as one grouped OBJ mesh.
//!
//! ## Architecture
//!
//! ```text
//! FeatureSource → ring → transform → ops::extrude / ops::ground → MeshSink
//! ```
//!
//! - **ring**: first closed ring of a feature's flattened coordinates
//! - **transform**: one origin/scale snapshot for the whole run
//! - **ops**: prism extrusion and the ground quad
//! - **obj**: streaming writer with relative face indices
//! - **pipeline**: the single pass tying them together
//!
//! ## Usage
//!
//! ```rust
//! use footprint_mesh::{BoundingBox, Face, NormalizationTransform};
//! use glam::DVec3;
//!
//! let bbox = BoundingBox::new(1000.0, 2000.0, 1050.0, 2040.0);
//! let transform = NormalizationTransform::from_bounds(&bbox, 100.0).unwrap();
//! assert_eq!(transform.apply(DVec3::new(1050.0, 2000.0, 0.0)), DVec3::new(100.0, 0.0, 0.0));
//!
//! // Faces keep local indices; the writer makes them relative.
//! assert_eq!(Face::quad(2, 3, 1, 0).relative_indices(4), vec![-2, -1, -3, -4]);
//! ```

pub mod error;
pub mod geometry;
pub mod material;
pub mod mesh;
pub mod obj;
pub mod ops;
pub mod pipeline;
pub mod ring;
pub mod source;
pub mod transform;

pub use error::MeshError;
pub use geometry::{BoundingBox, Point3};
pub use material::{MaterialPalette, MaterialSelector};
pub use mesh::{ExtrudedSolid, Face, MeshDocument, MeshGroup};
pub use obj::{MeshSink, ObjWriter};
pub use pipeline::{convert, emit, prepare, ConversionReport, FeatureKind, Reference, SkippedFeature};
pub use ring::extract_first_ring;
pub use source::{Feature, FeatureSource, GeoJsonFeatureSource, InMemoryFeatureSource, SpatialFilter};
pub use transform::{CoordinateNormalizer, NormalizationTransform};
