//! # Mesh Errors
//!
//! Error types for footprint conversion.

use thiserror::Error;

/// Errors that can occur while reading footprints and assembling the mesh.
#[derive(Debug, Error)]
pub enum MeshError {
    /// The dataset location does not exist.
    #[error("Source not found: {path}")]
    SourceNotFound { path: String },

    /// The dataset exists but could not be read or decoded.
    #[error("Source {name} is unreadable: {message}")]
    Source { name: String, message: String },

    /// A feature's first ring never returns to its start point.
    #[error("Malformed geometry in feature {feature_id}: ring of {len} coordinates is not closed")]
    MalformedGeometry { feature_id: String, len: usize },

    /// A feature carries a geometry type that cannot be extruded.
    #[error("Unsupported geometry in feature {feature_id}: {geometry_type}")]
    UnsupportedGeometry {
        feature_id: String,
        geometry_type: String,
    },

    /// Normalization was requested before the reference bounds were known.
    #[error("Coordinate transform used before initialization")]
    UninitializedTransform,

    /// The coordinate transform was initialized a second time.
    #[error("Coordinate transform is already initialized")]
    TransformAlreadyInitialized,

    /// The reference bounding box cannot produce a finite scale.
    #[error("Degenerate reference bounds: width {width}")]
    DegenerateBounds { width: f64 },

    /// Writing the mesh failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MeshError {
    /// Creates an unreadable-source error.
    pub fn unreadable(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Source {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates a malformed geometry error.
    pub fn malformed(feature_id: impl Into<String>, len: usize) -> Self {
        Self::MalformedGeometry {
            feature_id: feature_id.into(),
            len,
        }
    }

    /// Returns true for errors confined to a single feature.
    ///
    /// The pipeline skips such features instead of aborting the run.
    pub fn is_feature_local(&self) -> bool {
        matches!(
            self,
            Self::MalformedGeometry { .. } | Self::UnsupportedGeometry { .. }
        )
    }
}
