//! # Coordinate Normalization
//!
//! Maps raw dataset coordinates into a bounded local space: translate by the
//! reference bounding box's minimum corner, then scale uniformly so the
//! reference width spans [`TARGET_SPAN`] units. Z is scaled but never
//! translated, heights are already relative to the ground.
//!
//! The transform is an explicit value handed to every extrusion and ground
//! plane call. [`CoordinateNormalizer`] wraps it for callers that need the
//! "initialize exactly once, then read-only" lifecycle.

use crate::error::MeshError;
use crate::geometry::{BoundingBox, Point3};
use config::constants::TARGET_SPAN;
use glam::DVec3;

/// Origin offset plus uniform scale, computed once from a reference extent.
///
/// # Example
///
/// ```rust
/// use footprint_mesh::{BoundingBox, NormalizationTransform};
/// use glam::DVec3;
///
/// let bbox = BoundingBox::new(0.0, 0.0, 50.0, 20.0);
/// let transform = NormalizationTransform::from_bounds(&bbox, 100.0).unwrap();
/// assert_eq!(transform.scale(), 2.0);
/// assert_eq!(transform.apply(DVec3::new(25.0, 10.0, 3.0)), DVec3::new(50.0, 20.0, 6.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizationTransform {
    origin_x: f64,
    origin_y: f64,
    scale: f64,
}

impl NormalizationTransform {
    /// Computes the transform mapping `bounds` onto `target_span` units.
    ///
    /// # Errors
    ///
    /// [`MeshError::DegenerateBounds`] when the width is zero, negative or not
    /// finite, since no finite scale exists.
    pub fn from_bounds(bounds: &BoundingBox, target_span: f64) -> Result<Self, MeshError> {
        let width = bounds.width();
        if !(width.is_finite() && width > 0.0) {
            return Err(MeshError::DegenerateBounds { width });
        }
        Ok(Self {
            origin_x: bounds.min_x,
            origin_y: bounds.min_y,
            scale: target_span / width,
        })
    }

    /// Same as [`from_bounds`](Self::from_bounds) with the default span.
    pub fn with_default_span(bounds: &BoundingBox) -> Result<Self, MeshError> {
        Self::from_bounds(bounds, TARGET_SPAN)
    }

    #[inline]
    pub fn origin(&self) -> (f64, f64) {
        (self.origin_x, self.origin_y)
    }

    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Normalizes a single point.
    #[inline]
    pub fn apply(&self, point: Point3) -> Point3 {
        DVec3::new(
            (point.x - self.origin_x) * self.scale,
            (point.y - self.origin_y) * self.scale,
            point.z * self.scale,
        )
    }
}

/// Set-once holder for the run's [`NormalizationTransform`].
#[derive(Debug, Default)]
pub struct CoordinateNormalizer {
    transform: Option<NormalizationTransform>,
    target_span: Option<f64>,
}

impl CoordinateNormalizer {
    /// Creates an uninitialized normalizer using [`TARGET_SPAN`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an uninitialized normalizer with a custom span.
    pub fn with_target_span(target_span: f64) -> Self {
        Self {
            transform: None,
            target_span: Some(target_span),
        }
    }

    /// Snapshots the transform from the reference bounds.
    ///
    /// # Errors
    ///
    /// [`MeshError::TransformAlreadyInitialized`] on a second call, so
    /// features already emitted are never silently re-normalized.
    pub fn initialize(&mut self, bounds: &BoundingBox) -> Result<&NormalizationTransform, MeshError> {
        if self.transform.is_some() {
            return Err(MeshError::TransformAlreadyInitialized);
        }
        let span = self.target_span.unwrap_or(TARGET_SPAN);
        let transform = NormalizationTransform::from_bounds(bounds, span)?;
        log::debug!(
            "normalization origin ({}, {}) scale {}",
            transform.origin_x,
            transform.origin_y,
            transform.scale
        );
        Ok(self.transform.insert(transform))
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.transform.is_some()
    }

    /// Returns the snapshot.
    ///
    /// # Errors
    ///
    /// [`MeshError::UninitializedTransform`] before [`initialize`](Self::initialize).
    pub fn transform(&self) -> Result<&NormalizationTransform, MeshError> {
        self.transform.as_ref().ok_or(MeshError::UninitializedTransform)
    }

    /// Normalizes a point through the snapshot.
    pub fn normalize(&self, point: Point3) -> Result<Point3, MeshError> {
        Ok(self.transform()?.apply(point))
    }
}
