//! # Geometry Primitives
//!
//! Point and bounding box types shared by every stage of the pipeline.

use glam::DVec3;

/// A raw or normalized coordinate. Copied freely, compared by value.
pub type Point3 = DVec3;

/// Axis-aligned 2D extent of a feature collection.
///
/// # Example
///
/// ```rust
/// use footprint_mesh::BoundingBox;
///
/// let bbox = BoundingBox::new(10.0, 20.0, 60.0, 45.0);
/// assert_eq!(bbox.width(), 50.0);
/// assert_eq!(bbox.height(), 25.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Creates a bounding box from its corners.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// An inverted box that any point expands.
    pub fn empty() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    /// Computes the extent of a set of points, or `None` when no point is finite.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3>) -> Option<Self> {
        let mut bbox = Self::empty();
        for point in points {
            bbox.expand(point);
        }
        (!bbox.is_empty()).then_some(bbox)
    }

    /// Grows the box to contain `point`. Non-finite coordinates are ignored.
    pub fn expand(&mut self, point: &Point3) {
        if !(point.x.is_finite() && point.y.is_finite()) {
            return;
        }
        self.min_x = self.min_x.min(point.x);
        self.min_y = self.min_y.min(point.y);
        self.max_x = self.max_x.max(point.x);
        self.max_y = self.max_y.max(point.y);
    }

    /// Grows the box to contain another box.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// True while no point has been added.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// True if the two boxes overlap or touch.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        !(other.max_x < self.min_x
            || other.min_x > self.max_x
            || other.max_y < self.min_y
            || other.min_y > self.max_y)
    }

    /// Corners at z = 0 in the order upper-left, bottom-left, upper-right,
    /// bottom-right.
    pub fn corners(&self) -> [Point3; 4] {
        [
            DVec3::new(self.min_x, self.max_y, 0.0),
            DVec3::new(self.min_x, self.min_y, 0.0),
            DVec3::new(self.max_x, self.max_y, 0.0),
            DVec3::new(self.max_x, self.min_y, 0.0),
        ]
    }
}
