//! Feature sources feeding the converter.
//!
//! A source yields features one at a time through a [`FeatureCursor`] that
//! lives for exactly one traversal of the collection and is released on
//! drop, including when the traversal is abandoned on an error.

mod geojson;

pub use geojson::GeoJsonFeatureSource;

use crate::error::MeshError;
use crate::geometry::{BoundingBox, Point3};
use std::collections::HashMap;

/// One footprint record: identifier, flattened geometry and numeric
/// attributes.
///
/// # Examples
/// ```
/// use footprint_mesh::source::Feature;
/// use glam::DVec3;
///
/// let feature = Feature::new("osgb.1", vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::ZERO])
///     .with_attribute("_mean", 8.5);
/// assert_eq!(feature.attribute("_mean"), Some(8.5));
/// assert_eq!(feature.attribute("missing"), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub id: String,
    /// All rings of the geometry concatenated back to back.
    pub coordinates: Vec<Point3>,
    pub attributes: HashMap<String, f64>,
}

impl Feature {
    pub fn new(id: impl Into<String>, coordinates: Vec<Point3>) -> Self {
        Self {
            id: id.into(),
            coordinates,
            attributes: HashMap::new(),
        }
    }

    /// Adds or replaces a numeric attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: f64) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<f64> {
        self.attributes.get(name).copied()
    }

    /// Extent of every coordinate of the feature.
    pub fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(&self.coordinates)
    }
}

/// Which features a traversal yields.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SpatialFilter {
    /// Every feature.
    #[default]
    Include,
    /// Features whose extent touches the box.
    BBox(BoundingBox),
}

impl SpatialFilter {
    pub fn matches(&self, feature: &Feature) -> bool {
        match self {
            SpatialFilter::Include => true,
            SpatialFilter::BBox(bbox) => feature
                .bounds()
                .is_some_and(|extent| extent.intersects(bbox)),
        }
    }
}

/// Scoped traversal over a source's features.
///
/// Items are `Err` only for problems confined to one feature (see
/// [`MeshError::is_feature_local`]); they never end the traversal early.
pub struct FeatureCursor<'a> {
    source: String,
    inner: Box<dyn Iterator<Item = Result<Feature, MeshError>> + 'a>,
    filter: SpatialFilter,
    yielded: usize,
}

impl<'a> FeatureCursor<'a> {
    pub fn new(
        source: impl Into<String>,
        filter: SpatialFilter,
        inner: impl Iterator<Item = Result<Feature, MeshError>> + 'a,
    ) -> Self {
        let source = source.into();
        log::debug!("opened feature cursor on {source}");
        Self {
            source,
            inner: Box::new(inner),
            filter,
            yielded: 0,
        }
    }

    /// Items handed out so far.
    #[inline]
    pub fn yielded(&self) -> usize {
        self.yielded
    }
}

impl Iterator for FeatureCursor<'_> {
    type Item = Result<Feature, MeshError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let item = self.inner.next()?;
            if let Ok(feature) = &item {
                if !self.filter.matches(feature) {
                    continue;
                }
            }
            self.yielded += 1;
            return Some(item);
        }
    }
}

impl Drop for FeatureCursor<'_> {
    fn drop(&mut self) {
        log::debug!(
            "released feature cursor on {} after {} items",
            self.source,
            self.yielded
        );
    }
}

/// Abstract geospatial collection.
pub trait FeatureSource {
    /// Name used in logs and generated feature ids.
    fn name(&self) -> &str;

    /// Opens one traversal over the features accepted by `filter`.
    fn features(&self, filter: &SpatialFilter) -> Result<FeatureCursor<'_>, MeshError>;

    /// Extent of the features accepted by `filter`.
    ///
    /// Features that fail to decode are left out. Returns
    /// [`MeshError::Source`] when nothing has a finite coordinate.
    fn bounds(&self, filter: &SpatialFilter) -> Result<BoundingBox, MeshError> {
        extent_of(self.name(), self.features(filter)?)
    }
}

/// Union of the extents of every decodable feature in `cursor`.
fn extent_of(name: &str, cursor: FeatureCursor<'_>) -> Result<BoundingBox, MeshError> {
    cursor
        .flatten()
        .filter_map(|feature| feature.bounds())
        .reduce(|a, b| a.union(&b))
        .ok_or_else(|| MeshError::unreadable(name, "collection has no coordinates"))
}

/// In-memory source intended for tests and embedding.
///
/// # Examples
/// ```
/// use footprint_mesh::source::{Feature, FeatureSource, InMemoryFeatureSource, SpatialFilter};
/// use glam::DVec3;
///
/// let mut source = InMemoryFeatureSource::new("buildings");
/// source.push(Feature::new("b.1", vec![DVec3::ZERO, DVec3::new(4.0, 2.0, 0.0), DVec3::ZERO]));
/// let bounds = source.bounds(&SpatialFilter::Include).unwrap();
/// assert_eq!(bounds.width(), 4.0);
/// ```
#[derive(Debug, Default, Clone)]
pub struct InMemoryFeatureSource {
    name: String,
    features: Vec<Feature>,
}

impl InMemoryFeatureSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            features: Vec::new(),
        }
    }

    pub fn with_features(name: impl Into<String>, features: Vec<Feature>) -> Self {
        Self {
            name: name.into(),
            features,
        }
    }

    pub fn push(&mut self, feature: Feature) {
        self.features.push(feature);
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl FeatureSource for InMemoryFeatureSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn features(&self, filter: &SpatialFilter) -> Result<FeatureCursor<'_>, MeshError> {
        Ok(FeatureCursor::new(
            self.name.clone(),
            *filter,
            self.features.iter().cloned().map(Ok),
        ))
    }
}
