//! # Conversion Pipeline
//!
//! Single pass from feature sources to a mesh sink:
//!
//! ```text
//! building bounds → transform → buildings → woodland → ground
//! ```
//!
//! The transform is snapshotted once from the building collection and
//! shared by every group, the ground plane included. Features whose
//! geometry cannot be extruded are skipped and reported; any other error
//! ends the run.

use crate::error::MeshError;
use crate::geometry::BoundingBox;
use crate::material::{MaterialPalette, MaterialSelector};
use crate::mesh::MeshGroup;
use crate::obj::MeshSink;
use crate::ops::{build_ground_plane, effective_height, extrude_ring};
use crate::ring::extract_first_ring;
use crate::source::{Feature, FeatureSource, SpatialFilter};
use crate::transform::{CoordinateNormalizer, NormalizationTransform};
use config::constants::{WOODLAND_HEIGHT, WOODLAND_MATERIAL};
use config::ConversionConfig;

// =============================================================================
// FEATURE KINDS
// =============================================================================

/// How a feature is lifted and painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureKind {
    /// Height from the configured attribute, material from the palette.
    Building,
    /// Fixed height and the `Woodland` material.
    Woodland,
}

impl std::fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeatureKind::Building => write!(f, "building"),
            FeatureKind::Woodland => write!(f, "woodland"),
        }
    }
}

/// A feature left out of the mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedFeature {
    pub kind: FeatureKind,
    pub id: String,
    pub reason: String,
}

/// Summary of one conversion run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversionReport {
    /// Building groups emitted.
    pub buildings: usize,
    /// Woodland groups emitted.
    pub woodland: usize,
    pub skipped: Vec<SkippedFeature>,
    /// Vertices emitted, ground plane included.
    pub vertices: usize,
    /// Faces emitted, ground plane included.
    pub faces: usize,
}

impl ConversionReport {
    /// Groups emitted, ground plane included.
    pub fn groups(&self) -> usize {
        self.buildings + self.woodland + 1
    }

    fn record(&mut self, group: &MeshGroup) {
        self.vertices += group.solid.vertex_count();
        self.faces += group.solid.face_count();
    }
}

// =============================================================================
// PER-FEATURE CONVERSION
// =============================================================================

/// Extrudes one building into a group named after the feature.
pub fn building_group(
    feature: &Feature,
    transform: &NormalizationTransform,
    palette: &MaterialPalette,
    selector: &mut dyn MaterialSelector,
    config: &ConversionConfig,
) -> Result<MeshGroup, MeshError> {
    let ring = extract_first_ring(&feature.id, &feature.coordinates)?;
    let height = effective_height(feature.attribute(&config.height_attribute), config.default_height);
    let solid = extrude_ring(ring, height, transform);
    Ok(MeshGroup::new(&feature.id, palette.pick(selector), solid))
}

/// Extrudes one wooded area into a group named after the feature.
pub fn woodland_group(feature: &Feature, transform: &NormalizationTransform) -> Result<MeshGroup, MeshError> {
    let ring = extract_first_ring(&feature.id, &feature.coordinates)?;
    let solid = extrude_ring(ring, WOODLAND_HEIGHT, transform);
    Ok(MeshGroup::new(&feature.id, WOODLAND_MATERIAL, solid))
}

// =============================================================================
// PIPELINE
// =============================================================================

/// Converts building and optional woodland footprints into `sink`.
///
/// `filter` restricts both collections and the reference bounds. Groups
/// reach the sink in processing order: buildings, woodland, then the
/// ground plane spanning the building bounds.
///
/// # Errors
///
/// Source, transform and output errors abort the run. Groups accepted by
/// the sink before the failure stay where they are.
///
/// # Example
///
/// ```rust
/// use footprint_mesh::material::CyclicSelector;
/// use footprint_mesh::pipeline::convert;
/// use footprint_mesh::source::{Feature, InMemoryFeatureSource, SpatialFilter};
/// use footprint_mesh::MeshDocument;
/// use glam::DVec3;
///
/// let square = vec![
///     DVec3::new(0.0, 0.0, 0.0),
///     DVec3::new(10.0, 0.0, 0.0),
///     DVec3::new(10.0, 10.0, 0.0),
///     DVec3::new(0.0, 10.0, 0.0),
///     DVec3::new(0.0, 0.0, 0.0),
/// ];
/// let buildings = InMemoryFeatureSource::with_features("b", vec![Feature::new("b.1", square)]);
/// let mut doc = MeshDocument::new("material.mtl");
/// let report = convert(
///     &buildings,
///     None,
///     &mut doc,
///     &mut CyclicSelector::new(),
///     &Default::default(),
///     &SpatialFilter::Include,
/// )
/// .unwrap();
/// assert_eq!(report.buildings, 1);
/// assert_eq!(doc.groups().len(), 2);
/// ```
pub fn convert(
    buildings: &dyn FeatureSource,
    woodland: Option<&dyn FeatureSource>,
    sink: &mut dyn MeshSink,
    selector: &mut dyn MaterialSelector,
    config: &ConversionConfig,
    filter: &SpatialFilter,
) -> Result<ConversionReport, MeshError> {
    let reference = prepare(buildings, config, filter)?;
    emit(&reference, buildings, woodland, sink, selector, config, filter)
}

/// Reference extent and the transform snapshotted from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reference {
    pub bounds: BoundingBox,
    pub transform: NormalizationTransform,
}

/// Computes the building extent and its transform.
///
/// Every fatal input problem (empty collection, zero-width extent) shows
/// up here, so callers can run this before creating any output.
pub fn prepare(
    buildings: &dyn FeatureSource,
    config: &ConversionConfig,
    filter: &SpatialFilter,
) -> Result<Reference, MeshError> {
    let bounds = buildings.bounds(filter)?;
    let mut normalizer = CoordinateNormalizer::with_target_span(config.target_span);
    let transform = *normalizer.initialize(&bounds)?;
    log::info!(
        "reference bounds of {}: {} x {}",
        buildings.name(),
        bounds.width(),
        bounds.height()
    );
    Ok(Reference { bounds, transform })
}

/// Emission pass of [`convert`] over an already prepared reference.
pub fn emit(
    reference: &Reference,
    buildings: &dyn FeatureSource,
    woodland: Option<&dyn FeatureSource>,
    sink: &mut dyn MeshSink,
    selector: &mut dyn MaterialSelector,
    config: &ConversionConfig,
    filter: &SpatialFilter,
) -> Result<ConversionReport, MeshError> {
    let transform = reference.transform;
    let palette = MaterialPalette::default();
    let mut report = ConversionReport::default();

    for item in buildings.features(filter)? {
        let group = item.and_then(|f| building_group(&f, &transform, &palette, selector, config));
        if let Some(group) = accept_or_skip(FeatureKind::Building, group, &mut report)? {
            report.record(&group);
            sink.accept(group)?;
            report.buildings += 1;
        }
    }
    log::info!("converted {} buildings from {}", report.buildings, buildings.name());

    if let Some(woodland) = woodland {
        for item in woodland.features(filter)? {
            let group = item.and_then(|f| woodland_group(&f, &transform));
            if let Some(group) = accept_or_skip(FeatureKind::Woodland, group, &mut report)? {
                report.record(&group);
                sink.accept(group)?;
                report.woodland += 1;
            }
        }
        log::info!("converted {} woodland areas from {}", report.woodland, woodland.name());
    }

    let ground = build_ground_plane(&reference.bounds, &transform);
    report.record(&ground);
    sink.accept(ground)?;

    if !report.skipped.is_empty() {
        log::warn!("skipped {} features", report.skipped.len());
    }
    Ok(report)
}

/// Passes a group through, or records a feature-local failure and moves on.
fn accept_or_skip(
    kind: FeatureKind,
    group: Result<MeshGroup, MeshError>,
    report: &mut ConversionReport,
) -> Result<Option<MeshGroup>, MeshError> {
    match group {
        Ok(group) => Ok(Some(group)),
        Err(err) if err.is_feature_local() => {
            let id = match &err {
                MeshError::MalformedGeometry { feature_id, .. }
                | MeshError::UnsupportedGeometry { feature_id, .. } => feature_id.clone(),
                _ => String::new(),
            };
            log::warn!("skipping {kind} {id}: {err}");
            report.skipped.push(SkippedFeature {
                kind,
                id,
                reason: err.to_string(),
            });
            Ok(None)
        }
        Err(err) => Err(err),
    }
}
