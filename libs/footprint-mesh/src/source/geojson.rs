//! GeoJSON `FeatureCollection` reader.
//!
//! `Polygon` and `MultiPolygon` geometries are flattened ring after ring
//! (exterior, holes, next polygon) into one coordinate sequence, the same
//! layout geometry stores hand out. Other geometry types are reported as
//! [`MeshError::UnsupportedGeometry`] items so the caller can skip them.

use super::{extent_of, Feature, FeatureCursor, FeatureSource, SpatialFilter};
use crate::error::MeshError;
use crate::geometry::{BoundingBox, Point3};
use crate::mesh::obj_token;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CollectionDoc {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    bbox: Option<Vec<f64>>,
    #[serde(default)]
    features: Vec<FeatureDoc>,
}

#[derive(Debug, Deserialize)]
struct FeatureDoc {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    geometry: Option<GeometryDoc>,
    #[serde(default)]
    properties: Option<serde_json::Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct GeometryDoc {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    coordinates: Value,
}

type Position = Vec<f64>;

/// A GeoJSON file (or string) decoded into memory.
#[derive(Debug)]
pub struct GeoJsonFeatureSource {
    name: String,
    declared_bounds: Option<BoundingBox>,
    features: Vec<FeatureDoc>,
}

impl GeoJsonFeatureSource {
    /// Reads and decodes a file. The file handle is closed before this
    /// returns, on success and on failure.
    ///
    /// # Errors
    ///
    /// [`MeshError::SourceNotFound`] if `path` does not exist,
    /// [`MeshError::Source`] if it is not a GeoJSON `FeatureCollection`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, MeshError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(MeshError::SourceNotFound {
                path: path.display().to_string(),
            });
        }
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let file = File::open(path)?;
        let doc: CollectionDoc = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| MeshError::unreadable(&name, e.to_string()))?;
        Self::from_doc(name, doc)
    }

    /// Decodes an in-memory GeoJSON document.
    ///
    /// # Examples
    /// ```
    /// use footprint_mesh::source::{FeatureSource, GeoJsonFeatureSource, SpatialFilter};
    ///
    /// let json = r#"{"type":"FeatureCollection","features":[
    ///   {"type":"Feature","id":"w.1","properties":{},
    ///    "geometry":{"type":"Polygon","coordinates":[[[0,0],[2,0],[2,1],[0,0]]]}}]}"#;
    /// let source = GeoJsonFeatureSource::from_str("woodland", json).unwrap();
    /// let features: Vec<_> = source.features(&SpatialFilter::Include).unwrap().collect();
    /// assert_eq!(features.len(), 1);
    /// ```
    pub fn from_str(name: impl Into<String>, json: &str) -> Result<Self, MeshError> {
        let name = name.into();
        let doc: CollectionDoc =
            serde_json::from_str(json).map_err(|e| MeshError::unreadable(&name, e.to_string()))?;
        Self::from_doc(name, doc)
    }

    fn from_doc(name: String, doc: CollectionDoc) -> Result<Self, MeshError> {
        if doc.kind != "FeatureCollection" {
            return Err(MeshError::unreadable(
                &name,
                format!("expected a FeatureCollection, found {}", doc.kind),
            ));
        }
        let declared_bounds = match doc.bbox.as_deref() {
            Some([min_x, min_y, max_x, max_y]) => Some(BoundingBox::new(*min_x, *min_y, *max_x, *max_y)),
            // 3D bbox: [minx, miny, minz, maxx, maxy, maxz]
            Some([min_x, min_y, _, max_x, max_y, _]) => {
                Some(BoundingBox::new(*min_x, *min_y, *max_x, *max_y))
            }
            _ => None,
        }
        .filter(|bbox| {
            let usable = [bbox.min_x, bbox.min_y, bbox.max_x, bbox.max_y].iter().all(|v| v.is_finite())
                && bbox.min_x <= bbox.max_x
                && bbox.min_y <= bbox.max_y;
            if !usable {
                log::warn!("ignoring inverted or non-finite bbox declared by {name}");
            }
            usable
        });
        log::info!("loaded {} features from {}", doc.features.len(), name);
        Ok(Self {
            name,
            declared_bounds,
            features: doc.features,
        })
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    fn decode(&self, index: usize, doc: &FeatureDoc) -> Result<Feature, MeshError> {
        let id = match &doc.id {
            Some(Value::String(s)) => obj_token(s),
            Some(Value::Number(n)) => n.to_string(),
            _ => format!("{}.{}", self.name, index + 1),
        };

        let Some(geometry) = &doc.geometry else {
            return Err(unsupported(id, "null"));
        };
        let coordinates = match geometry.kind.as_str() {
            "Polygon" => {
                let rings: Vec<Vec<Position>> = serde_json::from_value(geometry.coordinates.clone())
                    .map_err(|_| unsupported(&id, "Polygon with invalid coordinates"))?;
                flatten_rings(&id, rings.iter())?
            }
            "MultiPolygon" => {
                let polygons: Vec<Vec<Vec<Position>>> =
                    serde_json::from_value(geometry.coordinates.clone())
                        .map_err(|_| unsupported(&id, "MultiPolygon with invalid coordinates"))?;
                flatten_rings(&id, polygons.iter().flatten())?
            }
            other => return Err(unsupported(&id, other)),
        };

        let attributes = doc
            .properties
            .iter()
            .flatten()
            .filter_map(|(key, value)| numeric(value).map(|v| (key.clone(), v)))
            .collect::<HashMap<_, _>>();

        Ok(Feature {
            id,
            coordinates,
            attributes,
        })
    }
}

fn unsupported(feature_id: impl Into<String>, geometry_type: impl Into<String>) -> MeshError {
    MeshError::UnsupportedGeometry {
        feature_id: feature_id.into(),
        geometry_type: geometry_type.into(),
    }
}

fn flatten_rings<'a>(
    feature_id: &str,
    rings: impl Iterator<Item = &'a Vec<Position>>,
) -> Result<Vec<Point3>, MeshError> {
    let mut out = Vec::new();
    for ring in rings {
        for position in ring {
            match position.as_slice() {
                [x, y] => out.push(Point3::new(*x, *y, 0.0)),
                [x, y, z, ..] => out.push(Point3::new(*x, *y, *z)),
                _ => return Err(unsupported(feature_id, "position with fewer than 2 values")),
            }
        }
    }
    Ok(out)
}

/// Numeric attribute value; numeric strings are accepted as well.
fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl FeatureSource for GeoJsonFeatureSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn features(&self, filter: &SpatialFilter) -> Result<FeatureCursor<'_>, MeshError> {
        let decoded = self
            .features
            .iter()
            .enumerate()
            .map(move |(index, doc)| self.decode(index, doc));
        Ok(FeatureCursor::new(self.name.clone(), *filter, decoded))
    }

    fn bounds(&self, filter: &SpatialFilter) -> Result<BoundingBox, MeshError> {
        if let (SpatialFilter::Include, Some(declared)) = (filter, self.declared_bounds) {
            return Ok(declared);
        }
        extent_of(&self.name, self.features(filter)?)
    }
}
