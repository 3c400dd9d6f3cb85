//! End-to-end conversion tests over in-memory and GeoJSON sources.

use config::ConversionConfig;
use footprint_mesh::material::{CyclicSelector, RandomSelector};
use footprint_mesh::{
    convert, Feature, FeatureSource, GeoJsonFeatureSource, InMemoryFeatureSource, MeshDocument,
    ObjWriter, SpatialFilter,
};
use glam::DVec3;

fn closed(points: &[(f64, f64)]) -> Vec<DVec3> {
    let mut ring: Vec<DVec3> = points.iter().map(|&(x, y)| DVec3::new(x, y, 0.0)).collect();
    ring.push(ring[0]);
    ring
}

/// Two buildings (ring lengths 5 and 4) and one wooded area (ring length 4).
fn sample_sources() -> (InMemoryFeatureSource, InMemoryFeatureSource) {
    let buildings = InMemoryFeatureSource::with_features(
        "buildings",
        vec![
            Feature::new("b.1", closed(&[(0.0, 0.0), (20.0, 0.0), (20.0, 10.0), (0.0, 10.0)]))
                .with_attribute("_mean", 12.0),
            Feature::new("b.2", closed(&[(30.0, 0.0), (50.0, 0.0), (40.0, 15.0)])),
        ],
    );
    let woodland = InMemoryFeatureSource::with_features(
        "woodland",
        vec![Feature::new("w.1", closed(&[(5.0, 20.0), (15.0, 20.0), (10.0, 30.0)]))],
    );
    (buildings, woodland)
}

fn convert_to_document(
    buildings: &dyn FeatureSource,
    woodland: Option<&dyn FeatureSource>,
    seed: u64,
) -> MeshDocument {
    let mut doc = MeshDocument::new("material.mtl");
    convert(
        buildings,
        woodland,
        &mut doc,
        &mut RandomSelector::seeded(seed),
        &ConversionConfig::default(),
        &SpatialFilter::Include,
    )
    .unwrap();
    doc
}

#[test]
fn test_four_groups_with_resolvable_indices() {
    let (buildings, woodland) = sample_sources();
    let doc = convert_to_document(&buildings, Some(&woodland), 7);

    assert_eq!(doc.groups().len(), 4);
    // 2 * ring length per footprint, 4 for the ground
    assert_eq!(doc.vertex_offsets(), vec![10, 18, 26, 30]);
    assert!(doc.validate());

    let walls: Vec<usize> = doc.groups().iter().map(|g| g.solid.wall_count()).collect();
    assert_eq!(walls, [5, 4, 4, 0]);
}

#[test]
fn test_obj_text_layout() {
    let (buildings, woodland) = sample_sources();
    let mut writer = ObjWriter::new(Vec::new(), "material.mtl").unwrap();
    let report = convert(
        &buildings,
        Some(&woodland),
        &mut writer,
        &mut CyclicSelector::new(),
        &ConversionConfig::default(),
        &SpatialFilter::Include,
    )
    .unwrap();
    assert_eq!(writer.vertex_count(), report.vertices);
    let text = String::from_utf8(writer.finish().unwrap()).unwrap();

    assert!(text.starts_with("mtllib material.mtl\no b.1\nusemtl Building_1\nv 0 0 0\n"));
    assert!(text.contains("o b.2\nusemtl Building_2\n"));
    assert!(text.contains("o w.1\nusemtl Woodland\n"));
    assert!(text.ends_with("o ground\nusemtl Terrain\nv 0 30 0\nv 0 0 0\nv 100 30 0\nv 100 0 0\nf -1 -2 -4 -3\n"));

    // Walls of the first building, including the closing wall
    assert!(text.contains("f -8 -7 -9 -10\n"));
    assert!(text.contains("f -10 -9 -1 -2\n"));
    // Its roof
    assert!(text.contains("f -9 -7 -5 -3 -1\n"));

    // Every vertex line precedes the faces of its group
    let mut seen_vertices = 0i64;
    let mut group_vertices = 0i64;
    for line in text.lines() {
        if line.starts_with("o ") {
            group_vertices = 0;
        } else if line.starts_with("v ") {
            seen_vertices += 1;
            group_vertices += 1;
        } else if let Some(indices) = line.strip_prefix("f ") {
            for index in indices.split(' ') {
                let rel: i64 = index.parse().unwrap();
                assert!(rel < 0 && -rel <= group_vertices && -rel <= seen_vertices);
            }
        }
    }
    assert_eq!(seen_vertices, 30);
}

#[test]
fn test_same_seed_same_output() {
    let (buildings, woodland) = sample_sources();
    let a = convert_to_document(&buildings, Some(&woodland), 99).to_obj_string().unwrap();
    let b = convert_to_document(&buildings, Some(&woodland), 99).to_obj_string().unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_heights_follow_attribute_and_default() {
    let (buildings, woodland) = sample_sources();
    let doc = convert_to_document(&buildings, Some(&woodland), 1);
    // Reference width 50 maps to 100: scale 2
    let roof_z = |i: usize| doc.groups()[i].solid.vertices()[1].z;
    assert_eq!(roof_z(0), 24.0);
    assert_eq!(roof_z(1), 10.0);
    assert_eq!(roof_z(2), 2.0);
}

#[test]
fn test_malformed_feature_skipped_end_to_end() {
    let (mut buildings, woodland) = sample_sources();
    buildings.push(Feature::new(
        "b.open",
        vec![DVec3::new(1.0, 1.0, 0.0), DVec3::new(2.0, 1.0, 0.0), DVec3::new(2.0, 2.0, 0.0)],
    ));
    let mut doc = MeshDocument::new("material.mtl");
    let report = convert(
        &buildings,
        Some(&woodland),
        &mut doc,
        &mut CyclicSelector::new(),
        &ConversionConfig::default(),
        &SpatialFilter::Include,
    )
    .unwrap();

    assert_eq!(report.buildings, 2);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].id, "b.open");
    assert_eq!(doc.groups().len(), 4);
    assert!(doc.validate());
}

#[test]
fn test_geojson_sources() {
    let buildings = GeoJsonFeatureSource::from_str(
        "buildings",
        r#"{"type":"FeatureCollection","features":[
          {"type":"Feature","id":"b.1","properties":{"_mean":6},
           "geometry":{"type":"Polygon","coordinates":[
             [[0,0],[10,0],[10,10],[0,10],[0,0]],
             [[2,2],[4,2],[4,4],[2,2]]]}},
          {"type":"Feature","id":"b.2","properties":{},
           "geometry":{"type":"Point","coordinates":[3,3]}}]}"#,
    )
    .unwrap();
    let woodland = GeoJsonFeatureSource::from_str(
        "woodland",
        r#"{"type":"FeatureCollection","features":[
          {"type":"Feature","properties":{},
           "geometry":{"type":"MultiPolygon","coordinates":[[[[1,1],[3,1],[3,3],[1,1]]]]}}]}"#,
    )
    .unwrap();

    let mut doc = MeshDocument::new("material.mtl");
    let report = convert(
        &buildings,
        Some(&woodland),
        &mut doc,
        &mut CyclicSelector::new(),
        &ConversionConfig::default(),
        &SpatialFilter::Include,
    )
    .unwrap();

    // The hole ring is ignored: only the exterior is extruded
    assert_eq!(doc.groups()[0].solid.vertex_count(), 10);
    assert_eq!(doc.groups()[1].name, "woodland.1");
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].id, "b.2");
    assert!(doc.validate());
}
