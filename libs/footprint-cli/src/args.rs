//! Command line arguments.

use clap::Parser;
use config::constants::{DEFAULT_BUILDING_HEIGHT, DEFAULT_HEIGHT_ATTRIBUTE, DEFAULT_MATERIAL_LIBRARY, TARGET_SPAN};
use footprint_mesh::BoundingBox;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "shp2obj", version, about = "Extrude polygon footprints into an OBJ scene")]
pub struct Args {
    /// GeoJSON FeatureCollection of building footprints; its extent sets the local frame.
    #[arg(long)]
    pub buildings: PathBuf,

    /// GeoJSON FeatureCollection of wooded areas.
    #[arg(long)]
    pub woodland: Option<PathBuf>,

    /// Output OBJ file.
    #[arg(long, short)]
    pub output: PathBuf,

    /// Material library named in the OBJ header.
    #[arg(long, default_value = DEFAULT_MATERIAL_LIBRARY)]
    pub material_library: String,

    /// Also write the material library next to the output file.
    #[arg(long, default_value_t = false)]
    pub write_mtl: bool,

    /// Only convert features touching minx,miny,maxx,maxy.
    #[arg(long, value_parser = parse_bbox)]
    pub bbox: Option<BoundingBox>,

    /// Seed for reproducible building materials.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Attribute holding the building height.
    #[arg(long, default_value = DEFAULT_HEIGHT_ATTRIBUTE)]
    pub height_attribute: String,

    /// Height for buildings without a usable attribute.
    #[arg(long, default_value_t = DEFAULT_BUILDING_HEIGHT)]
    pub default_height: f64,

    /// Span the building extent is scaled to.
    #[arg(long, default_value_t = TARGET_SPAN)]
    pub target_span: f64,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long, short, default_value_t = false)]
    pub verbose: bool,
}

/// Parses `minx,miny,maxx,maxy`.
pub fn parse_bbox(value: &str) -> Result<BoundingBox, String> {
    let parts = value
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid bbox coordinate: {e}"))?;
    match parts.as_slice() {
        &[min_x, min_y, max_x, max_y] if min_x <= max_x && min_y <= max_y => {
            Ok(BoundingBox::new(min_x, min_y, max_x, max_y))
        }
        [_, _, _, _] => Err("bbox minimum exceeds maximum".to_string()),
        _ => Err(format!("expected 4 comma separated values, got {}", parts.len())),
    }
}
