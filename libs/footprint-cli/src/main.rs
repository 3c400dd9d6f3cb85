//! `shp2obj`: extrude building and woodland footprints into one OBJ scene.
//!
//! Exit status is non-zero when a source cannot be opened or the output
//! cannot be written. Malformed features are skipped with a warning.

mod args;

use anyhow::{Context, Result};
use args::Args;
use clap::Parser;
use config::ConversionConfig;
use footprint_mesh::material::{write_material_library, MaterialPalette, RandomSelector};
use footprint_mesh::{
    emit, prepare, ConversionReport, FeatureSource, GeoJsonFeatureSource, MaterialSelector, ObjWriter, SpatialFilter,
};
use std::fs::File;
use std::io::BufWriter;

fn main() -> Result<()> {
    let args = Args::parse();
    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let report = run(&args)?;
    log::info!(
        "wrote {} buildings, {} woodland areas and the ground plane to {} ({} vertices, {} faces, {} skipped)",
        report.buildings,
        report.woodland,
        args.output.display(),
        report.vertices,
        report.faces,
        report.skipped.len()
    );
    Ok(())
}

fn run(args: &Args) -> Result<ConversionReport> {
    let config = ConversionConfig::new(args.target_span, args.default_height, args.height_attribute.clone())
        .and_then(|c| c.with_material_library(args.material_library.clone()))
        .context("invalid conversion settings")?;

    // Everything that can reject the input runs before the output file exists
    let buildings = GeoJsonFeatureSource::open(&args.buildings)
        .with_context(|| format!("opening buildings {}", args.buildings.display()))?;
    let woodland = args
        .woodland
        .as_ref()
        .map(|path| {
            GeoJsonFeatureSource::open(path).with_context(|| format!("opening woodland {}", path.display()))
        })
        .transpose()?;
    let filter = args.bbox.map_or(SpatialFilter::Include, SpatialFilter::BBox);
    let reference = prepare(&buildings, &config, &filter)
        .with_context(|| format!("measuring buildings {}", args.buildings.display()))?;

    let mut selector: Box<dyn MaterialSelector> = match args.seed {
        Some(seed) => Box::new(RandomSelector::seeded(seed)),
        None => Box::new(RandomSelector::from_entropy()),
    };

    let file = File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    let mut writer = ObjWriter::new(BufWriter::new(file), &config.material_library)?;
    let report = emit(
        &reference,
        &buildings,
        woodland.as_ref().map(|w| w as &dyn FeatureSource),
        &mut writer,
        selector.as_mut(),
        &config,
        &filter,
    )
    .with_context(|| format!("converting into {}", args.output.display()))?;
    writer.finish().context("flushing output")?;

    if args.write_mtl {
        let mtl_path = args.output.with_file_name(&config.material_library);
        let mtl = File::create(&mtl_path).with_context(|| format!("creating {}", mtl_path.display()))?;
        write_material_library(BufWriter::new(mtl), &MaterialPalette::default())
            .with_context(|| format!("writing {}", mtl_path.display()))?;
        log::info!("wrote material library {}", mtl_path.display());
    }
    Ok(report)
}
