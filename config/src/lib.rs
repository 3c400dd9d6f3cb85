//! # Config Crate
//!
//! Centralized configuration constants for the footprint extrusion pipeline.
//! Every magic number the converter relies on (local coordinate span, default
//! heights, material and group names) is defined here so the mesh core and the
//! command line front end agree on them.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{DEFAULT_BUILDING_HEIGHT, MIN_BUILDING_HEIGHT, TARGET_SPAN};
//!
//! // A footprint that spans the whole dataset maps onto TARGET_SPAN units
//! let dataset_width = 2_500.0;
//! let scale = TARGET_SPAN / dataset_width;
//! assert!(scale > 0.0);
//!
//! // Implausible heights fall back to the default
//! let raw_height: f64 = 0.4;
//! let height = if raw_height < MIN_BUILDING_HEIGHT { DEFAULT_BUILDING_HEIGHT } else { raw_height };
//! assert_eq!(height, DEFAULT_BUILDING_HEIGHT);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Validated Snapshots**: Runtime overrides go through [`ConversionConfig::new`]
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;

pub use constants::{ConfigError, ConversionConfig};

#[cfg(test)]
mod tests;
