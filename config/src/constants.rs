//! # Configuration Constants
//!
//! Centralized constants for the footprint extrusion pipeline.
//!
//! ## Categories
//!
//! - **Scaling**: Local coordinate space the dataset is normalized into
//! - **Heights**: Extrusion heights and the fallback rules for buildings
//! - **Materials**: Material library, palette and fixed material names
//! - **Naming**: Group names and source attribute names

use std::fmt;

// =============================================================================
// SCALING CONSTANTS
// =============================================================================

/// Width of the local coordinate space, in output units.
///
/// The reference bounding box width is scaled to exactly this span, so every
/// normalized x coordinate of the reference dataset falls in `0..=TARGET_SPAN`.
///
/// # Example
///
/// ```rust
/// use config::constants::TARGET_SPAN;
///
/// let width = 50.0;
/// assert_eq!(TARGET_SPAN / width, 2.0);
/// ```
pub const TARGET_SPAN: f64 = 100.0;

// =============================================================================
// HEIGHT CONSTANTS
// =============================================================================

/// Height substituted when a building has no usable height attribute.
///
/// Expressed in raw dataset units; it is scaled together with the footprint.
pub const DEFAULT_BUILDING_HEIGHT: f64 = 5.0;

/// Smallest height attribute accepted as a real building height.
///
/// Values below this are treated as missing data.
///
/// # Example
///
/// ```rust
/// use config::constants::MIN_BUILDING_HEIGHT;
///
/// assert!(0.5 < MIN_BUILDING_HEIGHT);
/// ```
pub const MIN_BUILDING_HEIGHT: f64 = 1.0;

/// Fixed extrusion height for wooded areas.
pub const WOODLAND_HEIGHT: f64 = 1.0;

// =============================================================================
// MATERIAL CONSTANTS
// =============================================================================

/// Material library referenced from the mesh header.
pub const DEFAULT_MATERIAL_LIBRARY: &str = "material.mtl";

/// Prefix of the building material variants (`Building_1`, `Building_2`, ...).
pub const BUILDING_MATERIAL_PREFIX: &str = "Building";

/// Number of building material variants in the palette.
///
/// # Example
///
/// ```rust
/// use config::constants::{BUILDING_MATERIAL_PREFIX, BUILDING_MATERIAL_VARIANTS};
///
/// let last = format!("{}_{}", BUILDING_MATERIAL_PREFIX, BUILDING_MATERIAL_VARIANTS);
/// assert_eq!(last, "Building_10");
/// ```
pub const BUILDING_MATERIAL_VARIANTS: usize = 10;

/// Material assigned to every woodland group.
pub const WOODLAND_MATERIAL: &str = "Woodland";

/// Material assigned to the ground plane.
pub const TERRAIN_MATERIAL: &str = "Terrain";

// =============================================================================
// NAMING CONSTANTS
// =============================================================================

/// Group name of the ground plane.
pub const GROUND_GROUP_NAME: &str = "ground";

/// Feature attribute that carries the building height.
pub const DEFAULT_HEIGHT_ATTRIBUTE: &str = "_mean";

// =============================================================================
// RUNTIME CONFIGURATION
// =============================================================================

/// Immutable snapshot of the tunable conversion settings.
///
/// # Examples
/// ```
/// use config::constants::ConversionConfig;
/// let config = ConversionConfig::default();
/// assert_eq!(config.target_span, 100.0);
/// assert_eq!(config.height_attribute, "_mean");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionConfig {
    /// Span the reference bounding box width is scaled to.
    pub target_span: f64,
    /// Building height used when the attribute is missing or implausible.
    pub default_height: f64,
    /// Attribute the building height is read from.
    pub height_attribute: String,
    /// Material library named in the mesh header.
    pub material_library: String,
}

impl ConversionConfig {
    /// Builds a configuration enforcing strict validation of the supplied
    /// values.
    ///
    /// # Examples
    /// ```
    /// use config::constants::ConversionConfig;
    /// let cfg = ConversionConfig::new(200.0, 3.0, "height").expect("valid config");
    /// assert_eq!(cfg.default_height, 3.0);
    /// assert!(ConversionConfig::new(0.0, 3.0, "height").is_err());
    /// ```
    pub fn new(
        target_span: f64,
        default_height: f64,
        height_attribute: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        if !(target_span.is_finite() && target_span > 0.0) {
            return Err(ConfigError::InvalidTargetSpan(target_span));
        }
        if !(default_height.is_finite() && default_height >= MIN_BUILDING_HEIGHT) {
            return Err(ConfigError::InvalidDefaultHeight(default_height));
        }
        let height_attribute = height_attribute.into();
        if height_attribute.trim().is_empty() {
            return Err(ConfigError::EmptyAttributeName);
        }
        Ok(Self {
            target_span,
            default_height,
            height_attribute,
            material_library: DEFAULT_MATERIAL_LIBRARY.to_string(),
        })
    }

    /// Replaces the material library reference.
    pub fn with_material_library(mut self, library: impl Into<String>) -> Result<Self, ConfigError> {
        let library = library.into();
        if library.trim().is_empty() || library.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidMaterialLibrary(library));
        }
        self.material_library = library;
        Ok(self)
    }
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            target_span: TARGET_SPAN,
            default_height: DEFAULT_BUILDING_HEIGHT,
            height_attribute: DEFAULT_HEIGHT_ATTRIBUTE.to_string(),
            material_library: DEFAULT_MATERIAL_LIBRARY.to_string(),
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when the target span is zero, negative or not finite.
    InvalidTargetSpan(f64),
    /// Raised when the default height would itself be rejected as implausible.
    InvalidDefaultHeight(f64),
    /// Raised when the height attribute name is blank.
    EmptyAttributeName,
    /// Raised when the material library name cannot appear on an `mtllib` line.
    InvalidMaterialLibrary(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTargetSpan(value) => {
                write!(f, "target span must be positive and finite: {value}")
            }
            ConfigError::InvalidDefaultHeight(value) => {
                write!(f, "default height must be >= {MIN_BUILDING_HEIGHT}: {value}")
            }
            ConfigError::EmptyAttributeName => write!(f, "height attribute name is empty"),
            ConfigError::InvalidMaterialLibrary(value) => {
                write!(f, "invalid material library name: {value:?}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
