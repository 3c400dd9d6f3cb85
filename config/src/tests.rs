//! # Tests for Config Constants
//!
//! Unit tests verifying the configuration constants and the validated
//! [`ConversionConfig`] snapshot.

use crate::constants::*;

// =============================================================================
// CONSTANT TESTS
// =============================================================================

#[test]
fn test_target_span_is_positive() {
    assert!(TARGET_SPAN > 0.0, "TARGET_SPAN must be positive");
}

#[test]
fn test_default_height_is_accepted_height() {
    // The fallback must not itself be rejected by the fallback rule
    assert!(DEFAULT_BUILDING_HEIGHT >= MIN_BUILDING_HEIGHT);
}

#[test]
fn test_woodland_height_is_positive() {
    assert!(WOODLAND_HEIGHT > 0.0);
}

#[test]
fn test_palette_has_variants() {
    assert!(BUILDING_MATERIAL_VARIANTS >= 1);
}

#[test]
fn test_fixed_names_have_no_whitespace() {
    // Names end up as single OBJ tokens
    for name in [
        DEFAULT_MATERIAL_LIBRARY,
        BUILDING_MATERIAL_PREFIX,
        WOODLAND_MATERIAL,
        TERRAIN_MATERIAL,
        GROUND_GROUP_NAME,
    ] {
        assert!(!name.is_empty());
        assert!(!name.chars().any(char::is_whitespace), "{name:?}");
    }
}

// =============================================================================
// CONVERSION CONFIG TESTS
// =============================================================================

#[test]
fn test_default_config_uses_constants() {
    let cfg = ConversionConfig::default();
    assert_eq!(cfg.target_span, TARGET_SPAN);
    assert_eq!(cfg.default_height, DEFAULT_BUILDING_HEIGHT);
    assert_eq!(cfg.height_attribute, DEFAULT_HEIGHT_ATTRIBUTE);
    assert_eq!(cfg.material_library, DEFAULT_MATERIAL_LIBRARY);
}

#[test]
fn test_new_validates_target_span() {
    assert_eq!(
        ConversionConfig::new(0.0, 5.0, "_mean").unwrap_err(),
        ConfigError::InvalidTargetSpan(0.0)
    );
    assert!(ConversionConfig::new(f64::INFINITY, 5.0, "_mean").is_err());
    assert!(ConversionConfig::new(-1.0, 5.0, "_mean").is_err());
}

#[test]
fn test_new_validates_default_height() {
    assert_eq!(
        ConversionConfig::new(100.0, 0.5, "_mean").unwrap_err(),
        ConfigError::InvalidDefaultHeight(0.5)
    );
}

#[test]
fn test_new_rejects_blank_attribute() {
    assert_eq!(
        ConversionConfig::new(100.0, 5.0, "  ").unwrap_err(),
        ConfigError::EmptyAttributeName
    );
}

#[test]
fn test_material_library_override() {
    let cfg = ConversionConfig::default()
        .with_material_library("city.mtl")
        .unwrap();
    assert_eq!(cfg.material_library, "city.mtl");

    let err = ConversionConfig::default()
        .with_material_library("my city.mtl")
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidMaterialLibrary(_)));
}

#[test]
fn test_error_display() {
    let err = ConfigError::InvalidTargetSpan(-2.0);
    assert!(err.to_string().contains("target span"));
}
