//! # Extrusion Operations
//!
//! Lifts a closed footprint ring to a flat-roofed prism:
//! - **extrude_ring**: walls between consecutive ring points plus a roof cap
//! - **effective_height**: height attribute with fallback to a default
//!
//! ## Vertex Layout
//!
//! Ring point `i` contributes two vertices, base at local index `2i` and
//! lifted at `2i + 1`, so base and top vertices are interleaved in ring order.

mod prism;

#[cfg(test)]
mod tests;

pub use prism::extrude_ring;

use config::constants::MIN_BUILDING_HEIGHT;

/// Resolves the extrusion height of a building.
///
/// Missing, non-finite and implausibly low (below [`MIN_BUILDING_HEIGHT`])
/// attribute values are replaced by `default`.
///
/// # Example
///
/// ```rust
/// use footprint_mesh::ops::extrude::effective_height;
///
/// assert_eq!(effective_height(Some(12.5), 5.0), 12.5);
/// assert_eq!(effective_height(Some(0.5), 5.0), 5.0);
/// assert_eq!(effective_height(None, 5.0), 5.0);
/// ```
pub fn effective_height(attribute: Option<f64>, default: f64) -> f64 {
    match attribute {
        Some(h) if h.is_finite() && h >= MIN_BUILDING_HEIGHT => h,
        _ => default,
    }
}
