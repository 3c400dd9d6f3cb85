//! # Materials
//!
//! Building groups draw a material from a small palette of named variants.
//! The choice is purely aesthetic, so it sits behind [`MaterialSelector`]:
//! random in normal runs, seeded or cyclic when output must be reproducible.

use config::constants::{
    BUILDING_MATERIAL_PREFIX, BUILDING_MATERIAL_VARIANTS, TERRAIN_MATERIAL, WOODLAND_MATERIAL,
};
use rand::rngs::ThreadRng;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::io::Write;

/// Strategy picking one of `variants` palette entries per group.
pub trait MaterialSelector {
    /// Returns an index in `0..variants`. `variants` is never zero.
    fn select(&mut self, variants: usize) -> usize;
}

impl<S: MaterialSelector + ?Sized> MaterialSelector for &mut S {
    fn select(&mut self, variants: usize) -> usize {
        (**self).select(variants)
    }
}

/// Uniform random choice backed by any [`Rng`].
#[derive(Debug, Clone)]
pub struct RandomSelector<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomSelector<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomSelector<ThreadRng> {
    /// Non-reproducible selector for normal runs.
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl RandomSelector<ChaCha8Rng> {
    /// Reproducible selector: the same seed yields the same material sequence.
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> MaterialSelector for RandomSelector<R> {
    fn select(&mut self, variants: usize) -> usize {
        self.rng.gen_range(0..variants)
    }
}

/// Walks the palette in order, wrapping around.
#[derive(Debug, Clone, Default)]
pub struct CyclicSelector {
    next: usize,
}

impl CyclicSelector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MaterialSelector for CyclicSelector {
    fn select(&mut self, variants: usize) -> usize {
        let choice = self.next % variants;
        self.next = self.next.wrapping_add(1);
        choice
    }
}

/// Always the same variant (clamped to the palette).
#[derive(Debug, Clone, Copy)]
pub struct FixedSelector(pub usize);

impl MaterialSelector for FixedSelector {
    fn select(&mut self, variants: usize) -> usize {
        self.0.min(variants.saturating_sub(1))
    }
}

/// Named building material variants `<prefix>_1` .. `<prefix>_<variants>`.
///
/// Never empty: [`MaterialPalette::new`] keeps at least one variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialPalette {
    prefix: String,
    variants: usize,
}

impl Default for MaterialPalette {
    fn default() -> Self {
        Self {
            prefix: BUILDING_MATERIAL_PREFIX.to_string(),
            variants: BUILDING_MATERIAL_VARIANTS,
        }
    }
}

#[allow(clippy::len_without_is_empty)]
impl MaterialPalette {
    /// Creates a palette. A zero variant count is raised to one.
    pub fn new(prefix: impl Into<String>, variants: usize) -> Self {
        Self {
            prefix: prefix.into(),
            variants: variants.max(1),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.variants
    }

    /// Name of the zero-based variant `index`.
    pub fn name(&self, index: usize) -> String {
        format!("{}_{}", self.prefix, index.min(self.variants.saturating_sub(1)) + 1)
    }

    /// Draws a material name through `selector`.
    pub fn pick(&self, selector: &mut dyn MaterialSelector) -> String {
        self.name(selector.select(self.variants))
    }

    /// All variant names in palette order.
    pub fn names(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.variants).map(|i| self.name(i))
    }
}

/// Diffuse color of a palette variant: warm greys getting lighter with the
/// index so neighbouring buildings stay distinguishable.
fn building_color(index: usize, variants: usize) -> [f32; 3] {
    let t = if variants > 1 {
        index as f32 / (variants - 1) as f32
    } else {
        0.5
    };
    let base = 0.45 + 0.4 * t;
    [base + 0.05, base, base - 0.05]
}

const WOODLAND_COLOR: [f32; 3] = [0.13, 0.42, 0.16];
const TERRAIN_COLOR: [f32; 3] = [0.55, 0.62, 0.38];

/// Writes the `.mtl` library the mesh header points at.
///
/// # Example
///
/// ```rust
/// use footprint_mesh::material::{write_material_library, MaterialPalette};
///
/// let mut out = Vec::new();
/// write_material_library(&mut out, &MaterialPalette::new("Building", 2)).unwrap();
/// let text = String::from_utf8(out).unwrap();
/// assert!(text.contains("newmtl Building_2"));
/// assert!(text.contains("newmtl Terrain"));
/// ```
pub fn write_material_library<W: Write>(mut writer: W, palette: &MaterialPalette) -> std::io::Result<()> {
    let mut entries: Vec<(String, [f32; 3])> = palette
        .names()
        .enumerate()
        .map(|(i, name)| (name, building_color(i, palette.len())))
        .collect();
    entries.push((WOODLAND_MATERIAL.to_string(), WOODLAND_COLOR));
    entries.push((TERRAIN_MATERIAL.to_string(), TERRAIN_COLOR));

    for (name, [r, g, b]) in entries {
        writeln!(writer, "newmtl {name}")?;
        writeln!(writer, "Ka 0 0 0")?;
        writeln!(writer, "Kd {r:.3} {g:.3} {b:.3}")?;
        writeln!(writer, "Ks 0 0 0")?;
        writeln!(writer, "d 1")?;
        writeln!(writer, "illum 1")?;
        writeln!(writer)?;
    }
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_names() {
        let palette = MaterialPalette::default();
        assert_eq!(palette.len(), 10);
        assert_eq!(palette.name(0), "Building_1");
        assert_eq!(palette.name(9), "Building_10");
        assert_eq!(palette.names().count(), 10);
    }

    #[test]
    fn test_cyclic_selector_wraps() {
        let palette = MaterialPalette::new("Building", 3);
        let mut selector = CyclicSelector::new();
        let picks: Vec<String> = (0..4).map(|_| palette.pick(&mut selector)).collect();
        assert_eq!(picks, ["Building_1", "Building_2", "Building_3", "Building_1"]);
    }

    #[test]
    fn test_fixed_selector_clamps() {
        let palette = MaterialPalette::default();
        assert_eq!(palette.pick(&mut FixedSelector(4)), "Building_5");
        assert_eq!(palette.pick(&mut FixedSelector(99)), "Building_10");
    }

    #[test]
    fn test_zero_variants_do_not_underflow() {
        assert_eq!(FixedSelector(3).select(0), 0);
        let palette = MaterialPalette::new("Building", 0);
        assert_eq!(palette.len(), 1);
        assert_eq!(palette.pick(&mut FixedSelector(7)), "Building_1");
    }

    #[test]
    fn test_seeded_selector_is_reproducible() {
        let palette = MaterialPalette::default();
        let mut a = RandomSelector::seeded(17);
        let mut b = RandomSelector::seeded(17);
        let first: Vec<String> = (0..20).map(|_| palette.pick(&mut a)).collect();
        let second: Vec<String> = (0..20).map(|_| palette.pick(&mut b)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_random_selector_stays_in_range() {
        let mut selector = RandomSelector::from_entropy();
        for _ in 0..200 {
            assert!(selector.select(10) < 10);
        }
    }

    #[test]
    fn test_material_library_lists_every_material() {
        let mut out = Vec::new();
        write_material_library(&mut out, &MaterialPalette::default()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("newmtl ").count(), 12);
        assert!(text.contains("newmtl Building_10\n"));
        assert!(text.contains("newmtl Woodland\n"));
    }

    #[test]
    fn test_building_colors_in_unit_range() {
        for i in 0..10 {
            for c in building_color(i, 10) {
                assert!((0.0..=1.0).contains(&c));
            }
        }
    }
}
