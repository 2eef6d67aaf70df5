//! Deterministic colour assignment for annotation values.
//!
//! Secondary-structure values use a fixed type → colour table. Every other
//! value is placed on a fixed colour wheel by a seedless hash of its label,
//! so the same label gets the same colour in every process run.

use std::hash::{Hash, Hasher};

use rustc_hash::{FxHashMap, FxHasher};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::annotation::AnnotationValue;
use crate::options::ColorOptions;

/// 8-bit RGB colour, serialized as `{ "r": .., "g": .., "b": .. }`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Construct from channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert from a 0-1 float triple (the options format).
    #[must_use]
    pub fn from_unit(rgb: [f32; 3]) -> Self {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::new(channel(rgb[0]), channel(rgb[1]), channel(rgb[2]))
    }

    /// CSS hex notation (`#rrggbb`).
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Seedless 64-bit hash of a label. Identical across process runs.
#[must_use]
pub fn stable_hash(label: &str) -> u64 {
    let mut hasher = FxHasher::default();
    label.hash(&mut hasher);
    hasher.finish()
}

/// Fixed wheel of evenly spaced hues.
#[derive(Debug, Clone)]
pub struct ColorWheel {
    colors: Vec<Rgb>,
}

impl ColorWheel {
    /// Build a wheel of `buckets` hues at the given HSV saturation/value.
    #[must_use]
    pub fn new(buckets: usize, saturation: f32, value: f32) -> Self {
        let buckets = buckets.max(1);
        let colors = (0..buckets)
            .map(|i| hsv_to_rgb(i as f32 / buckets as f32, saturation, value))
            .collect();
        Self { colors }
    }

    /// Number of buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; a wheel has at least one bucket.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Colour at `hash(label) mod N`.
    #[must_use]
    pub fn color_for_label(&self, label: &str) -> Rgb {
        let bucket = (stable_hash(label) % self.colors.len() as u64) as usize;
        self.colors[bucket]
    }
}

fn hsv_to_rgb(hue: f32, saturation: f32, value: f32) -> Rgb {
    let h = (hue.fract() * 6.0).max(0.0);
    let s = saturation.clamp(0.0, 1.0);
    let v = value.clamp(0.0, 1.0);
    let sector = h.floor();
    let f = h - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    let rgb = match sector as u32 {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    };
    Rgb::from_unit(rgb)
}

/// Resolved colours for one rendering/encoding pass.
#[derive(Debug, Clone)]
pub struct Palette {
    wheel: ColorWheel,
    secondary_structure: FxHashMap<char, Rgb>,
    default_color: Rgb,
    coil: Rgb,
    text: Rgb,
}

impl Palette {
    /// Build a palette from colour options.
    #[must_use]
    pub fn new(options: &ColorOptions) -> Self {
        let secondary_structure = options
            .secondary_structure
            .iter()
            .filter_map(|(code, rgb)| {
                code.trim().chars().next().map(|c| (c, Rgb::from_unit(*rgb)))
            })
            .collect();
        Self {
            wheel: ColorWheel::new(
                options.wheel_size,
                options.wheel_saturation,
                options.wheel_value,
            ),
            secondary_structure,
            default_color: Rgb::from_unit(options.default_color),
            coil: Rgb::from_unit(options.coil),
            text: Rgb::from_unit(options.text),
        }
    }

    /// Colour for an annotation value. Secondary-structure codes missing
    /// from the table fall back to the default colour.
    #[must_use]
    pub fn color_for(&self, value: &AnnotationValue) -> Rgb {
        match value {
            AnnotationValue::SecondaryStructure(ss) => self
                .secondary_structure
                .get(&ss.code())
                .copied()
                .unwrap_or(self.default_color),
            _ => self.wheel.color_for_label(value.label()),
        }
    }

    /// Fallback colour.
    #[must_use]
    pub fn default_color(&self) -> Rgb {
        self.default_color
    }

    /// Colour of the unstructured (coil) line between secondary-structure
    /// elements.
    #[must_use]
    pub fn coil(&self) -> Rgb {
        self.coil
    }

    /// Colour for sequence letters and labels.
    #[must_use]
    pub fn text(&self) -> Rgb {
        self.text
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(&ColorOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::SsType;

    #[test]
    fn from_unit_rounds_and_clamps() {
        assert_eq!(Rgb::from_unit([1.0, 0.0, 0.5]), Rgb::new(255, 0, 128));
        assert_eq!(Rgb::from_unit([2.0, -1.0, 0.0]), Rgb::new(255, 0, 0));
        assert_eq!(Rgb::new(255, 0, 16).to_hex(), "#ff0010");
    }

    #[test]
    fn stable_hash_is_repeatable() {
        assert_eq!(stable_hash("CATH 1.10.8.10"), stable_hash("CATH 1.10.8.10"));
        assert_ne!(stable_hash("a"), stable_hash("b"));
    }

    #[test]
    fn wheel_is_deterministic_and_bounded() {
        let wheel = ColorWheel::new(12, 0.7, 0.9);
        assert_eq!(wheel.len(), 12);
        let first = wheel.color_for_label("domain 1");
        for _ in 0..10 {
            assert_eq!(wheel.color_for_label("domain 1"), first);
        }
        assert_eq!(ColorWheel::new(0, 0.7, 0.9).len(), 1);
    }

    #[test]
    fn hsv_primary_hues() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), Rgb::new(255, 0, 0));
        assert_eq!(hsv_to_rgb(1.0 / 3.0, 1.0, 1.0), Rgb::new(0, 255, 0));
        assert_eq!(hsv_to_rgb(2.0 / 3.0, 1.0, 1.0), Rgb::new(0, 0, 255));
    }

    #[test]
    fn secondary_structure_uses_fixed_table() {
        let options = ColorOptions::default();
        let palette = Palette::new(&options);
        let helix = AnnotationValue::SecondaryStructure(SsType::Helix);
        let strand = AnnotationValue::SecondaryStructure(SsType::Strand);
        assert_eq!(
            palette.color_for(&helix),
            Rgb::from_unit(options.secondary_structure["H"])
        );
        assert_ne!(palette.color_for(&helix), palette.color_for(&strand));
    }

    #[test]
    fn missing_table_entry_falls_back_to_default() {
        let mut options = ColorOptions::default();
        let _ = options.secondary_structure.shift_remove("T");
        let palette = Palette::new(&options);
        let turn = AnnotationValue::SecondaryStructure(SsType::Turn);
        assert_eq!(palette.color_for(&turn), palette.default_color());
    }

    #[test]
    fn labelled_values_use_the_wheel() {
        let palette = Palette::default();
        let a = AnnotationValue::domain("d1a0ra_");
        let b = AnnotationValue::domain("d1a0ra_");
        assert_eq!(palette.color_for(&a), palette.color_for(&b));
    }
}
