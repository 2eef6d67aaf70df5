use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Colour options for tracks and encoded output. Channels are 0-1 floats.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColorOptions {
    /// Number of hues on the colour wheel used for labelled values.
    pub wheel_size: usize,
    /// HSV saturation of the wheel.
    pub wheel_saturation: f32,
    /// HSV value of the wheel.
    pub wheel_value: f32,
    /// Fallback when a value has no colour.
    pub default_color: [f32; 3],
    /// Coil line between secondary-structure elements.
    pub coil: [f32; 3],
    /// Sequence letters, residue ids and labels.
    pub text: [f32; 3],
    /// Secondary-structure colours keyed by one-letter code.
    pub secondary_structure: IndexMap<String, [f32; 3]>,
}

impl Default for ColorOptions {
    fn default() -> Self {
        let mut secondary_structure = IndexMap::new();
        let _ = secondary_structure.insert("H".to_owned(), [0.94, 0.0, 0.5]);
        let _ = secondary_structure.insert("G".to_owned(), [0.63, 0.0, 0.5]);
        let _ = secondary_structure.insert("I".to_owned(), [0.38, 0.0, 0.5]);
        let _ = secondary_structure.insert("E".to_owned(), [1.0, 0.78, 0.0]);
        let _ = secondary_structure.insert("B".to_owned(), [0.7, 0.55, 0.0]);
        let _ = secondary_structure.insert("T".to_owned(), [0.38, 0.5, 0.88]);
        let _ = secondary_structure.insert("S".to_owned(), [0.5, 0.5, 0.5]);

        Self {
            wheel_size: 24,
            wheel_saturation: 0.65,
            wheel_value: 0.85,
            default_color: [0.6, 0.6, 0.6],
            coil: [0.35, 0.35, 0.35],
            text: [0.1, 0.1, 0.1],
            secondary_structure,
        }
    }
}
