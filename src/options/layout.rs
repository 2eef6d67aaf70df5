use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::residue::NumberingScheme;

/// Track geometry and pagination, in pixels unless noted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Layout", inline)]
#[serde(default)]
pub struct LayoutOptions {
    /// Residues per display line.
    #[schemars(title = "Line Width", range(min = 10, max = 200))]
    pub segment_width: usize,
    /// Horizontal advance of one residue column.
    #[schemars(title = "Column Width", range(min = 4.0, max = 32.0), extend("step" = 0.5))]
    pub char_width: f32,
    /// Height of the sequence row.
    #[schemars(title = "Sequence Row", range(min = 8.0, max = 48.0), extend("step" = 0.5))]
    pub line_height: f32,
    /// Height of one annotation track.
    #[schemars(title = "Track Height", range(min = 4.0, max = 48.0), extend("step" = 0.5))]
    pub track_height: f32,
    /// Vertical gap between tracks.
    #[schemars(title = "Track Gap", range(min = 0.0, max = 16.0), extend("step" = 0.5))]
    pub track_gap: f32,
    /// Vertical gap after each segment block.
    #[schemars(title = "Segment Gap", range(min = 0.0, max = 64.0), extend("step" = 1.0))]
    pub segment_gap: f32,
    /// Space left of the first column; holds residue ids and track labels.
    #[schemars(title = "Left Margin", range(min = 0.0, max = 400.0), extend("step" = 1.0))]
    pub margin_left: f32,
    /// Space above the first segment.
    #[schemars(skip)]
    pub margin_top: f32,
    /// Space right of the last column.
    #[schemars(skip)]
    pub margin_right: f32,
    /// Font size for sequence letters and labels.
    #[schemars(title = "Font Size", range(min = 6.0, max = 32.0), extend("step" = 0.5))]
    pub font_size: f32,
    /// Preferred numbering scheme; SEQRES is used when the chain has no
    /// residue in it.
    pub scheme: NumberingScheme,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            segment_width: 60,
            char_width: 10.0,
            line_height: 16.0,
            track_height: 12.0,
            track_gap: 3.0,
            segment_gap: 18.0,
            margin_left: 120.0,
            margin_top: 10.0,
            margin_right: 10.0,
            font_size: 12.0,
            scheme: NumberingScheme::Atom,
        }
    }
}
