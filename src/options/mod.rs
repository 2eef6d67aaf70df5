//! Layout and colour options with TOML preset support.
//!
//! Options serialize to/from TOML so a rendering setup can be saved as a
//! preset and passed to the `annotrack` binary.

mod colors;
mod layout;

use std::path::Path;

pub use colors::ColorOptions;
pub use layout::LayoutOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::AnnotError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[layout]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Track geometry and pagination.
    pub layout: LayoutOptions,
    /// Colour palette options.
    #[schemars(skip)]
    pub colors: ColorOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// [`AnnotError::Io`] when the file cannot be read,
    /// [`AnnotError::OptionsParse`] when it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, AnnotError> {
        let content = std::fs::read_to_string(path).map_err(AnnotError::Io)?;
        Self::from_toml(&content)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// [`AnnotError::OptionsParse`] for invalid TOML.
    pub fn from_toml(content: &str) -> Result<Self, AnnotError> {
        toml::from_str(content)
            .map_err(|e| AnnotError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// [`AnnotError::OptionsParse`] when serialization fails,
    /// [`AnnotError::Io`] when the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), AnnotError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| AnnotError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(AnnotError::Io)?;
        }
        std::fs::write(path, content).map_err(AnnotError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::residue::NumberingScheme;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[layout]
segment_width = 40
scheme = "SEQRES"

[colors.secondary_structure]
H = [1.0, 0.0, 0.0]
"#;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.layout.segment_width, 40);
        assert_eq!(opts.layout.scheme, NumberingScheme::Seqres);
        // Everything else should be default
        assert_eq!(opts.layout.char_width, 10.0);
        assert_eq!(opts.colors.wheel_size, 24);
        assert_eq!(opts.colors.secondary_structure.len(), 1);
    }

    #[test]
    fn invalid_toml_is_an_options_error() {
        assert!(matches!(
            Options::from_toml("[layout]\nsegment_width = \"wide\""),
            Err(AnnotError::OptionsParse(_))
        ));
    }

    #[test]
    fn save_load_and_list_presets() {
        let dir = std::env::temp_dir()
            .join(format!("annotrack-presets-{}", std::process::id()));
        let mut opts = Options::default();
        opts.layout.segment_width = 50;
        opts.save(&dir.join("wide.toml")).unwrap();
        Options::default().save(&dir.join("compact.toml")).unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let loaded = Options::load(&dir.join("wide.toml")).unwrap();
        assert_eq!(loaded, opts);
        assert_eq!(Options::list_presets(&dir), vec!["compact", "wide"]);
        assert!(matches!(
            Options::load(&dir.join("missing.toml")),
            Err(AnnotError::Io(_))
        ));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("layout"));
        // Skipped sections should be absent
        assert!(!props.contains_key("colors"));

        let layout = &props["layout"]["properties"];
        assert!(layout.get("segment_width").is_some());
        assert!(layout.get("scheme").is_some());
        assert!(layout.get("margin_top").is_none());
    }
}
