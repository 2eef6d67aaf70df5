//! Machine-readable range lists.
//!
//! One [`EncodedTrack`] per annotation kind maps a label to its colour and
//! the residue ranges carrying it, across every chain encoded:
//!
//! ```json
//! { "Cross-link 3": { "label": "Cross-link 3",
//!                     "colour": { "r": 12, "g": 200, "b": 90 },
//!                     "ranges": [ { "chainId": "A", "startRes": "74", "endRes": "74" },
//!                                 { "chainId": "B", "startRes": "4", "endRes": "4" } ] } }
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::annotation::{AnnotatedChain, AnnotationGroup, AnnotationValue};
use crate::color::{Palette, Rgb};
use crate::error::AnnotError;
use crate::residue::NumberingScheme;

/// Residue range in scheme identifiers (insertion codes included).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedRange {
    /// Chain identifier.
    #[serde(rename = "chainId")]
    pub chain_id: String,
    /// First residue identifier.
    #[serde(rename = "startRes")]
    pub start_res: String,
    /// Last residue identifier (inclusive).
    #[serde(rename = "endRes")]
    pub end_res: String,
}

/// One value of a track: label, colour and ranges in first-appearance
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedValue {
    /// Unique label within the track.
    pub label: String,
    /// Colour of the value.
    pub colour: Rgb,
    /// Ranges over all encoded chains.
    pub ranges: Vec<EncodedRange>,
}

/// Encoded output of one annotation kind, keyed by label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedTrack {
    entries: IndexMap<String, EncodedValue>,
}

impl EncodedTrack {
    /// Entry for `label`.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&EncodedValue> {
        self.entries.get(label)
    }

    /// Entries in first-appearance order.
    pub fn values(&self) -> impl Iterator<Item = &EncodedValue> {
        self.entries.values()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was encoded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// [`AnnotError::Json`] if serialization fails.
    pub fn to_json_string(&self) -> Result<String, AnnotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Merges annotation groups of one kind into an [`EncodedTrack`].
#[derive(Debug, Clone)]
pub struct RangeEncoder {
    palette: Palette,
    scheme: NumberingScheme,
}

impl RangeEncoder {
    /// Encoder writing identifiers in `scheme`.
    #[must_use]
    pub fn new(palette: Palette, scheme: NumberingScheme) -> Self {
        Self { palette, scheme }
    }

    /// Numbering scheme of the identifiers.
    #[must_use]
    pub fn scheme(&self) -> NumberingScheme {
        self.scheme
    }

    /// Encode the groups of kind `kind` on every chain in `chains`.
    #[must_use]
    pub fn encode_kind<'a>(
        &self,
        kind: &str,
        chains: impl IntoIterator<Item = &'a AnnotatedChain>,
    ) -> EncodedTrack {
        self.encode(
            chains
                .into_iter()
                .filter_map(|chain| chain.group(kind).map(|group| &**group)),
        )
    }

    /// Merge `groups` by value equality. Entries and ranges keep
    /// first-appearance order; unequal values sharing a label get a
    /// numeric suffix.
    #[must_use]
    pub fn encode<'a>(
        &self,
        groups: impl IntoIterator<Item = &'a AnnotationGroup>,
    ) -> EncodedTrack {
        let mut keys: IndexMap<AnnotationValue, String> = IndexMap::new();
        let mut track = EncodedTrack::default();
        for group in groups {
            let chain = group.chain();
            for range in group.ranges() {
                let Some(encoded) = self.encode_range(group, range.start, range.end)
                else {
                    log::debug!(
                        "{}: {} on chain {} has no residue in {}",
                        group.kind().name(),
                        range.value,
                        chain.chain_id(),
                        self.scheme
                    );
                    continue;
                };
                let key = keys
                    .entry(range.value.clone())
                    .or_insert_with(|| unique_label(&track, range.value.label()));
                track
                    .entries
                    .entry(key.clone())
                    .or_insert_with(|| EncodedValue {
                        label: key.clone(),
                        colour: self.palette.color_for(&range.value),
                        ranges: Vec::new(),
                    })
                    .ranges
                    .push(encoded);
            }
        }
        track
    }

    /// Scheme identifiers of the first and last residue of `start..=end`
    /// that exist in the scheme.
    fn encode_range(
        &self,
        group: &AnnotationGroup,
        start: usize,
        end: usize,
    ) -> Option<EncodedRange> {
        let chain = group.chain();
        let index = chain.index();
        let mut numbers =
            (start..=end).filter_map(|i| index.number(self.scheme, i));
        let first = numbers.next()?;
        let last = numbers.next_back().unwrap_or(first);
        Some(EncodedRange {
            chain_id: chain.chain_id().to_owned(),
            start_res: first.to_string(),
            end_res: last.to_string(),
        })
    }
}

fn unique_label(track: &EncodedTrack, base: &str) -> String {
    if !track.entries.contains_key(base) {
        return base.to_owned();
    }
    (2..)
        .map(|n| format!("{base} ({n})"))
        .find(|candidate| !track.entries.contains_key(candidate))
        .unwrap_or_else(|| base.to_owned())
}
