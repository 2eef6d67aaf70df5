use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::modification::{LigandDescriptor, Modification};

/// DSSP-style secondary structure code.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
    Deserialize,
)]
pub enum SsType {
    /// Alpha helix (`H`).
    #[serde(rename = "H")]
    Helix,
    /// 3-10 helix (`G`).
    #[serde(rename = "G")]
    Helix310,
    /// Pi helix (`I`).
    #[serde(rename = "I")]
    HelixPi,
    /// Beta strand (`E`).
    #[serde(rename = "E")]
    Strand,
    /// Isolated beta bridge (`B`).
    #[serde(rename = "B")]
    Bridge,
    /// Hydrogen-bonded turn (`T`).
    #[serde(rename = "T")]
    Turn,
    /// Bend (`S`).
    #[serde(rename = "S")]
    Bend,
}

impl SsType {
    /// Single-character code.
    #[must_use]
    pub fn code(self) -> char {
        match self {
            Self::Helix => 'H',
            Self::Helix310 => 'G',
            Self::HelixPi => 'I',
            Self::Strand => 'E',
            Self::Bridge => 'B',
            Self::Turn => 'T',
            Self::Bend => 'S',
        }
    }

    /// Parse a single-character code. Coil/blank codes return `None`.
    #[must_use]
    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_uppercase() {
            'H' => Some(Self::Helix),
            'G' => Some(Self::Helix310),
            'I' => Some(Self::HelixPi),
            'E' => Some(Self::Strand),
            'B' => Some(Self::Bridge),
            'T' => Some(Self::Turn),
            'S' => Some(Self::Bend),
            _ => None,
        }
    }

    /// Human-readable name.
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            Self::Helix => "Alpha helix",
            Self::Helix310 => "3-10 helix",
            Self::HelixPi => "Pi helix",
            Self::Strand => "Beta strand",
            Self::Bridge => "Beta bridge",
            Self::Turn => "Turn",
            Self::Bend => "Bend",
        }
    }

    /// Whether this is one of the helix codes.
    #[must_use]
    pub fn is_helix(self) -> bool {
        matches!(self, Self::Helix | Self::Helix310 | Self::HelixPi)
    }

    /// Whether this is one of the extended (strand/bridge) codes.
    #[must_use]
    pub fn is_strand(self) -> bool {
        matches!(self, Self::Strand | Self::Bridge)
    }
}

/// The value an annotation assigns to a residue.
///
/// Equality and hashing are by content, so two values built separately
/// from the same facts merge into one range.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnnotationValue {
    /// Secondary structure element type.
    SecondaryStructure(SsType),
    /// Domain assignment identified by its label.
    Domain(Arc<str>),
    /// Modification instance.
    Modification(Arc<Modification>),
    /// Bound ligand (site records).
    Ligand(Arc<LigandDescriptor>),
    /// User-supplied value.
    Custom {
        /// Display label, also the identity of the value.
        label: Arc<str>,
        /// Optional glyph character.
        glyph: Option<char>,
    },
}

impl AnnotationValue {
    /// Domain value.
    #[must_use]
    pub fn domain(label: &str) -> Self {
        Self::Domain(Arc::from(label))
    }

    /// User-supplied value.
    #[must_use]
    pub fn custom(label: &str, glyph: Option<char>) -> Self {
        Self::Custom {
            label: Arc::from(label),
            glyph,
        }
    }

    /// Human-readable description.
    #[must_use]
    pub fn describe(&self) -> &str {
        match self {
            Self::SecondaryStructure(ss) => ss.describe(),
            Self::Domain(label) | Self::Custom { label, .. } => label.as_ref(),
            Self::Modification(m) => m.description(),
            Self::Ligand(l) => l.description(),
        }
    }

    /// Short label used as the key of encoded output and for colour hashing.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::SecondaryStructure(ss) => ss.describe(),
            Self::Domain(label) | Self::Custom { label, .. } => label.as_ref(),
            Self::Modification(m) => m.label(),
            Self::Ligand(l) => l.monomer_id(),
        }
    }

    /// Single-character glyph, if the value has one.
    #[must_use]
    pub fn glyph(&self) -> Option<char> {
        match self {
            Self::SecondaryStructure(ss) => Some(ss.code()),
            Self::Modification(m) => Some(m.category().glyph()),
            Self::Custom { glyph, .. } => *glyph,
            Self::Domain(_) | Self::Ligand(_) => None,
        }
    }

    /// The modification behind this value, if any.
    #[must_use]
    pub fn modification(&self) -> Option<&Arc<Modification>> {
        match self {
            Self::Modification(m) => Some(m),
            _ => None,
        }
    }
}

impl fmt::Display for AnnotationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modification::{ModificationCategory, Participant};

    #[test]
    fn ss_codes_round_trip() {
        for code in ['H', 'G', 'I', 'E', 'B', 'T', 'S'] {
            let ss = SsType::from_code(code).unwrap();
            assert_eq!(ss.code(), code);
        }
        assert_eq!(SsType::from_code('-'), None);
        assert_eq!(SsType::from_code('h'), Some(SsType::Helix));
    }

    #[test]
    fn values_compare_by_content() {
        assert_eq!(
            AnnotationValue::domain("1.10.8.10"),
            AnnotationValue::domain("1.10.8.10")
        );
        let a = Modification::new(
            1,
            ModificationCategory::Disulfide,
            None,
            vec![Participant::new("A", 3), Participant::new("A", 9)],
        );
        let b = a.clone();
        assert_eq!(
            AnnotationValue::Modification(Arc::new(a)),
            AnnotationValue::Modification(Arc::new(b))
        );
        assert_ne!(
            AnnotationValue::custom("x", None),
            AnnotationValue::custom("x", Some('x'))
        );
    }

    #[test]
    fn describe_label_and_glyph() {
        let helix = AnnotationValue::SecondaryStructure(SsType::Helix);
        assert_eq!(helix.describe(), "Alpha helix");
        assert_eq!(helix.glyph(), Some('H'));
        let domain = AnnotationValue::domain("d1abca1");
        assert_eq!(domain.label(), "d1abca1");
        assert_eq!(domain.glyph(), None);
        assert_eq!(domain.to_string(), "d1abca1");
        let custom = AnnotationValue::custom("motif", Some('m'));
        assert_eq!(custom.glyph(), Some('m'));
    }
}
