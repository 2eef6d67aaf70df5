//! Modification facts (disulphides, cross-links, modified residues) and
//! ligand descriptors.
//!
//! Both are composite annotation values: immutable once created, compared
//! and hashed by content, with their display text computed up front.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Category tag of a modification.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ModificationCategory {
    /// Cys-Cys disulphide bond.
    Disulfide,
    /// Covalent cross-link between two or more residues.
    CrossLink,
    /// Chemically modified single residue.
    ModifiedResidue,
}

impl ModificationCategory {
    /// Glyph character used in text renderings.
    #[must_use]
    pub fn glyph(self) -> char {
        match self {
            Self::Disulfide => 'S',
            Self::CrossLink => 'X',
            Self::ModifiedResidue => '*',
        }
    }
}

impl fmt::Display for ModificationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disulfide => f.write_str("Disulfide bond"),
            Self::CrossLink => f.write_str("Cross-link"),
            Self::ModifiedResidue => f.write_str("Modified residue"),
        }
    }
}

/// A residue taking part in a modification, addressed by chain and SEQRES
/// number.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Participant {
    /// Chain identifier.
    pub chain_id: String,
    /// SEQRES number of the residue.
    pub seq_number: i32,
}

impl Participant {
    /// Participant in `chain_id` at SEQRES number `seq_number`.
    #[must_use]
    pub fn new(chain_id: &str, seq_number: i32) -> Self {
        Self {
            chain_id: chain_id.to_owned(),
            seq_number,
        }
    }
}

/// One modification instance. May span several chains.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Modification {
    id: u32,
    category: ModificationCategory,
    participants: Vec<Participant>,
    label: String,
    description: String,
}

impl Modification {
    /// Create a modification. Without a description the label is used.
    #[must_use]
    pub fn new(
        id: u32,
        category: ModificationCategory,
        description: Option<&str>,
        participants: Vec<Participant>,
    ) -> Self {
        let label = format!("{category} {id}");
        let description = description
            .filter(|d| !d.trim().is_empty())
            .map_or_else(|| label.clone(), str::to_owned);
        Self {
            id,
            category,
            participants,
            label,
            description,
        }
    }

    /// Instance identifier, unique within a structure.
    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Category tag.
    #[must_use]
    pub fn category(&self) -> ModificationCategory {
        self.category
    }

    /// All participating residues.
    #[must_use]
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Participants on one chain.
    pub fn participants_in<'a>(
        &'a self,
        chain_id: &'a str,
    ) -> impl Iterator<Item = &'a Participant> + 'a {
        self.participants
            .iter()
            .filter(move |p| p.chain_id == chain_id)
    }

    /// Short unique label (`"Disulfide bond 3"`).
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Glyph the cross-link drawers use for this modification.
    #[must_use]
    pub fn glyph_shape(&self) -> GlyphShape {
        GlyphShape::for_modification(self)
    }
}

/// Shape drawn for a modification fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphShape {
    /// Single-residue modification.
    Asterisk,
    /// One participant (point-like cross-link).
    Oval,
    /// Two participants (disulphide-style bond).
    Line,
    /// `n > 2` participants drawn as an n-sided polygon.
    Polygon(usize),
}

impl GlyphShape {
    /// Shape for a participant count.
    #[must_use]
    pub fn for_participants(count: usize) -> Self {
        match count {
            0 | 1 => Self::Oval,
            2 => Self::Line,
            n => Self::Polygon(n),
        }
    }

    /// Shape for a modification: modified residues always use the
    /// asterisk, everything else is chosen by participant count.
    #[must_use]
    pub fn for_modification(modification: &Modification) -> Self {
        match modification.category {
            ModificationCategory::ModifiedResidue => Self::Asterisk,
            _ => Self::for_participants(modification.participants.len()),
        }
    }
}

/// A ligand bound by a chain, deduplicated through [`LigandCache`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LigandDescriptor {
    structure_id: String,
    chain_id: String,
    monomer_id: String,
    description: String,
}

impl LigandDescriptor {
    fn new(structure_id: &str, chain_id: &str, monomer_id: &str) -> Self {
        Self {
            structure_id: structure_id.to_owned(),
            chain_id: chain_id.to_owned(),
            monomer_id: monomer_id.to_owned(),
            description: format!("Binding site for {monomer_id}"),
        }
    }

    /// Structure the ligand belongs to.
    #[must_use]
    pub fn structure_id(&self) -> &str {
        &self.structure_id
    }

    /// Chain the ligand is bound by.
    #[must_use]
    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    /// Chemical component id of the ligand; also its label.
    #[must_use]
    pub fn monomer_id(&self) -> &str {
        &self.monomer_id
    }

    /// Human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

type LigandKey = (String, String, String);

/// Process-wide get-or-create cache of ligand descriptors keyed by
/// structure, chain and monomer id. Shared through an `Arc`.
#[derive(Debug, Default)]
pub struct LigandCache {
    entries: Mutex<FxHashMap<LigandKey, Arc<LigandDescriptor>>>,
}

impl LigandCache {
    /// Empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached descriptor, creating it under the lock when
    /// missing.
    pub fn get_or_create(
        &self,
        structure_id: &str,
        chain_id: &str,
        monomer_id: &str,
    ) -> Arc<LigandDescriptor> {
        let mut entries =
            self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let key = (
            structure_id.to_owned(),
            chain_id.to_owned(),
            monomer_id.to_owned(),
        );
        Arc::clone(entries.entry(key).or_insert_with(|| {
            Arc::new(LigandDescriptor::new(structure_id, chain_id, monomer_id))
        }))
    }

    /// Number of cached descriptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
