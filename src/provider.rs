//! Structure provider interface and a JSON document implementation.
//!
//! The provider is the only source of structural facts: chains, residues,
//! secondary-structure and domain assignments, site records and
//! modifications. Annotation sources turn those facts into annotations.

use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::annotation::SsType;
use crate::chain::Chain;
use crate::error::AnnotError;
use crate::modification::{Modification, ModificationCategory, Participant};
use crate::residue::{NumberingScheme, Residue, ResidueNumber};

/// A secondary-structure element spanning SEQRES numbers `start..=end`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondaryStructureElement {
    /// Element type.
    pub ss: SsType,
    /// First SEQRES number.
    pub start: i32,
    /// Last SEQRES number (inclusive).
    pub end: i32,
}

/// Inclusive SEQRES span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeqSpan {
    /// First SEQRES number.
    pub start: i32,
    /// Last SEQRES number (inclusive).
    pub end: i32,
}

/// A domain assigned by one classification method; may be discontinuous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainAssignment {
    /// Domain identifier, used as the annotation label.
    pub domain_id: String,
    /// Segments the domain covers.
    pub segments: Vec<SeqSpan>,
}

/// A site record: residues lining a site, optionally a ligand binding
/// site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteRecord {
    /// Site identifier.
    pub site_id: String,
    /// Chemical component id of the bound ligand.
    #[serde(default)]
    pub ligand: Option<String>,
    /// SEQRES numbers of the lining residues.
    pub residues: Vec<i32>,
}

/// Source of structural facts.
pub trait StructureProvider: Send + Sync {
    /// Chain `chain_id` of structure `structure_id`.
    ///
    /// # Errors
    ///
    /// [`AnnotError::NotFound`] when the structure or chain is unknown.
    fn chain(
        &self,
        structure_id: &str,
        chain_id: &str,
    ) -> Result<Arc<Chain>, AnnotError>;

    /// Residue of `chain` whose identifier in `scheme` is `id`.
    fn residue<'c>(
        &self,
        chain: &'c Chain,
        scheme: NumberingScheme,
        id: &str,
    ) -> Option<&'c Residue> {
        chain.residue_by_id(scheme, id)
    }

    /// Modifications identified in a structure.
    ///
    /// # Errors
    ///
    /// [`AnnotError::NotFound`] for an unknown structure, or a provider
    /// specific error when identification fails.
    fn modifications(
        &self,
        structure_id: &str,
    ) -> Result<Vec<Modification>, AnnotError>;

    /// Secondary-structure elements assigned by `method`.
    ///
    /// # Errors
    ///
    /// Provider specific; the default has no assignments.
    fn secondary_structure(
        &self,
        _structure_id: &str,
        _chain_id: &str,
        _method: &str,
    ) -> Result<Vec<SecondaryStructureElement>, AnnotError> {
        Ok(Vec::new())
    }

    /// Domains assigned by `method`.
    ///
    /// # Errors
    ///
    /// Provider specific; the default has no assignments.
    fn domains(
        &self,
        _structure_id: &str,
        _chain_id: &str,
        _method: &str,
    ) -> Result<Vec<DomainAssignment>, AnnotError> {
        Ok(Vec::new())
    }

    /// Site records of a chain.
    ///
    /// # Errors
    ///
    /// Provider specific; the default has no sites.
    fn sites(
        &self,
        _structure_id: &str,
        _chain_id: &str,
    ) -> Result<Vec<SiteRecord>, AnnotError> {
        Ok(Vec::new())
    }
}

// ---------------------------------------------------------------------------
// JSON document
// ---------------------------------------------------------------------------

/// Serialized form of one or more structures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructureDocument {
    /// Structures in the document.
    pub structures: Vec<StructureRecord>,
}

/// One structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureRecord {
    /// Structure identifier (e.g. a PDB id).
    pub id: String,
    /// Polymer chains.
    #[serde(default)]
    pub chains: Vec<ChainRecord>,
    /// Modifications; may span chains.
    #[serde(default)]
    pub modifications: Vec<ModificationRecord>,
}

/// One chain with its per-method assignments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainRecord {
    /// Chain identifier.
    pub id: String,
    /// Residues in sequence order.
    pub residues: Vec<ResidueRecord>,
    /// Secondary structure keyed by assignment method.
    #[serde(default)]
    pub secondary_structure: IndexMap<String, Vec<SecondaryStructureElement>>,
    /// Domains keyed by classification method.
    #[serde(default)]
    pub domains: IndexMap<String, Vec<DomainAssignment>>,
    /// Site records.
    #[serde(default)]
    pub sites: Vec<SiteRecord>,
}

/// One residue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidueRecord {
    /// SEQRES number.
    pub seq: i32,
    /// Chemical component id.
    pub monomer: String,
    /// Observed identifier with optional insertion code (`"52A"`); absent
    /// for unmodelled residues.
    #[serde(default)]
    pub auth: Option<String>,
    /// One-letter code override for non-standard components.
    #[serde(default)]
    pub code: Option<char>,
}

/// One modification instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModificationRecord {
    /// Instance identifier.
    pub id: u32,
    /// Category tag.
    pub category: ModificationCategory,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Participating residues.
    pub residues: Vec<Participant>,
}

impl StructureDocument {
    /// Parse a document from JSON text.
    ///
    /// # Errors
    ///
    /// [`AnnotError::Json`] on malformed input.
    pub fn from_json(json: &str) -> Result<Self, AnnotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a document from a JSON file.
    ///
    /// # Errors
    ///
    /// [`AnnotError::Io`] or [`AnnotError::Json`].
    pub fn load(path: &Path) -> Result<Self, AnnotError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    fn structure(&self, structure_id: &str) -> Result<&StructureRecord, AnnotError> {
        self.structures
            .iter()
            .find(|s| s.id == structure_id)
            .ok_or_else(|| {
                AnnotError::NotFound(format!("structure {structure_id}"))
            })
    }

    fn chain_record(
        &self,
        structure_id: &str,
        chain_id: &str,
    ) -> Result<&ChainRecord, AnnotError> {
        self.structure(structure_id)?
            .chains
            .iter()
            .find(|c| c.id == chain_id)
            .ok_or_else(|| {
                AnnotError::NotFound(format!(
                    "chain {chain_id} of structure {structure_id}"
                ))
            })
    }
}

impl ChainRecord {
    fn to_chain(&self, structure_id: &str) -> Chain {
        let residues = self
            .residues
            .iter()
            .map(|record| {
                let mut residue = Residue::new(record.seq, &record.monomer);
                if let Some(code) = record.code {
                    residue = residue.with_one_letter(code);
                }
                match record.auth.as_deref().map(str::parse::<ResidueNumber>) {
                    Some(Ok(number)) => residue.observed_as(number),
                    Some(Err(e)) => {
                        log::warn!(
                            "{structure_id}:{} residue {}: {e}; treating as \
                             unobserved",
                            self.id,
                            record.seq
                        );
                        residue
                    }
                    None => residue,
                }
            })
            .collect();
        Chain::new(structure_id, &self.id, residues)
    }
}

/// [`StructureProvider`] backed by a [`StructureDocument`]. Chains are built
/// once at construction.
#[derive(Debug)]
pub struct DocumentProvider {
    document: StructureDocument,
    chains: FxHashMap<(String, String), Arc<Chain>>,
}

impl DocumentProvider {
    /// Wrap a parsed document.
    #[must_use]
    pub fn new(document: StructureDocument) -> Self {
        let mut chains = FxHashMap::default();
        for structure in &document.structures {
            for record in &structure.chains {
                let _ = chains.insert(
                    (structure.id.clone(), record.id.clone()),
                    Arc::new(record.to_chain(&structure.id)),
                );
            }
        }
        Self { document, chains }
    }

    /// Parse JSON text into a provider.
    ///
    /// # Errors
    ///
    /// [`AnnotError::Json`] on malformed input.
    pub fn from_json(json: &str) -> Result<Self, AnnotError> {
        StructureDocument::from_json(json).map(Self::new)
    }

    /// Load a JSON file into a provider.
    ///
    /// # Errors
    ///
    /// [`AnnotError::Io`] or [`AnnotError::Json`].
    pub fn load(path: &Path) -> Result<Self, AnnotError> {
        StructureDocument::load(path).map(Self::new)
    }

    /// The underlying document.
    #[must_use]
    pub fn document(&self) -> &StructureDocument {
        &self.document
    }
}

impl StructureProvider for DocumentProvider {
    fn chain(
        &self,
        structure_id: &str,
        chain_id: &str,
    ) -> Result<Arc<Chain>, AnnotError> {
        self.chains
            .get(&(structure_id.to_owned(), chain_id.to_owned()))
            .cloned()
            .ok_or_else(|| {
                AnnotError::NotFound(format!(
                    "chain {chain_id} of structure {structure_id}"
                ))
            })
    }

    fn modifications(
        &self,
        structure_id: &str,
    ) -> Result<Vec<Modification>, AnnotError> {
        Ok(self
            .document
            .structure(structure_id)?
            .modifications
            .iter()
            .map(|m| {
                Modification::new(
                    m.id,
                    m.category,
                    m.description.as_deref(),
                    m.residues.clone(),
                )
            })
            .collect())
    }

    fn secondary_structure(
        &self,
        structure_id: &str,
        chain_id: &str,
        method: &str,
    ) -> Result<Vec<SecondaryStructureElement>, AnnotError> {
        Ok(self
            .document
            .chain_record(structure_id, chain_id)?
            .secondary_structure
            .get(method)
            .cloned()
            .unwrap_or_default())
    }

    fn domains(
        &self,
        structure_id: &str,
        chain_id: &str,
        method: &str,
    ) -> Result<Vec<DomainAssignment>, AnnotError> {
        Ok(self
            .document
            .chain_record(structure_id, chain_id)?
            .domains
            .get(method)
            .cloned()
            .unwrap_or_default())
    }

    fn sites(
        &self,
        structure_id: &str,
        chain_id: &str,
    ) -> Result<Vec<SiteRecord>, AnnotError> {
        Ok(self
            .document
            .chain_record(structure_id, chain_id)?
            .sites
            .clone())
    }
}
