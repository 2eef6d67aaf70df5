//! Construct hooks that turn provider facts into annotations.
//!
//! A source runs once per group build. Provider failures abort the build;
//! a single fact naming a residue the chain does not have is logged and
//! dropped.

use std::fmt;
use std::sync::Arc;

use super::group::AnnotationCollector;
use super::value::AnnotationValue;
use crate::chain::Chain;
use crate::error::AnnotError;
use crate::modification::{LigandCache, ModificationCategory};
use crate::provider::StructureProvider;

/// Construct hook of an annotation kind.
pub trait AnnotationSource: fmt::Debug + Send + Sync {
    /// Record every fact this source knows for `chain` into `out`.
    ///
    /// # Errors
    ///
    /// Any provider error; the group is then left empty.
    fn construct(
        &self,
        provider: &dyn StructureProvider,
        chain: &Chain,
        out: &mut AnnotationCollector<'_>,
    ) -> Result<(), AnnotError>;
}

/// Keep building past a fact for a missing residue.
fn drop_missing(
    result: Result<(), AnnotError>,
    what: &str,
) -> Result<(), AnnotError> {
    match result {
        Err(AnnotError::NotFound(residue)) => {
            log::warn!("{what}: skipping fact for missing {residue}");
            Ok(())
        }
        other => other,
    }
}

/// Secondary-structure elements assigned by one method (`"author"`,
/// `"DSSP"`, ...).
#[derive(Debug, Clone)]
pub struct SecondaryStructureSource {
    method: String,
}

impl SecondaryStructureSource {
    /// Source reading assignments made by `method`.
    #[must_use]
    pub fn new(method: &str) -> Self {
        Self {
            method: method.to_owned(),
        }
    }
}

impl AnnotationSource for SecondaryStructureSource {
    fn construct(
        &self,
        provider: &dyn StructureProvider,
        chain: &Chain,
        out: &mut AnnotationCollector<'_>,
    ) -> Result<(), AnnotError> {
        let elements = provider.secondary_structure(
            chain.structure_id(),
            chain.chain_id(),
            &self.method,
        )?;
        for element in elements {
            let value = AnnotationValue::SecondaryStructure(element.ss);
            drop_missing(
                out.add_seq_number_range(&value, element.start, element.end),
                &self.method,
            )?;
        }
        Ok(())
    }
}

/// Domain assignments of one classification (`"CATH"`, `"SCOP"`).
#[derive(Debug, Clone)]
pub struct DomainSource {
    method: String,
}

impl DomainSource {
    /// Source reading domains assigned by `method`.
    #[must_use]
    pub fn new(method: &str) -> Self {
        Self {
            method: method.to_owned(),
        }
    }
}

impl AnnotationSource for DomainSource {
    fn construct(
        &self,
        provider: &dyn StructureProvider,
        chain: &Chain,
        out: &mut AnnotationCollector<'_>,
    ) -> Result<(), AnnotError> {
        let domains = provider.domains(
            chain.structure_id(),
            chain.chain_id(),
            &self.method,
        )?;
        for domain in domains {
            let value = AnnotationValue::domain(&domain.domain_id);
            for span in &domain.segments {
                drop_missing(
                    out.add_seq_number_range(&value, span.start, span.end),
                    &self.method,
                )?;
            }
        }
        Ok(())
    }
}

/// Modifications of the given categories touching the chain.
///
/// Applied in ascending id order, so where two modifications share a
/// residue the higher id wins.
#[derive(Debug, Clone)]
pub struct ModificationSource {
    categories: Vec<ModificationCategory>,
}

impl ModificationSource {
    /// Source for modifications in `categories`.
    #[must_use]
    pub fn new(categories: &[ModificationCategory]) -> Self {
        Self {
            categories: categories.to_vec(),
        }
    }
}

impl AnnotationSource for ModificationSource {
    fn construct(
        &self,
        provider: &dyn StructureProvider,
        chain: &Chain,
        out: &mut AnnotationCollector<'_>,
    ) -> Result<(), AnnotError> {
        let mut modifications = provider.modifications(chain.structure_id())?;
        modifications.sort_by_key(|m| m.id());
        for modification in modifications
            .into_iter()
            .filter(|m| self.categories.contains(&m.category()))
        {
            let numbers: Vec<i32> = modification
                .participants_in(chain.chain_id())
                .map(|p| p.seq_number)
                .collect();
            if numbers.is_empty() {
                continue;
            }
            let value = AnnotationValue::Modification(Arc::new(modification));
            for seq_number in numbers {
                drop_missing(
                    out.add_at_seq_number(value.clone(), seq_number),
                    value.label(),
                )?;
            }
        }
        Ok(())
    }
}

/// Site records. Ligand binding sites share one descriptor per ligand
/// through the injected cache; other sites are labelled by their id.
#[derive(Debug, Clone)]
pub struct SiteSource {
    ligands: Arc<LigandCache>,
}

impl SiteSource {
    /// Source resolving ligands through `ligands`.
    #[must_use]
    pub fn new(ligands: Arc<LigandCache>) -> Self {
        Self { ligands }
    }
}

impl AnnotationSource for SiteSource {
    fn construct(
        &self,
        provider: &dyn StructureProvider,
        chain: &Chain,
        out: &mut AnnotationCollector<'_>,
    ) -> Result<(), AnnotError> {
        let sites = provider.sites(chain.structure_id(), chain.chain_id())?;
        for site in sites {
            let value = match site.ligand.as_deref() {
                Some(monomer) => AnnotationValue::Ligand(
                    self.ligands.get_or_create(
                        chain.structure_id(),
                        chain.chain_id(),
                        monomer,
                    ),
                ),
                None => AnnotationValue::custom(&site.site_id, None),
            };
            for seq_number in site.residues {
                drop_missing(
                    out.add_at_seq_number(value.clone(), seq_number),
                    &site.site_id,
                )?;
            }
        }
        Ok(())
    }
}
