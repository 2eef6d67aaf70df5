//! One chain with a group per registered annotation kind.

use std::sync::Arc;

use indexmap::IndexMap;

use super::group::AnnotationGroup;
use super::kind::{AnnotationRegistry, Classification};
use crate::chain::Chain;
use crate::error::AnnotError;
use crate::provider::StructureProvider;

/// A chain and its annotation groups, keyed by kind name in registration
/// order. Groups build lazily on first access.
#[derive(Debug)]
pub struct AnnotatedChain {
    chain: Arc<Chain>,
    groups: IndexMap<String, Arc<AnnotationGroup>>,
}

impl AnnotatedChain {
    /// One unbuilt group per kind in `registry`.
    #[must_use]
    pub fn new(
        chain: Arc<Chain>,
        registry: &AnnotationRegistry,
        provider: &Arc<dyn StructureProvider>,
    ) -> Self {
        let groups = registry
            .kinds()
            .map(|kind| {
                let group = AnnotationGroup::new(
                    Arc::clone(kind),
                    Arc::clone(&chain),
                    Arc::clone(provider),
                );
                (kind.name().to_owned(), Arc::new(group))
            })
            .collect();
        Self { chain, groups }
    }

    /// Fetch the chain from `provider` and attach the registry's groups.
    ///
    /// # Errors
    ///
    /// [`AnnotError::NotFound`] when the provider does not know the chain.
    pub fn load(
        provider: &Arc<dyn StructureProvider>,
        registry: &AnnotationRegistry,
        structure_id: &str,
        chain_id: &str,
    ) -> Result<Self, AnnotError> {
        let chain = provider.chain(structure_id, chain_id)?;
        Ok(Self::new(chain, registry, provider))
    }

    /// Chain from pre-built groups. Groups belonging to another chain are
    /// dropped with a warning.
    #[must_use]
    pub fn from_groups(
        chain: Arc<Chain>,
        groups: impl IntoIterator<Item = AnnotationGroup>,
    ) -> Self {
        let groups = groups
            .into_iter()
            .filter(|group| {
                let same = Arc::ptr_eq(group.chain(), &chain);
                if !same {
                    log::warn!(
                        "{} group for chain {} ignored on chain {}",
                        group.kind().name(),
                        group.chain().chain_id(),
                        chain.chain_id()
                    );
                }
                same
            })
            .map(|group| (group.kind().name().to_owned(), Arc::new(group)))
            .collect();
        Self { chain, groups }
    }

    /// The chain.
    #[must_use]
    pub fn chain(&self) -> &Arc<Chain> {
        &self.chain
    }

    /// Group of the kind named `kind`.
    #[must_use]
    pub fn group(&self, kind: &str) -> Option<&Arc<AnnotationGroup>> {
        self.groups.get(kind)
    }

    /// Groups in registration order.
    pub fn groups(&self) -> impl Iterator<Item = &Arc<AnnotationGroup>> {
        self.groups.values()
    }

    /// First group under `classification`, in registration order, that
    /// has data after its build.
    #[must_use]
    pub fn first_group_with_data(
        &self,
        classification: Classification,
    ) -> Option<&Arc<AnnotationGroup>> {
        self.groups().find(|group| {
            group.kind().classification() == classification && group.has_data()
        })
    }
}
