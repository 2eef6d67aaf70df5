//! Annotation kinds and the registry that orders them.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use super::source::{
    AnnotationSource, DomainSource, ModificationSource,
    SecondaryStructureSource, SiteSource,
};
use crate::layout::DrawerKind;
use crate::modification::{LigandCache, ModificationCategory};

/// Broad class of an annotation kind, used to pick fallbacks (e.g. the
/// first secondary-structure kind with data).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Secondary structure assignments.
    SecondaryStructure,
    /// Domain classifications.
    Domain,
    /// Modifications, sites and user features.
    StructuralFeature,
}

/// A kind of annotation: its name, class, how it is drawn and how its
/// facts are constructed.
#[derive(Clone)]
pub struct AnnotationKind {
    name: String,
    classification: Classification,
    drawer: Option<DrawerKind>,
    source: Option<Arc<dyn AnnotationSource>>,
}

impl fmt::Debug for AnnotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnnotationKind")
            .field("name", &self.name)
            .field("classification", &self.classification)
            .field("drawer", &self.drawer)
            .field("source", &self.source)
            .finish()
    }
}

impl AnnotationKind {
    /// Kind without a construct hook; its groups are filled explicitly.
    #[must_use]
    pub fn new(
        name: &str,
        classification: Classification,
        drawer: Option<DrawerKind>,
    ) -> Self {
        Self {
            name: name.to_owned(),
            classification,
            drawer,
            source: None,
        }
    }

    /// Attach the construct hook.
    #[must_use]
    pub fn with_source(mut self, source: Arc<dyn AnnotationSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Display name, also the registry key.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Classification.
    #[must_use]
    pub fn classification(&self) -> Classification {
        self.classification
    }

    /// Drawer declared for this kind, if it is drawable.
    #[must_use]
    pub fn drawer(&self) -> Option<DrawerKind> {
        self.drawer
    }

    /// Construct hook.
    #[must_use]
    pub fn source(&self) -> Option<&Arc<dyn AnnotationSource>> {
        self.source.as_ref()
    }
}

/// Registered annotation kinds in registration order.
#[derive(Debug, Clone, Default)]
pub struct AnnotationRegistry {
    kinds: IndexMap<String, Arc<AnnotationKind>>,
}

impl AnnotationRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in kinds: author and DSSP secondary structure, SCOP and CATH
    /// domains, disulphide bonds, cross-links, modified residues and
    /// sites.
    #[must_use]
    pub fn with_defaults(ligands: Arc<LigandCache>) -> Self {
        let mut registry = Self::new();
        for (name, method) in [("Author", "author"), ("DSSP", "DSSP")] {
            let _ = registry.register(
                AnnotationKind::new(
                    name,
                    Classification::SecondaryStructure,
                    Some(DrawerKind::SecondaryStructure),
                )
                .with_source(Arc::new(SecondaryStructureSource::new(method))),
            );
        }
        for method in ["SCOP", "CATH"] {
            let _ = registry.register(
                AnnotationKind::new(
                    method,
                    Classification::Domain,
                    Some(DrawerKind::LabeledBox),
                )
                .with_source(Arc::new(DomainSource::new(method))),
            );
        }
        let modifications = [
            (ModificationCategory::Disulfide, DrawerKind::CrossLink),
            (ModificationCategory::CrossLink, DrawerKind::CrossLink),
            (
                ModificationCategory::ModifiedResidue,
                DrawerKind::ModificationPoint,
            ),
        ];
        for (category, drawer) in modifications {
            let _ = registry.register(
                AnnotationKind::new(
                    &category.to_string(),
                    Classification::StructuralFeature,
                    Some(drawer),
                )
                .with_source(Arc::new(ModificationSource::new(&[category]))),
            );
        }
        let _ = registry.register(
            AnnotationKind::new(
                "Site",
                Classification::StructuralFeature,
                Some(DrawerKind::LabeledBox),
            )
            .with_source(Arc::new(SiteSource::new(ligands))),
        );
        registry
    }

    /// Register a kind; a kind with the same name is replaced in place.
    pub fn register(&mut self, kind: AnnotationKind) -> Arc<AnnotationKind> {
        let kind = Arc::new(kind);
        if self
            .kinds
            .insert(kind.name().to_owned(), Arc::clone(&kind))
            .is_some()
        {
            log::debug!("annotation kind {} re-registered", kind.name());
        }
        kind
    }

    /// Kind by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<AnnotationKind>> {
        self.kinds.get(name)
    }

    /// Kinds in registration order.
    pub fn kinds(&self) -> impl Iterator<Item = &Arc<AnnotationKind>> {
        self.kinds.values()
    }

    /// Number of registered kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Whether no kind is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}
