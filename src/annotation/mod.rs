//! Annotation values, groups and the kinds that produce them.
//!
//! - [`AnnotationValue`] - what an annotation says about a residue
//! - [`AnnotationGroup`] - every annotation of one kind on one chain, with
//!   maximal ranges and per-value statistics
//! - [`AnnotationSource`] - construct hooks reading a
//!   [`StructureProvider`](crate::provider::StructureProvider)
//! - [`AnnotationRegistry`] - kinds in registration order
//! - [`AnnotatedChain`] - one chain with a group per kind

mod annotated;
mod group;
mod kind;
mod source;
mod value;

pub use annotated::AnnotatedChain;
pub use group::{
    Annotation, AnnotationCollector, AnnotationGroup, AnnotationRange,
};
pub use kind::{AnnotationKind, AnnotationRegistry, Classification};
pub use source::{
    AnnotationSource, DomainSource, ModificationSource,
    SecondaryStructureSource, SiteSource,
};
pub use value::{AnnotationValue, SsType};
