// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Residue annotation tracks for macromolecular chains.
//!
//! Annotrack collects per-residue facts (secondary structure, domain
//! assignments, modifications, binding sites) into run-length ranges,
//! lays them out as parallel tracks over a chain sequence split into
//! fixed-width segments, and exports each kind as a machine-readable
//! range list.
//!
//! # Key entry points
//!
//! - [`annotation::AnnotatedChain`] - a chain with one lazily built group
//!   per registered annotation kind
//! - [`segment::SegmentedSequence`] - the chain cut into display segments
//!   under a numbering scheme
//! - [`layout::LayoutEngine`] - track placement and drawing onto a
//!   [`layout::Canvas`]
//! - [`encode::RangeEncoder`] - JSON range lists per kind
//! - [`options::Options`] - layout and colour configuration
//!
//! # Pipeline
//!
//! A [`provider::StructureProvider`] supplies chains and raw facts. Each
//! [`annotation::AnnotationKind`] owns an [`annotation::AnnotationSource`]
//! that turns those facts into residue annotations the first time its
//! group is read; groups are immutable afterwards and safe to share
//! across threads.

pub mod annotation;
pub mod chain;
pub mod color;
pub mod encode;
pub mod error;
pub mod layout;
pub mod modification;
pub mod options;
pub mod provider;
pub mod residue;
pub mod segment;

pub use error::AnnotError;
