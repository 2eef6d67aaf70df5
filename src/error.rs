//! Crate-level error types.

use std::fmt;

use crate::residue::NumberingScheme;

/// Errors produced by the annotrack crate.
#[derive(Debug)]
pub enum AnnotError {
    /// Annotation construction failed; the affected group degrades to empty.
    Build {
        /// Annotation kind whose construct hook failed.
        kind: String,
        /// Provider-supplied reason.
        reason: String,
    },
    /// The requested numbering scheme has no residues for a chain.
    SchemeUnavailable {
        /// Chain identifier.
        chain_id: String,
        /// Scheme that was requested.
        scheme: NumberingScheme,
    },
    /// Unknown structure, chain or residue.
    NotFound(String),
    /// No drawer is registered for (or accepts) an annotation kind.
    DrawerResolution(String),
    /// Segment width must be at least one residue.
    InvalidWidth(usize),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// JSON (de)serialization failure.
    Json(serde_json::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for AnnotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Build { kind, reason } => {
                write!(f, "failed to build {kind} annotations: {reason}")
            }
            Self::SchemeUnavailable { chain_id, scheme } => {
                write!(
                    f,
                    "numbering scheme {scheme} has no residues in chain \
                     {chain_id}"
                )
            }
            Self::NotFound(what) => write!(f, "not found: {what}"),
            Self::DrawerResolution(kind) => {
                write!(f, "no drawer available for annotation kind {kind}")
            }
            Self::InvalidWidth(width) => {
                write!(f, "invalid segment width {width}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Json(e) => write!(f, "JSON error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for AnnotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AnnotError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for AnnotError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_unavailable_names_chain_and_scheme() {
        let err = AnnotError::SchemeUnavailable {
            chain_id: "B".to_owned(),
            scheme: NumberingScheme::Atom,
        };
        assert_eq!(
            err.to_string(),
            "numbering scheme ATOM has no residues in chain B"
        );
    }

    #[test]
    fn io_error_exposes_source() {
        let err = AnnotError::from(std::io::Error::other("disk"));
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("I/O error"));
    }
}
