//! # Error Hierarchy
//!
//! Structured error types for the drift toolkit, built with `thiserror`.
//! No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Source errors never abort a comparison run: a failure to load or parse
//! one representation is recorded once and that representation contributes
//! an empty inventory. [`SourceError::MappingGap`] is a warning, not a
//! failure; it marks XSD fields that could not be placed in a section.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::representation::RepresentationId;

/// Violations of the canonical path grammar.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// A segment name was empty (`a..b`, trailing `.`).
    #[error("empty path segment")]
    EmptySegment,

    /// A segment name contained a separator or bracket.
    #[error("segment name {name:?} contains reserved character {character:?}")]
    ReservedCharacter {
        /// The offending name.
        name: String,
        /// The first reserved character found.
        character: char,
    },

    /// A list marker with no segment before it.
    #[error("list marker does not follow a field in {path:?}")]
    DanglingMarker {
        /// The rejected input.
        path: String,
    },

    /// Two list markers in a row.
    #[error("consecutive list markers in {path:?}")]
    RepeatedMarker {
        /// The rejected input.
        path: String,
    },
}

/// Problems attributable to one representation's source document.
///
/// Serialized internally tagged: `{"kind": "parse_error", ...}`.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceError {
    /// The representation's file does not exist.
    #[error("{representation}: file not found: {}", path.display())]
    FileNotFound {
        /// Which representation was being loaded.
        representation: RepresentationId,
        /// Resolved path that was tried.
        path: PathBuf,
    },

    /// Malformed JSON or XML.
    #[error("{representation}: parse error in {}: {reason}", path.display())]
    ParseError {
        /// Which representation was being parsed.
        representation: RepresentationId,
        /// The file that failed to parse.
        path: PathBuf,
        /// Parser diagnostic.
        reason: String,
    },

    /// The file exists but could not be read.
    #[error("{representation}: cannot read {}: {reason}", path.display())]
    Io {
        /// Which representation was being loaded.
        representation: RepresentationId,
        /// The file that could not be read.
        path: PathBuf,
        /// Underlying I/O diagnostic.
        reason: String,
    },

    /// A named XSD complex type has no section prefix; its elements were
    /// left out of the canonical path set.
    #[error("xsd: complex type {type_name} has no section mapping; {skipped_elements} element(s) skipped")]
    MappingGap {
        /// The unmapped complex type.
        type_name: String,
        /// Named child elements that were not emitted.
        skipped_elements: usize,
    },
}

impl SourceError {
    /// The representation this issue belongs to.
    pub fn representation(&self) -> RepresentationId {
        match self {
            Self::FileNotFound { representation, .. }
            | Self::ParseError { representation, .. }
            | Self::Io { representation, .. } => *representation,
            Self::MappingGap { .. } => RepresentationId::Xsd,
        }
    }

    /// Warnings reduce coverage but leave the representation usable.
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::MappingGap { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_gap_is_a_warning_attributed_to_xsd() {
        let gap = SourceError::MappingGap {
            type_name: "HobbyType".into(),
            skipped_elements: 3,
        };
        assert!(gap.is_warning());
        assert_eq!(gap.representation(), RepresentationId::Xsd);
        assert!(gap.to_string().contains("HobbyType"));
    }

    #[test]
    fn load_failures_are_not_warnings() {
        let err = SourceError::FileNotFound {
            representation: RepresentationId::JsonLdContext,
            path: PathBuf::from("/tmp/context.jsonld"),
        };
        assert!(!err.is_warning());
        assert_eq!(err.representation(), RepresentationId::JsonLdContext);
        assert_eq!(
            err.to_string(),
            "json_ld_context: file not found: /tmp/context.jsonld"
        );
    }

    #[test]
    fn serializes_with_kind_tag() {
        let err = SourceError::ParseError {
            representation: RepresentationId::JsonLdContext,
            path: PathBuf::from("/tmp/context.jsonld"),
            reason: "EOF while parsing".into(),
        };
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "parse_error");
        assert_eq!(json["representation"], "json_ld_context");
        assert_eq!(json["path"], "/tmp/context.jsonld");
        assert_eq!(json["reason"], "EOF while parsing");

        let gap = SourceError::MappingGap {
            type_name: "ResumeType".into(),
            skipped_elements: 4,
        };
        let json = serde_json::to_value(&gap).unwrap();
        assert_eq!(json["kind"], "mapping_gap");
        assert_eq!(json["skipped_elements"], 4);
    }
}
