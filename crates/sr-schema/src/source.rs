//! # Source Loading
//!
//! Resolves the four representation files under a base directory and
//! loads each one independently. A representation that cannot be read or
//! parsed is recorded as a [`SourceError`] and left empty; it never stops
//! the other three from loading.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;
use sr_core::{RepresentationId, SourceError};

use crate::xsd::XsdDocument;

/// Fixed file locations of the four representations under one base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLayout {
    base_dir: PathBuf,
}

impl SourceLayout {
    /// Layout rooted at `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// The base directory.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolved file path of one representation.
    pub fn path(&self, representation: RepresentationId) -> PathBuf {
        self.base_dir.join(representation.relative_path())
    }
}

/// Parsed documents of one run, plus the failures that left any of them empty.
#[derive(Debug, Clone, Default)]
pub struct LoadedSources {
    /// Parsed `schema.json`.
    pub json_schema: Option<Value>,
    /// Parsed `context.jsonld`.
    pub context: Option<Value>,
    /// Parsed `meta-schema.json`.
    pub meta_schema: Option<Value>,
    /// Parsed XSD.
    pub xsd: Option<XsdDocument>,
    /// One entry per representation that failed to load.
    pub issues: Vec<SourceError>,
}

impl LoadedSources {
    /// Load every representation under `layout`.
    pub fn load(layout: &SourceLayout) -> Self {
        let mut sources = Self::default();
        sources.json_schema = sources.keep(read_json(layout, RepresentationId::JsonSchema));
        sources.context = sources.keep(read_json(layout, RepresentationId::JsonLdContext));
        sources.meta_schema = sources.keep(read_json(layout, RepresentationId::MetaSchema));
        sources.xsd = sources.keep(read_xsd(layout));
        sources
    }

    fn keep<T>(&mut self, loaded: Result<T, SourceError>) -> Option<T> {
        match loaded {
            Ok(document) => Some(document),
            Err(e) => {
                tracing::warn!(representation = %e.representation(), error = %e, "representation not loaded");
                self.issues.push(e);
                None
            }
        }
    }
}

/// Read one representation's file as UTF-8 text.
///
/// # Errors
///
/// [`SourceError::FileNotFound`] when the file does not exist,
/// [`SourceError::Io`] for any other read failure.
pub fn read_text(layout: &SourceLayout, representation: RepresentationId) -> Result<String, SourceError> {
    let path = layout.path(representation);
    std::fs::read_to_string(&path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => SourceError::FileNotFound {
            representation,
            path: path.clone(),
        },
        _ => SourceError::Io {
            representation,
            path: path.clone(),
            reason: e.to_string(),
        },
    })
}

/// Read and parse one JSON representation.
///
/// # Errors
///
/// As [`read_text`], plus [`SourceError::ParseError`] for malformed JSON.
pub fn read_json(layout: &SourceLayout, representation: RepresentationId) -> Result<Value, SourceError> {
    let text = read_text(layout, representation)?;
    serde_json::from_str(&text).map_err(|e| SourceError::ParseError {
        representation,
        path: layout.path(representation),
        reason: e.to_string(),
    })
}

/// Read and parse the XSD.
///
/// # Errors
///
/// As [`read_text`], plus [`SourceError::ParseError`] for malformed XML.
pub fn read_xsd(layout: &SourceLayout) -> Result<XsdDocument, SourceError> {
    let representation = RepresentationId::Xsd;
    let text = read_text(layout, representation)?;
    XsdDocument::parse(&text).map_err(|e| SourceError::ParseError {
        representation,
        path: layout.path(representation),
        reason: e.to_string(),
    })
}
