//! # Representations — The Four Schema Formats
//!
//! Defines [`RepresentationId`], the single closed enumeration of schema
//! description formats compared by the toolkit. Every `match` on it is
//! exhaustive, so adding a fifth format forces every extractor, matrix
//! column and report renderer to handle it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// One of the four independently authored descriptions of the resume schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepresentationId {
    /// `schema.json`: the JSON Schema for resume documents.
    JsonSchema,
    /// `context.jsonld`: flat field-name → URI mappings.
    JsonLdContext,
    /// `meta-schema.json`: describes the schema language, not the data.
    MetaSchema,
    /// `xml/1.0/schema-resume.xsd`: named complex types with child elements.
    Xsd,
}

impl RepresentationId {
    /// All representations in report column order.
    pub fn all() -> &'static [RepresentationId] {
        &[Self::JsonSchema, Self::JsonLdContext, Self::MetaSchema, Self::Xsd]
    }

    /// The number of representations.
    pub const COUNT: usize = 4;

    /// Fixed location of this representation's source, relative to the base
    /// directory.
    pub fn relative_path(&self) -> PathBuf {
        match self {
            Self::JsonSchema => PathBuf::from("schema.json"),
            Self::JsonLdContext => PathBuf::from("context.jsonld"),
            Self::MetaSchema => PathBuf::from("meta-schema.json"),
            Self::Xsd => Path::new("xml").join("1.0").join("schema-resume.xsd"),
        }
    }

    /// Source file name as shown in reports and lint findings.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::JsonSchema => "schema.json",
            Self::JsonLdContext => "context.jsonld",
            Self::MetaSchema => "meta-schema.json",
            Self::Xsd => "schema-resume.xsd",
        }
    }

    /// Short column heading for presence tables.
    pub fn column_label(&self) -> &'static str {
        match self {
            Self::JsonSchema => "schema.json",
            Self::JsonLdContext => "context.jsonld",
            Self::MetaSchema => "meta-schema",
            Self::Xsd => "XSD",
        }
    }

    /// Whether this representation declares section-qualified paths.
    ///
    /// The JSON-LD context maps bare names to URIs and carries no section
    /// information, so it is reconciled by suffix instead.
    pub fn is_qualified(&self) -> bool {
        !matches!(self, Self::JsonLdContext)
    }
}

impl std::fmt::Display for RepresentationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::JsonSchema => "json_schema",
            Self::JsonLdContext => "json_ld_context",
            Self::MetaSchema => "meta_schema",
            Self::Xsd => "xsd",
        };
        write!(f, "{s}")
    }
}
