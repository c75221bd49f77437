//! # Format Extractors
//!
//! One extractor per representation, each turning a parsed document into
//! the field inventory it declares:
//!
//! | Extractor                    | Document          | Output          |
//! |------------------------------|-------------------|-----------------|
//! | [`JsonSchemaExtractor`]      | [`SchemaNode`]    | [`PathSet`]     |
//! | [`ContextExtractor`]         | `serde_json::Value` | [`FlatFieldSet`] |
//! | [`MetaSchemaExtractor`]      | [`SchemaNode`]    | [`PathSet`]     |
//! | [`XsdExtractor`]             | [`XsdDocument`]   | [`PathSet`]     |
//!
//! Extractors hold only configuration, never state from previous calls:
//! extracting the same document twice yields identical output.
//!
//! [`SchemaNode`]: crate::node::SchemaNode
//! [`XsdDocument`]: crate::xsd::XsdDocument
//! [`PathSet`]: crate::inventory::PathSet
//! [`FlatFieldSet`]: crate::inventory::FlatFieldSet

pub mod context;
pub mod json_schema;
pub mod meta_schema;
pub mod xsd;

pub use context::ContextExtractor;
pub use json_schema::JsonSchemaExtractor;
pub use meta_schema::MetaSchemaExtractor;
pub use xsd::XsdExtractor;

use sr_core::{RepresentationId, SourceError};

/// Output of one extractor run: the inventory plus any non-fatal issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction<F> {
    /// The declared fields.
    pub fields: F,
    /// Warnings raised while extracting (e.g. XSD mapping gaps).
    pub issues: Vec<SourceError>,
}

impl<F> Extraction<F> {
    /// An extraction with no issues.
    pub fn clean(fields: F) -> Self {
        Self {
            fields,
            issues: Vec::new(),
        }
    }
}

/// Turns one parsed representation into its field inventory.
pub trait Extractor {
    /// The parsed document this extractor reads.
    type Document: ?Sized;
    /// The inventory it produces.
    type Fields;

    /// Which representation this extractor handles.
    fn representation(&self) -> RepresentationId;

    /// Extract every field the document declares.
    fn extract(&self, document: &Self::Document) -> Extraction<Self::Fields>;
}
