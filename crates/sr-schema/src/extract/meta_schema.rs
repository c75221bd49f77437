//! # Meta-Schema Extractor
//!
//! The meta-schema describes the JSON Schema language itself, so its
//! top-level `properties` are keywords (`type`, `items`,
//! `patternProperties`) rather than resume fields. They are extracted as
//! single-segment paths; a keyword found only here is informational and
//! never counts as drift.

use sr_core::{CanonicalPath, RepresentationId};

use super::{Extraction, Extractor};
use crate::inventory::PathSet;
use crate::node::SchemaNode;

/// Extracts top-level keyword names from a JSON Meta-Schema.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetaSchemaExtractor;

impl Extractor for MetaSchemaExtractor {
    type Document = SchemaNode;
    type Fields = PathSet;

    fn representation(&self) -> RepresentationId {
        RepresentationId::MetaSchema
    }

    fn extract(&self, document: &SchemaNode) -> Extraction<PathSet> {
        let mut keywords = PathSet::new();
        for name in document.fields().into_iter().flat_map(|f| f.keys()) {
            if name.starts_with('$') || name.starts_with('@') {
                continue;
            }
            match CanonicalPath::field(name.as_str()) {
                Ok(path) => {
                    keywords.insert(path);
                }
                Err(e) => tracing::warn!(keyword = %name, error = %e, "skipping meta-schema keyword"),
            }
        }
        tracing::debug!(keywords = keywords.len(), "extracted meta-schema keywords");
        Extraction::clean(keywords)
    }
}
