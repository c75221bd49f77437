//! # JSON-Schema Extractor
//!
//! Walks the top-level `properties` of `schema.json`. Each top-level
//! property is a section:
//!
//! - an object section (`basics`, `meta`) contributes `basics.email`, …
//! - an array-of-objects section (`work`) contributes `work[].position`, …
//! - anything else (a plain string or boolean property) contributes nothing.
//!
//! Below the section, nested object fields are descended up to
//! `max_depth` levels (default 2: `basics.location.city`). List-valued
//! nested fields are leaves: `basics.profiles` is emitted, its item
//! properties are not.

use std::collections::BTreeMap;

use sr_core::{canonicalize, CanonicalPath, RepresentationId};

use super::{Extraction, Extractor};
use crate::inventory::PathSet;
use crate::node::SchemaNode;

/// Top-level keys that describe the schema rather than a resume section.
pub const SCHEMA_METADATA_KEYS: &[&str] = &["$schema", "@type", "additionalType"];

/// Default number of field levels emitted below a section.
pub const DEFAULT_MAX_DEPTH: usize = 2;

/// Extracts qualified field paths from a JSON Schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonSchemaExtractor {
    max_depth: usize,
}

impl JsonSchemaExtractor {
    /// Extractor descending at most `max_depth` field levels per section.
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// The configured depth cap.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    fn walk(
        &self,
        prefix: &CanonicalPath,
        fields: &BTreeMap<String, SchemaNode>,
        depth: usize,
        out: &mut PathSet,
    ) {
        if depth > self.max_depth {
            return;
        }
        for (name, node) in fields {
            let path = match canonicalize(prefix, name, false) {
                Ok(path) => path,
                Err(e) => {
                    tracing::warn!(prefix = %prefix, field = %name, error = %e, "skipping schema property");
                    continue;
                }
            };
            if let SchemaNode::Object(nested) = node {
                self.walk(&path, nested, depth + 1, out);
            }
            out.insert(path);
        }
    }
}

impl Default for JsonSchemaExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl Extractor for JsonSchemaExtractor {
    type Document = SchemaNode;
    type Fields = PathSet;

    fn representation(&self) -> RepresentationId {
        RepresentationId::JsonSchema
    }

    fn extract(&self, document: &SchemaNode) -> Extraction<PathSet> {
        let mut paths = PathSet::new();
        let Some(sections) = document.fields() else {
            return Extraction::clean(paths);
        };

        for (section, node) in sections {
            if SCHEMA_METADATA_KEYS.contains(&section.as_str()) {
                continue;
            }
            let (fields, is_list) = match node {
                SchemaNode::Object(fields) => (fields, false),
                SchemaNode::Array(item) => match item.fields() {
                    Some(fields) => (fields, true),
                    None => continue,
                },
                SchemaNode::Scalar => continue,
            };
            match canonicalize(&CanonicalPath::root(), section, is_list) {
                Ok(prefix) => self.walk(&prefix, fields, 1, &mut paths),
                Err(e) => {
                    tracing::warn!(section = %section, error = %e, "skipping schema section");
                }
            }
        }

        tracing::debug!(paths = paths.len(), "extracted json schema fields");
        Extraction::clean(paths)
    }
}
