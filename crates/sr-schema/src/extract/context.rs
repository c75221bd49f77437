//! # JSON-LD Context Extractor
//!
//! Every key of the `@context` mapping names a field, except JSON-LD
//! keywords (`@vocab`, `@version`, …) and the vocabulary namespace
//! prefixes. The context has no nesting, so the output is a flat set of
//! bare names.

use serde_json::{Map, Value};
use sr_core::RepresentationId;

use super::{Extraction, Extractor};
use crate::inventory::FlatFieldSet;

/// Namespace prefix keys that are not fields.
pub const NAMESPACE_KEYS: &[&str] = &["schema", "xsd", "rdf", "rdfs"];

/// Extracts bare field names from a JSON-LD context document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContextExtractor;

/// Whether a context key names a field.
pub fn is_field_key(key: &str) -> bool {
    !key.starts_with('@') && !NAMESPACE_KEYS.contains(&key)
}

fn collect_keys(map: &Map<String, Value>, out: &mut FlatFieldSet) {
    for key in map.keys().filter(|k| is_field_key(k)) {
        out.insert(key.as_str());
    }
}

impl Extractor for ContextExtractor {
    type Document = Value;
    type Fields = FlatFieldSet;

    fn representation(&self) -> RepresentationId {
        RepresentationId::JsonLdContext
    }

    fn extract(&self, document: &Value) -> Extraction<FlatFieldSet> {
        let mut names = FlatFieldSet::new();
        match document.get("@context") {
            Some(Value::Object(map)) => collect_keys(map, &mut names),
            // A context array mixes remote references (strings) with inline maps.
            Some(Value::Array(entries)) => {
                for entry in entries.iter().filter_map(Value::as_object) {
                    collect_keys(entry, &mut names);
                }
            }
            _ => {}
        }
        tracing::debug!(names = names.len(), "extracted json-ld context fields");
        Extraction::clean(names)
    }
}
