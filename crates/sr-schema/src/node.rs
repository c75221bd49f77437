//! # Schema Nodes
//!
//! A JSON Schema document is an untyped tree. Rather than probing keys ad hoc
//! in every extractor, the tree is classified once into a closed
//! [`SchemaNode`] union and extractors pattern-match on it.
//!
//! Classification rules, in priority order:
//!
//! 1. A node whose `properties` is an object is an [`SchemaNode::Object`].
//! 2. Otherwise, a node whose `items` is an object is an [`SchemaNode::Array`].
//! 3. Everything else (`type: string`, `$ref`, tuple `items`, booleans) is a
//!    [`SchemaNode::Scalar`].

use std::collections::BTreeMap;

use serde_json::Value;

/// The structural shape of one schema node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaNode {
    /// No nested field structure.
    Scalar,
    /// A node declaring `properties`, keyed by property name.
    Object(BTreeMap<String, SchemaNode>),
    /// A node declaring an `items` schema.
    Array(Box<SchemaNode>),
}

impl SchemaNode {
    /// Classify a parsed JSON value.
    pub fn from_value(value: &Value) -> Self {
        if let Some(properties) = value.get("properties").and_then(Value::as_object) {
            let fields = properties
                .iter()
                .map(|(name, schema)| (name.clone(), Self::from_value(schema)))
                .collect();
            return Self::Object(fields);
        }
        if let Some(items) = value.get("items").filter(|i| i.is_object()) {
            return Self::Array(Box::new(Self::from_value(items)));
        }
        Self::Scalar
    }

    /// Fields of an object node, or `None` for any other shape.
    pub fn fields(&self) -> Option<&BTreeMap<String, SchemaNode>> {
        match self {
            Self::Object(fields) => Some(fields),
            _ => None,
        }
    }

    /// Fields of an array-of-objects item schema.
    pub fn item_fields(&self) -> Option<&BTreeMap<String, SchemaNode>> {
        match self {
            Self::Array(item) => item.fields(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn properties_win_over_items() {
        let node = SchemaNode::from_value(&json!({
            "properties": {"a": {"type": "string"}},
            "items": {"properties": {"b": {}}}
        }));
        let fields = node.fields().unwrap();
        assert_eq!(fields.keys().collect::<Vec<_>>(), vec!["a"]);
        assert_eq!(fields["a"], SchemaNode::Scalar);
    }

    #[test]
    fn array_of_objects_exposes_item_fields() {
        let node = SchemaNode::from_value(&json!({
            "type": "array",
            "items": {"type": "object", "properties": {"name": {"type": "string"}}}
        }));
        assert!(matches!(node, SchemaNode::Array(_)));
        assert!(node.item_fields().unwrap().contains_key("name"));
    }

    #[test]
    fn array_of_strings_has_no_item_fields() {
        let node = SchemaNode::from_value(&json!({"type": "array", "items": {"type": "string"}}));
        assert_eq!(node, SchemaNode::Array(Box::new(SchemaNode::Scalar)));
        assert!(node.item_fields().is_none());
    }

    #[test]
    fn tuple_items_and_refs_are_scalar() {
        assert_eq!(
            SchemaNode::from_value(&json!({"items": [{"type": "string"}]})),
            SchemaNode::Scalar
        );
        assert_eq!(
            SchemaNode::from_value(&json!({"$ref": "#/definitions/iso8601"})),
            SchemaNode::Scalar
        );
        assert_eq!(SchemaNode::from_value(&json!(true)), SchemaNode::Scalar);
    }

    #[test]
    fn non_object_properties_is_scalar() {
        assert_eq!(
            SchemaNode::from_value(&json!({"properties": ["a", "b"]})),
            SchemaNode::Scalar
        );
    }
}
