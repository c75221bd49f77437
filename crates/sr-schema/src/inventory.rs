//! # Field Inventories
//!
//! The sets produced by extraction. Three representations yield qualified
//! [`PathSet`]s; the JSON-LD context yields a [`FlatFieldSet`] of bare names
//! that is reconciled against qualified paths by suffix.
//!
//! ## Precision Limit
//!
//! Suffix matching conflates distinct fields that share a terminal name:
//! a single context entry `name` makes both `basics.name` and `work[].name`
//! present. This matches how the context is authored (one URI per name) and
//! is kept for compatibility.

use std::collections::BTreeSet;

use serde::Serialize;
use sr_core::{CanonicalPath, RepresentationId};

/// Qualified field paths declared by one representation.
pub type PathSet = BTreeSet<CanonicalPath>;

/// Unqualified field names declared by the JSON-LD context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FlatFieldSet {
    names: BTreeSet<String>,
}

impl FlatFieldSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a name. Returns false if it was already present.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    /// Exact membership of a bare name.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// True iff some name equals the final segment of `path`.
    pub fn matches_suffix(&self, path: &CanonicalPath) -> bool {
        path.leaf_name().is_some_and(|leaf| self.names.contains(leaf))
    }

    /// Names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Number of names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True if there are no names.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for FlatFieldSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// The raw per-representation sets of one comparison run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Inventories {
    /// Paths from `schema.json`.
    pub json_schema: PathSet,
    /// Names from `context.jsonld`.
    pub context: FlatFieldSet,
    /// Keywords from `meta-schema.json`, as single-segment paths.
    pub meta_schema: PathSet,
    /// Paths from `schema-resume.xsd`.
    pub xsd: PathSet,
}

impl Inventories {
    /// Number of entries a representation declared.
    pub fn total(&self, representation: RepresentationId) -> usize {
        match representation {
            RepresentationId::JsonSchema => self.json_schema.len(),
            RepresentationId::JsonLdContext => self.context.len(),
            RepresentationId::MetaSchema => self.meta_schema.len(),
            RepresentationId::Xsd => self.xsd.len(),
        }
    }

    /// Qualified set of a representation; `None` for the flat context.
    pub fn qualified(&self, representation: RepresentationId) -> Option<&PathSet> {
        match representation {
            RepresentationId::JsonSchema => Some(&self.json_schema),
            RepresentationId::MetaSchema => Some(&self.meta_schema),
            RepresentationId::Xsd => Some(&self.xsd),
            RepresentationId::JsonLdContext => None,
        }
    }

    /// Plain set membership of `path` in any of `others`.
    ///
    /// The flat context only matches a path whose whole rendered form equals
    /// one of its names; suffix reconciliation is not applied here.
    pub(crate) fn declared_elsewhere(
        &self,
        path: &CanonicalPath,
        others: &[RepresentationId],
    ) -> bool {
        others.iter().any(|rep| match self.qualified(*rep) {
            Some(set) => set.contains(path),
            None => self.context.contains(path.as_str()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> CanonicalPath {
        CanonicalPath::parse(s).unwrap()
    }

    #[test]
    fn suffix_match_uses_final_segment() {
        let flat: FlatFieldSet = ["position"].into_iter().collect();
        assert!(flat.matches_suffix(&p("work[].position")));
        assert!(!flat.matches_suffix(&p("work[].positions")));
        assert!(!flat.matches_suffix(&CanonicalPath::root()));
    }

    #[test]
    fn one_flat_name_serves_every_owner() {
        let flat: FlatFieldSet = ["name"].into_iter().collect();
        assert!(flat.matches_suffix(&p("basics.name")));
        assert!(flat.matches_suffix(&p("work[].name")));
    }

    #[test]
    fn marker_is_ignored_by_suffix_match() {
        let flat: FlatFieldSet = ["skills"].into_iter().collect();
        assert!(flat.matches_suffix(&p("skills[]")));
    }

    #[test]
    fn totals_follow_each_set() {
        let inv = Inventories {
            json_schema: [p("basics.name"), p("basics.email")].into_iter().collect(),
            context: ["name"].into_iter().collect(),
            meta_schema: PathSet::new(),
            xsd: [p("basics.name")].into_iter().collect(),
        };
        assert_eq!(inv.total(RepresentationId::JsonSchema), 2);
        assert_eq!(inv.total(RepresentationId::JsonLdContext), 1);
        assert_eq!(inv.total(RepresentationId::MetaSchema), 0);
        assert_eq!(inv.total(RepresentationId::Xsd), 1);
    }

    #[test]
    fn flat_set_serializes_as_sorted_array() {
        let flat: FlatFieldSet = ["b", "a"].into_iter().collect();
        assert_eq!(serde_json::to_string(&flat).unwrap(), r#"["a","b"]"#);
    }
}
