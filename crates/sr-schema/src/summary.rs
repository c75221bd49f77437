//! # Global Summary
//!
//! Whole-inventory set differences, computed on the raw per-representation
//! sets rather than on section checklists:
//!
//! ```text
//! only_in_schema  = JsonSchema − JsonLdContext − Xsd
//! only_in_context = JsonLdContext − JsonSchema − Xsd      (suffix-aware)
//! only_in_meta    = MetaSchema − JsonSchema − JsonLdContext − Xsd
//! only_in_xsd     = Xsd − JsonSchema − JsonLdContext
//! ```
//!
//! plus the two suffix-reconciled "missing" lists between the JSON Schema
//! and the context. Subtracting the flat context from a qualified set only
//! removes a path whose whole rendered form equals a context name;
//! suffix reconciliation applies to `only_in_context` and the missing lists.

use std::collections::BTreeMap;

use serde::Serialize;
use sr_core::{CanonicalPath, RepresentationId};

use crate::inventory::Inventories;
use crate::matrix::PresenceMatrix;

/// Default number of entries shown per truncated summary list.
pub const DEFAULT_PREVIEW_LIMIT: usize = 10;

/// Set differences and totals across all four inventories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlobalSummary {
    /// JSON Schema paths declared by neither the context nor the XSD.
    pub only_in_schema: Vec<CanonicalPath>,
    /// Context names no JSON Schema or XSD path ends with.
    pub only_in_context: Vec<String>,
    /// Meta-schema keywords declared nowhere else. Informational.
    pub only_in_meta: Vec<CanonicalPath>,
    /// XSD paths declared by neither the JSON Schema nor the context.
    pub only_in_xsd: Vec<CanonicalPath>,
    /// JSON Schema paths whose final segment has no context entry.
    pub missing_from_context: Vec<CanonicalPath>,
    /// Context names that end no JSON Schema path.
    pub missing_from_schema: Vec<String>,
    /// Entry count per representation.
    pub totals: BTreeMap<RepresentationId, usize>,
}

impl GlobalSummary {
    /// Compute the summary from a matrix's raw inventories.
    pub fn compute(matrix: &PresenceMatrix) -> Self {
        Self::from_inventories(matrix.inventories())
    }

    /// Compute the summary directly from inventories.
    pub fn from_inventories(inv: &Inventories) -> Self {
        use RepresentationId::{JsonLdContext, JsonSchema, Xsd};

        let only_in_schema = inv
            .json_schema
            .iter()
            .filter(|p| !inv.declared_elsewhere(p, &[JsonLdContext, Xsd]))
            .cloned()
            .collect();

        let only_in_context = inv
            .context
            .iter()
            .filter(|name| {
                !inv.json_schema.iter().any(|p| p.ends_with_name(name))
                    && !inv.xsd.iter().any(|p| p.ends_with_name(name))
            })
            .map(str::to_string)
            .collect();

        let only_in_meta = inv
            .meta_schema
            .iter()
            .filter(|p| !inv.declared_elsewhere(p, &[JsonSchema, JsonLdContext, Xsd]))
            .cloned()
            .collect();

        let only_in_xsd = inv
            .xsd
            .iter()
            .filter(|p| !inv.declared_elsewhere(p, &[JsonSchema, JsonLdContext]))
            .cloned()
            .collect();

        let missing_from_context = inv
            .json_schema
            .iter()
            .filter(|p| !inv.context.matches_suffix(p))
            .cloned()
            .collect();

        let missing_from_schema = inv
            .context
            .iter()
            .filter(|name| !inv.json_schema.iter().any(|p| p.ends_with_name(name)))
            .map(str::to_string)
            .collect();

        let totals = RepresentationId::all()
            .iter()
            .map(|rep| (*rep, inv.total(*rep)))
            .collect();

        Self {
            only_in_schema,
            only_in_context,
            only_in_meta,
            only_in_xsd,
            missing_from_context,
            missing_from_schema,
            totals,
        }
    }

    /// Entry count for one representation.
    pub fn total(&self, representation: RepresentationId) -> usize {
        self.totals.get(&representation).copied().unwrap_or(0)
    }
}

/// A sorted list truncated for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview<'a, T> {
    /// The first `limit` entries.
    pub shown: &'a [T],
    /// Entries left out.
    pub hidden: usize,
}

/// Truncate `items` to at most `limit` entries.
pub fn preview<T>(items: &[T], limit: usize) -> Preview<'_, T> {
    let shown = &items[..items.len().min(limit)];
    Preview {
        shown,
        hidden: items.len() - shown.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::PathSet;

    fn p(s: &str) -> CanonicalPath {
        CanonicalPath::parse(s).unwrap()
    }

    fn set(items: &[&str]) -> PathSet {
        items.iter().map(|s| p(s)).collect()
    }

    fn rendered(paths: &[CanonicalPath]) -> Vec<&str> {
        paths.iter().map(CanonicalPath::as_str).collect()
    }

    fn inventories() -> Inventories {
        Inventories {
            json_schema: set(&["basics.email", "basics.nationalities", "work[].position", "work[].name"]),
            context: ["email", "position", "name", "hobby", "keywords"].into_iter().collect(),
            meta_schema: set(&["patternProperties", "type", "name"]),
            xsd: set(&["basics.email", "work[].position", "basics.keywords", "meta.canonical"]),
        }
    }

    #[test]
    fn only_in_meta_excludes_keywords_declared_elsewhere() {
        let s = GlobalSummary::from_inventories(&inventories());
        // `name` is a context entry, so only two keywords remain.
        assert_eq!(rendered(&s.only_in_meta), vec!["patternProperties", "type"]);
    }

    #[test]
    fn only_in_context_is_suffix_aware() {
        let s = GlobalSummary::from_inventories(&inventories());
        // `keywords` ends basics.keywords in the XSD; `hobby` ends nothing.
        assert_eq!(s.only_in_context, vec!["hobby"]);
    }

    #[test]
    fn only_in_schema_and_xsd_use_plain_differences() {
        let s = GlobalSummary::from_inventories(&inventories());
        assert_eq!(rendered(&s.only_in_schema), vec!["basics.nationalities", "work[].name"]);
        assert_eq!(rendered(&s.only_in_xsd), vec!["basics.keywords", "meta.canonical"]);
    }

    #[test]
    fn missing_lists_reconcile_by_suffix() {
        let s = GlobalSummary::from_inventories(&inventories());
        assert_eq!(rendered(&s.missing_from_context), vec!["basics.nationalities"]);
        assert_eq!(s.missing_from_schema, vec!["hobby", "keywords"]);
    }

    #[test]
    fn totals_cover_every_representation() {
        let s = GlobalSummary::from_inventories(&inventories());
        assert_eq!(s.total(RepresentationId::JsonSchema), 4);
        assert_eq!(s.total(RepresentationId::JsonLdContext), 5);
        assert_eq!(s.total(RepresentationId::MetaSchema), 3);
        assert_eq!(s.total(RepresentationId::Xsd), 4);
    }

    #[test]
    fn meta_keyword_absent_elsewhere_appears_only_in_meta() {
        let inv = inventories();
        let s = GlobalSummary::from_inventories(&inv);
        let keyword = p("patternProperties");
        assert!(s.only_in_meta.contains(&keyword));
        assert!(!s.only_in_schema.contains(&keyword));
        assert!(!s.only_in_xsd.contains(&keyword));
        assert!(!s.missing_from_context.contains(&keyword));
    }

    #[test]
    fn preview_truncates_and_counts_hidden() {
        let items: Vec<u32> = (0..15).collect();
        let pv = preview(&items, DEFAULT_PREVIEW_LIMIT);
        assert_eq!(pv.shown.len(), 10);
        assert_eq!(pv.hidden, 5);
        let short = preview(&items[..3], DEFAULT_PREVIEW_LIMIT);
        assert_eq!(short.shown.len(), 3);
        assert_eq!(short.hidden, 0);
    }

    #[test]
    fn empty_inventories_give_empty_summary() {
        let s = GlobalSummary::from_inventories(&Inventories::default());
        assert!(s.only_in_schema.is_empty() && s.only_in_context.is_empty());
        assert!(s.missing_from_context.is_empty() && s.missing_from_schema.is_empty());
        assert_eq!(s.total(RepresentationId::Xsd), 0);
    }
}
