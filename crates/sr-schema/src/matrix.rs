//! # Presence Matrix
//!
//! Aggregates the four inventories into one table keyed by
//! [`CanonicalPath`]. Rows cover every path declared by a qualified
//! representation (JSON Schema, Meta-Schema, XSD). Qualified flags are
//! direct set membership; the JSON-LD flag is a suffix match against the
//! context's flat names. Rows only the meta-schema declares are schema
//! language keywords, not data fields, and are never suffix-matched, so a
//! keyword such as `title` cannot drift against a context term `title`.
//!
//! The matrix is built once and never mutated. It keeps the raw
//! inventories alongside the rows because the global summary works on raw
//! set differences, not on the reconciled table.

use std::collections::BTreeMap;

use serde::Serialize;
use sr_core::{CanonicalPath, RepresentationId};

use crate::inventory::Inventories;

/// Per-representation presence of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Presence {
    /// Declared by `schema.json`.
    pub json_schema: bool,
    /// Declared (by suffix or bare name) in `context.jsonld`.
    pub json_ld_context: bool,
    /// Declared by `meta-schema.json`.
    pub meta_schema: bool,
    /// Declared by the XSD.
    pub xsd: bool,
}

impl Presence {
    /// The zero record: absent everywhere. Every row starts from this.
    pub const fn absent() -> Self {
        Self {
            json_schema: false,
            json_ld_context: false,
            meta_schema: false,
            xsd: false,
        }
    }

    /// Flag for one representation.
    pub fn get(&self, representation: RepresentationId) -> bool {
        match representation {
            RepresentationId::JsonSchema => self.json_schema,
            RepresentationId::JsonLdContext => self.json_ld_context,
            RepresentationId::MetaSchema => self.meta_schema,
            RepresentationId::Xsd => self.xsd,
        }
    }

    /// Set the flag for one representation.
    pub fn set(&mut self, representation: RepresentationId, present: bool) {
        match representation {
            RepresentationId::JsonSchema => self.json_schema = present,
            RepresentationId::JsonLdContext => self.json_ld_context = present,
            RepresentationId::MetaSchema => self.meta_schema = present,
            RepresentationId::Xsd => self.xsd = present,
        }
    }

    /// Drift test: JSON Schema, JSON-LD context and XSD must agree.
    ///
    /// The meta-schema describes the schema language rather than the data
    /// and never takes part.
    pub fn is_mismatch(&self) -> bool {
        !(self.json_schema == self.json_ld_context && self.json_ld_context == self.xsd)
    }
}

impl Default for Presence {
    fn default() -> Self {
        Self::absent()
    }
}

/// Canonical path → presence across all four representations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresenceMatrix {
    rows: BTreeMap<CanonicalPath, Presence>,
    #[serde(skip)]
    inventories: Inventories,
}

impl PresenceMatrix {
    /// Build the matrix from complete inventories.
    ///
    /// Distinct paths sharing a final name (`basics.name`, `work[].name`)
    /// are both marked present in the context by one flat `name` entry.
    pub fn build(inventories: Inventories) -> Self {
        let mut rows: BTreeMap<CanonicalPath, Presence> = BTreeMap::new();

        for rep in RepresentationId::all().iter().filter(|r| r.is_qualified()) {
            let Some(set) = inventories.qualified(*rep) else {
                continue;
            };
            for path in set {
                rows.entry(path.clone())
                    .or_insert_with(Presence::absent)
                    .set(*rep, true);
            }
        }

        for (path, presence) in rows.iter_mut() {
            let data_field = presence.json_schema || presence.xsd;
            presence.json_ld_context = data_field && inventories.context.matches_suffix(path);
        }

        tracing::debug!(rows = rows.len(), "built presence matrix");
        Self { rows, inventories }
    }

    /// Presence of `path`, absent everywhere if no qualified
    /// representation declares it.
    pub fn presence(&self, path: &CanonicalPath) -> Presence {
        self.rows.get(path).copied().unwrap_or_else(Presence::absent)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if no qualified representation declared anything.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows whose presence drifts across JSON Schema, context and XSD.
    pub fn mismatches(&self) -> impl Iterator<Item = (&CanonicalPath, &Presence)> {
        self.rows.iter().filter(|(_, p)| p.is_mismatch())
    }

    /// The raw per-representation sets the matrix was built from.
    pub fn inventories(&self) -> &Inventories {
        &self.inventories
    }
}
