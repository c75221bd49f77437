//! # Section Drift Reporter
//!
//! No representation is treated as ground truth. Instead, a curated
//! checklist names the fields each logical section is expected to have,
//! and the reporter shows where each one is declared.
//!
//! Lookups per field `f` of section `s`:
//!
//! | Representation | Lookup key |
//! |----------------|------------|
//! | JSON Schema    | `s.f`      |
//! | JSON-LD        | `f`        |
//! | Meta-Schema    | `f`        |
//! | XSD            | `s.f`      |
//!
//! A row is flagged when the JSON Schema, JSON-LD and XSD flags are not all
//! equal. The meta-schema column is informational.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use sr_core::{path::validate_name, CanonicalPath, PathError};

use crate::matrix::{Presence, PresenceMatrix};

/// Built-in checklists: `(section key, expected field names)`.
pub const STANDARD_CHECKLISTS: &[(&str, &[&str])] = &[
    (
        "basics",
        &[
            "name",
            "label",
            "title",
            "age",
            "dateOfBirth",
            "gender",
            "image",
            "email",
            "phone",
            "url",
            "summary",
            "keyAchievements",
            "coreCompetencies",
            "location",
            "profiles",
            "nationalities",
            "workAuthorization",
        ],
    ),
    (
        "basics.location",
        &["address", "streetAddress", "postalCode", "city", "countryCode", "region"],
    ),
    (
        "meta",
        &["canonical", "version", "lastModified", "dateCreated", "dateModified", "datePublished"],
    ),
];

/// The expected fields of one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawChecklist", into = "RawChecklist")]
pub struct SectionChecklist {
    section: CanonicalPath,
    fields: BTreeSet<String>,
}

/// Serialized checklist shape, as written in configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawChecklist {
    key: String,
    fields: Vec<String>,
}

impl TryFrom<RawChecklist> for SectionChecklist {
    type Error = PathError;

    fn try_from(raw: RawChecklist) -> Result<Self, Self::Error> {
        Self::new(&raw.key, raw.fields)
    }
}

impl From<SectionChecklist> for RawChecklist {
    fn from(c: SectionChecklist) -> Self {
        Self {
            key: c.section.to_string(),
            fields: c.fields.into_iter().collect(),
        }
    }
}

impl SectionChecklist {
    /// Checklist for section `key` expecting `fields`.
    ///
    /// # Errors
    ///
    /// Returns a [`PathError`] if `key` is not a canonical path or any
    /// field is not a valid segment name.
    pub fn new<I, S>(key: &str, fields: I) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let section = CanonicalPath::parse(key)?;
        let fields = fields
            .into_iter()
            .map(Into::into)
            .map(|f: String| validate_name(&f).map(|()| f))
            .collect::<Result<BTreeSet<_>, _>>()?;
        Ok(Self { section, fields })
    }

    /// The built-in checklists for `basics`, `basics.location` and `meta`.
    pub fn standard() -> Vec<Self> {
        STANDARD_CHECKLISTS
            .iter()
            .filter_map(|(key, fields)| match Self::new(key, fields.iter().copied()) {
                Ok(checklist) => Some(checklist),
                Err(e) => {
                    tracing::error!(section = *key, error = %e, "invalid built-in checklist");
                    None
                }
            })
            .collect()
    }

    /// The section key.
    pub fn section(&self) -> &CanonicalPath {
        &self.section
    }

    /// Expected fields in sorted order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }
}

/// One rendered row of a section table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriftRow {
    /// Bare field name.
    pub field: String,
    /// Qualified path used for JSON Schema and XSD lookups.
    pub path: CanonicalPath,
    /// Presence across the four representations.
    pub presence: Presence,
    /// JSON Schema, JSON-LD and XSD disagree.
    pub mismatch: bool,
}

/// Presence table for one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionReport {
    /// The section key.
    pub section: CanonicalPath,
    /// One row per expected field, sorted by field name.
    pub rows: Vec<DriftRow>,
}

impl SectionReport {
    /// Rows flagged as drifting.
    pub fn mismatches(&self) -> impl Iterator<Item = &DriftRow> {
        self.rows.iter().filter(|r| r.mismatch)
    }

    /// Number of flagged rows.
    pub fn mismatch_count(&self) -> usize {
        self.mismatches().count()
    }
}

/// Build the presence table for one checklist.
pub fn report_section(matrix: &PresenceMatrix, checklist: &SectionChecklist) -> SectionReport {
    let inventories = matrix.inventories();
    let mut rows = Vec::with_capacity(checklist.fields.len());

    for field in checklist.fields() {
        // Field names were validated when the checklist was built.
        let Ok(path) = checklist.section.child(field, false) else {
            continue;
        };
        let bare = CanonicalPath::field(field).ok();

        let presence = Presence {
            json_schema: inventories.json_schema.contains(&path),
            json_ld_context: inventories.context.contains(field),
            meta_schema: bare.is_some_and(|b| inventories.meta_schema.contains(&b)),
            xsd: inventories.xsd.contains(&path),
        };
        rows.push(DriftRow {
            field: field.to_string(),
            path,
            mismatch: presence.is_mismatch(),
            presence,
        });
    }

    let report = SectionReport {
        section: checklist.section.clone(),
        rows,
    };
    tracing::debug!(
        section = %report.section,
        fields = report.rows.len(),
        mismatches = report.mismatch_count(),
        "reported section drift"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{Inventories, PathSet};

    fn p(s: &str) -> CanonicalPath {
        CanonicalPath::parse(s).unwrap()
    }

    fn set(items: &[&str]) -> PathSet {
        items.iter().map(|s| p(s)).collect()
    }

    fn matrix() -> PresenceMatrix {
        PresenceMatrix::build(Inventories {
            json_schema: set(&["basics.email", "basics.nationalities", "basics.phone"]),
            context: ["email", "url"].into_iter().collect(),
            meta_schema: set(&["type", "email"]),
            xsd: set(&["basics.email", "basics.url"]),
        })
    }

    fn row<'a>(report: &'a SectionReport, field: &str) -> &'a DriftRow {
        report.rows.iter().find(|r| r.field == field).unwrap()
    }

    #[test]
    fn present_in_all_three_is_not_flagged() {
        let checklist = SectionChecklist::new("basics", ["email"]).unwrap();
        let report = report_section(&matrix(), &checklist);
        let email = row(&report, "email");
        assert!(email.presence.json_schema && email.presence.json_ld_context && email.presence.xsd);
        assert!(!email.mismatch);
    }

    #[test]
    fn schema_only_field_is_flagged() {
        let checklist = SectionChecklist::new("basics", ["nationalities"]).unwrap();
        let report = report_section(&matrix(), &checklist);
        let nat = row(&report, "nationalities");
        assert!(nat.presence.json_schema);
        assert!(!nat.presence.json_ld_context && !nat.presence.xsd);
        assert!(nat.mismatch);
    }

    #[test]
    fn absent_everywhere_is_not_flagged() {
        let checklist = SectionChecklist::new("basics", ["gender"]).unwrap();
        let report = report_section(&matrix(), &checklist);
        assert_eq!(row(&report, "gender").presence, Presence::absent());
        assert_eq!(report.mismatch_count(), 0);
    }

    #[test]
    fn missing_from_context_only_is_flagged() {
        let checklist = SectionChecklist::new("basics", ["phone", "url"]).unwrap();
        let report = report_section(&matrix(), &checklist);
        // phone: schema only. url: context + xsd, not schema.
        assert!(row(&report, "phone").mismatch);
        assert!(row(&report, "url").mismatch);
    }

    #[test]
    fn meta_column_uses_bare_name_and_never_flags() {
        let checklist = SectionChecklist::new("basics", ["email", "type"]).unwrap();
        let report = report_section(&matrix(), &checklist);
        assert!(row(&report, "email").presence.meta_schema);
        let keyword = row(&report, "type");
        assert!(keyword.presence.meta_schema);
        assert!(!keyword.mismatch);
    }

    #[test]
    fn rows_are_sorted_by_field() {
        let checklist = SectionChecklist::new("basics", ["url", "email", "age"]).unwrap();
        let report = report_section(&matrix(), &checklist);
        let fields: Vec<_> = report.rows.iter().map(|r| r.field.as_str()).collect();
        assert_eq!(fields, vec!["age", "email", "url"]);
        assert_eq!(report.rows[0].path.as_str(), "basics.age");
    }

    #[test]
    fn nested_section_qualifies_with_full_key() {
        let m = PresenceMatrix::build(Inventories {
            json_schema: set(&["basics.location.city"]),
            context: ["city"].into_iter().collect(),
            meta_schema: PathSet::new(),
            xsd: set(&["basics.location.city"]),
        });
        let checklist = SectionChecklist::new("basics.location", ["city"]).unwrap();
        let report = report_section(&m, &checklist);
        assert_eq!(report.rows[0].path.as_str(), "basics.location.city");
        assert!(!report.rows[0].mismatch);
    }

    #[test]
    fn standard_checklists_match_builtin_table() {
        let standard = SectionChecklist::standard();
        let keys: Vec<_> = standard.iter().map(|c| c.section().as_str()).collect();
        assert_eq!(keys, vec!["basics", "basics.location", "meta"]);
        assert_eq!(standard[0].fields().count(), 17);
        assert_eq!(standard[1].fields().count(), 6);
        assert_eq!(standard[2].fields().count(), 6);
    }

    #[test]
    fn invalid_checklists_are_rejected() {
        assert!(SectionChecklist::new("basics..x", ["a"]).is_err());
        assert!(SectionChecklist::new("basics", ["a.b"]).is_err());
    }

    #[test]
    fn checklist_deserializes_from_config_shape() {
        let c: SectionChecklist =
            serde_json::from_str(r#"{"key": "work[]", "fields": ["position", "name"]}"#).unwrap();
        assert_eq!(c.section().as_str(), "work[]");
        assert_eq!(c.fields().collect::<Vec<_>>(), vec!["name", "position"]);
        assert!(serde_json::from_str::<SectionChecklist>(r#"{"key": "x", "fields": [], "extra": 1}"#).is_err());
    }
}
