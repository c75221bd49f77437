//! # XSD Type-Section Map
//!
//! The XSD names its structures by complex type (`WorkType`,
//! `LocationType`), not by where they sit in the resume. This module maps
//! each complex type to the canonical section prefix its child elements
//! belong under.
//!
//! The built-in table is an immutable literal tied to version 1.0 of the
//! XML schema. Configuration may layer extra entries on top when the map is
//! constructed; the map itself is never mutated afterwards.
//!
//! Complex types missing from the map contribute no paths. That is a known
//! extraction gap, surfaced by the extractor as a warning.

use std::collections::BTreeMap;

use sr_core::{CanonicalPath, PathError};

/// Spelling of the root-section sentinel in tables and configuration.
pub const ROOT_SECTION: &str = "root";

/// Built-in complex type → section prefix table for `schema-resume.xsd` 1.0.
pub const STANDARD_TYPE_SECTIONS: &[(&str, &str)] = &[
    ("BasicsType", "basics"),
    ("LocationType", "basics.location"),
    ("WorkType", "work[]"),
    ("WorkLocationAddressType", "work[].location"),
    ("ContactDetailsType", "work[].contactDetails"),
    ("VolunteerType", "volunteer[]"),
    ("EducationType", "education[]"),
    ("AwardType", "awards[]"),
    ("CertificateType", "certificates[]"),
    ("PublicationType", "publications[]"),
    ("SkillType", "skills[]"),
    ("ToolType", "tools[]"),
    ("LanguageType", "languages[]"),
    ("InterestType", "interests[]"),
    ("ReferenceType", "references[]"),
    ("ProjectType", "projects[]"),
    ("MetaType", "meta"),
];

/// Where a complex type's elements are placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionPrefix {
    /// Elements are top-level fields (`name`, not `root.name`).
    Root,
    /// Elements are nested under this path.
    Path(CanonicalPath),
}

impl SectionPrefix {
    /// Parse a table value: `root` or a canonical path.
    pub fn parse(raw: &str) -> Result<Self, PathError> {
        if raw == ROOT_SECTION {
            return Ok(Self::Root);
        }
        let path = CanonicalPath::parse(raw)?;
        if path.is_empty() {
            return Err(PathError::EmptySegment);
        }
        Ok(Self::Path(path))
    }

    /// The path elements are appended to.
    pub fn as_path(&self) -> CanonicalPath {
        match self {
            Self::Root => CanonicalPath::root(),
            Self::Path(p) => p.clone(),
        }
    }
}

/// Lookup from XSD complex-type name to [`SectionPrefix`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XsdTypeMap {
    sections: BTreeMap<String, SectionPrefix>,
}

impl XsdTypeMap {
    /// Build a map from `(type name, prefix)` pairs.
    ///
    /// # Errors
    ///
    /// Returns the first [`PathError`] among the prefixes.
    pub fn from_entries<'a, I>(entries: I) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut sections = BTreeMap::new();
        for (type_name, prefix) in entries {
            sections.insert(type_name.to_string(), SectionPrefix::parse(prefix)?);
        }
        Ok(Self { sections })
    }

    /// The built-in 1.0 table.
    pub fn standard() -> Self {
        let mut sections = BTreeMap::new();
        for (type_name, raw) in STANDARD_TYPE_SECTIONS {
            match SectionPrefix::parse(raw) {
                Ok(prefix) => {
                    sections.insert((*type_name).to_string(), prefix);
                }
                Err(e) => {
                    tracing::error!(type_name = *type_name, prefix = *raw, error = %e, "invalid built-in section prefix");
                }
            }
        }
        Self { sections }
    }

    /// The built-in table with `overrides` layered on top.
    ///
    /// An override replaces a built-in entry of the same name.
    pub fn standard_with<'a, I>(overrides: I) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut map = Self::standard();
        let extra = Self::from_entries(overrides)?;
        map.sections.extend(extra.sections);
        Ok(map)
    }

    /// Section prefix for `type_name`, if mapped.
    pub fn section_for(&self, type_name: &str) -> Option<&SectionPrefix> {
        self.sections.get(type_name)
    }

    /// Number of mapped types.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// True if no type is mapped.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl Default for XsdTypeMap {
    fn default() -> Self {
        Self::standard()
    }
}
