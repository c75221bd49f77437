//! # sr-schema — Cross-Representation Drift Detection
//!
//! Reads the four representations of the resume vocabulary (JSON Schema,
//! JSON-LD context, JSON Meta-Schema, XML Schema), reduces each one to the
//! set of fields it declares, and reports where they disagree.
//!
//! ## Pipeline
//!
//! ```text
//! source ──► node / xsd ──► extract ──► inventory ──► matrix ──┬─► drift
//!                                                              └─► summary
//! ```
//!
//! - [`source`] loads each file independently; a failure empties one
//!   inventory and is recorded, never fatal.
//! - [`extract`] holds one extractor per representation. All of them emit
//!   [`sr_core::CanonicalPath`]s except the context, whose names are flat.
//! - [`matrix`] builds the presence table; [`drift`] renders it per
//!   section checklist and [`summary`] computes whole-set differences.
//! - [`compare`] runs the whole pipeline for a base directory.
//!
//! ## Beyond Comparison
//!
//! - [`lint`] checks each file's own structure (required keys, namespaces,
//!   regex validity, XSD type prefixes).
//! - [`validate`] validates resume documents against `schema.json`.
//!
//! ## Crate Policy
//!
//! - Depends only on `sr-core` internally.
//! - No I/O outside [`source`], [`config`], [`lint`] and [`validate`].

pub mod compare;
pub mod config;
pub mod drift;
pub mod extract;
pub mod inventory;
pub mod lint;
pub mod matrix;
pub mod node;
pub mod source;
pub mod summary;
pub mod type_map;
pub mod validate;
pub mod xsd;

pub use compare::{compare, CompareOptions, ComparisonReport};
pub use config::{CompareConfig, ConfigError};
pub use drift::{report_section, DriftRow, SectionChecklist, SectionReport};
pub use extract::{
    ContextExtractor, Extraction, Extractor, JsonSchemaExtractor, MetaSchemaExtractor,
    XsdExtractor,
};
pub use inventory::{FlatFieldSet, Inventories, PathSet};
pub use lint::{Finding, LintReport, SchemaLinter, Severity};
pub use matrix::{Presence, PresenceMatrix};
pub use node::SchemaNode;
pub use source::{LoadedSources, SourceLayout};
pub use summary::{preview, GlobalSummary, Preview, DEFAULT_PREVIEW_LIMIT};
pub use type_map::{SectionPrefix, XsdTypeMap};
pub use validate::{ResumeValidationError, ResumeValidator, ResumeViolation, ValidationOutcome};
pub use xsd::XsdDocument;
