//! # sr-core — Foundational Types for the Schema Resume Drift Toolkit
//!
//! This crate defines the identifier space shared by every extractor and
//! reporter. It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **One path type.** Every field, from every representation, is named by
//!    a [`CanonicalPath`]. The rendered string is the identity key, and the
//!    list marker lives on the segment it marks so it can never dangle.
//!
//! 2. **Single [`RepresentationId`] enum.** Four variants, exhaustive `match`
//!    everywhere. Matrix columns, report headings and source locations all
//!    derive from it.
//!
//! 3. **Non-fatal source errors.** [`SourceError`] is recorded per
//!    representation; the comparison core always produces a best-effort
//!    report.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `sr-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod path;
pub mod representation;

// Re-export primary types for ergonomic imports.
pub use error::{PathError, SourceError};
pub use path::{canonicalize, CanonicalPath, Segment};
pub use representation::RepresentationId;
