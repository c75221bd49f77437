//! # Comparison Run
//!
//! One pass over a base directory: load the four representations, extract
//! their inventories, build the presence matrix, then report each section
//! checklist and the global summary.
//!
//! Load and extraction problems are collected in
//! [`ComparisonReport::issues`]; a failing representation contributes an
//! empty inventory and the run always completes.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;
use sr_core::{RepresentationId, SourceError};

use crate::config::{CompareConfig, ConfigError};
use crate::drift::{report_section, SectionChecklist, SectionReport};
use crate::extract::{
    ContextExtractor, Extraction, Extractor, JsonSchemaExtractor, MetaSchemaExtractor,
    XsdExtractor,
};
use crate::inventory::Inventories;
use crate::matrix::PresenceMatrix;
use crate::node::SchemaNode;
use crate::source::{LoadedSources, SourceLayout};
use crate::summary::GlobalSummary;

/// Extractor configuration and checklists for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareOptions {
    /// JSON Schema walker.
    pub json_schema: JsonSchemaExtractor,
    /// XSD walker with its type map.
    pub xsd: XsdExtractor,
    /// Sections to report on.
    pub checklists: Vec<SectionChecklist>,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            json_schema: JsonSchemaExtractor::default(),
            xsd: XsdExtractor::default(),
            checklists: SectionChecklist::standard(),
        }
    }
}

impl CompareOptions {
    /// Options derived from a loaded configuration.
    ///
    /// # Errors
    ///
    /// [`ConfigError::TypeMap`] if an `xsd_types` entry is invalid.
    pub fn from_config(config: &CompareConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            json_schema: JsonSchemaExtractor::new(config.max_depth),
            xsd: XsdExtractor::new(config.type_map()?),
            checklists: config.checklists(),
        })
    }
}

/// Everything a comparison run found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonReport {
    /// Directory the representations were loaded from.
    pub base_dir: PathBuf,
    /// One presence table per checklist, in checklist order.
    pub sections: Vec<SectionReport>,
    /// Whole-inventory set differences.
    pub summary: GlobalSummary,
    /// Load failures and extraction warnings.
    pub issues: Vec<SourceError>,
    /// Whether each representation loaded.
    pub loaded: BTreeMap<RepresentationId, bool>,
    /// The matrix behind the section tables.
    #[serde(skip)]
    pub matrix: PresenceMatrix,
}

impl ComparisonReport {
    /// Flagged rows across every section.
    pub fn mismatch_count(&self) -> usize {
        self.sections.iter().map(SectionReport::mismatch_count).sum()
    }

    /// Issues that left a representation empty.
    pub fn failures(&self) -> impl Iterator<Item = &SourceError> {
        self.issues.iter().filter(|e| !e.is_warning())
    }
}

/// Run a comparison over the files under `layout`.
pub fn compare(layout: &SourceLayout, options: &CompareOptions) -> ComparisonReport {
    tracing::debug!(
        base_dir = %layout.base_dir().display(),
        max_depth = options.json_schema.max_depth(),
        mapped_types = options.xsd.type_map().len(),
        checklists = options.checklists.len(),
        "starting comparison"
    );
    let sources = LoadedSources::load(layout);
    let mut issues = sources.issues;

    let loaded = RepresentationId::all()
        .iter()
        .map(|rep| (*rep, !issues.iter().any(|e| e.representation() == *rep && !e.is_warning())))
        .collect();

    let json_schema = sources
        .json_schema
        .map(|v| run(&options.json_schema, &SchemaNode::from_value(&v), &mut issues))
        .unwrap_or_default();
    let context = sources
        .context
        .map(|v| run(&ContextExtractor, &v, &mut issues))
        .unwrap_or_default();
    let meta_schema = sources
        .meta_schema
        .map(|v| run(&MetaSchemaExtractor, &SchemaNode::from_value(&v), &mut issues))
        .unwrap_or_default();
    let xsd = sources
        .xsd
        .map(|doc| run(&options.xsd, &doc, &mut issues))
        .unwrap_or_default();

    let matrix = PresenceMatrix::build(Inventories {
        json_schema,
        context,
        meta_schema,
        xsd,
    });

    let sections = options
        .checklists
        .iter()
        .map(|checklist| report_section(&matrix, checklist))
        .collect();
    let summary = GlobalSummary::compute(&matrix);

    let report = ComparisonReport {
        base_dir: layout.base_dir().to_path_buf(),
        sections,
        summary,
        issues,
        loaded,
        matrix,
    };
    tracing::info!(
        rows = report.matrix.len(),
        drifting_rows = report.matrix.mismatches().count(),
        mismatches = report.mismatch_count(),
        issues = report.issues.len(),
        "comparison complete"
    );
    report
}

fn run<E: Extractor>(extractor: &E, document: &E::Document, issues: &mut Vec<SourceError>) -> E::Fields {
    let Extraction { fields, issues: found } = extractor.extract(document);
    tracing::debug!(representation = %extractor.representation(), issues = found.len(), "extracted");
    issues.extend(found);
    fields
}
