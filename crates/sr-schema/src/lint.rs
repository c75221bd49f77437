//! # Schema Linter
//!
//! Structural checks on each representation file, independent of the
//! cross-representation comparison. Every check produces a [`Finding`]
//! tagged with the file it concerns and a [`Severity`]. A lint run passes
//! iff it produced no errors.
//!
//! ## Checks
//!
//! | File               | Errors                                   | Warnings                                     |
//! |--------------------|------------------------------------------|----------------------------------------------|
//! | `schema.json`      | missing `$schema`/`$id`/`properties`, bad `iso8601` regex | no `basics`, basics without `name`/`email`/`phone`, no `definitions` |
//! | `context.jsonld`   | missing `@context`                       | missing `schema`/`xsd` namespace, non-URL `@vocab`, non-standard `@id` |
//! | `meta-schema.json` | missing `$schema`/`$id`/`properties`     | not self-referential, missing standard definitions or keywords |
//! | XSD                | root is not `xs:schema`                  | no `targetNamespace`, no top-level element, no `BasicsType`, unknown type prefix |
//!
//! A missing or unparseable file is an error for that file only; the
//! remaining files are still linted.
//!
//! The `iso8601` pattern is compiled with the `regex` crate, whose syntax
//! has no lookaround and no backreferences. A pattern using either is
//! reported as invalid even though backtracking engines accept it.
//!
//! A string `@context` is a remote reference; it is not fetched, so the
//! namespace and mapping checks are skipped with a warning.

use std::fmt;

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use sr_core::RepresentationId;

use crate::extract::context::is_field_key;
use crate::source::{read_json, read_xsd, SourceLayout};
use crate::xsd::XsdDocument;

/// Top-level keys every JSON Schema and meta-schema must declare.
const REQUIRED_SCHEMA_KEYS: &[&str] = &["$schema", "$id", "properties"];

/// Fields a `basics` section should always carry.
const RECOMMENDED_BASICS_FIELDS: &[&str] = &["name", "email", "phone"];

/// Namespace prefixes the context must declare.
const REQUIRED_NAMESPACES: &[&str] = &["schema", "xsd"];

/// Accepted `@id` prefixes for context mappings.
const STANDARD_ID_PREFIXES: &[&str] = &["schema:", "xsd:", "rdf:", "rdfs:"];

/// Non-standard `@id` mappings listed per warning.
const NON_STANDARD_ID_PREVIEW: usize = 5;

/// Definitions a draft-07 style meta-schema is expected to provide.
const STANDARD_META_DEFINITIONS: &[&str] =
    &["schemaArray", "nonNegativeInteger", "simpleTypes", "stringArray"];

/// Core JSON Schema keywords the meta-schema should describe.
const CORE_META_KEYWORDS: &[&str] = &["type", "properties", "items", "required", "enum", "pattern"];

/// Type prefixes the XSD may reference.
const KNOWN_TYPE_PREFIXES: &[&str] = &["xs", "sr"];

/// Complex type whose element count is reported.
const BASICS_TYPE: &str = "BasicsType";

/// How serious a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Fails the lint run.
    Error,
    /// Worth fixing, does not fail the run.
    Warning,
    /// A passed check or a count.
    Info,
}

impl Severity {
    /// All severities, most serious first.
    pub fn all() -> &'static [Severity] {
        &[Self::Error, Self::Warning, Self::Info]
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        };
        f.write_str(s)
    }
}

/// One lint result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// The file the finding concerns.
    pub file: RepresentationId,
    /// How serious it is.
    pub severity: Severity,
    /// What was found.
    pub message: String,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.file.file_name(), self.message)
    }
}

/// All findings of one lint run, in check order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LintReport {
    findings: Vec<Finding>,
}

impl LintReport {
    /// Every finding.
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Findings of one severity.
    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.severity == severity)
    }

    /// Findings for one file.
    pub fn for_file(&self, file: RepresentationId) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.file == file)
    }

    /// Number of findings of one severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.with_severity(severity).count()
    }

    /// True iff there are no errors.
    pub fn passed(&self) -> bool {
        self.count(Severity::Error) == 0
    }

    fn push(&mut self, file: RepresentationId, severity: Severity, message: impl Into<String>) {
        self.findings.push(Finding {
            file,
            severity,
            message: message.into(),
        });
    }
}

/// Lints the four representation files under one layout.
#[derive(Debug, Clone)]
pub struct SchemaLinter {
    layout: SourceLayout,
}

impl SchemaLinter {
    /// Linter for the files under `layout`.
    pub fn new(layout: SourceLayout) -> Self {
        Self { layout }
    }

    /// Run every check on every file.
    pub fn lint_all(&self) -> LintReport {
        let mut report = LintReport::default();
        self.lint_schema(&mut report);
        self.lint_context(&mut report);
        self.lint_meta_schema(&mut report);
        self.lint_xsd(&mut report);
        tracing::info!(
            errors = report.count(Severity::Error),
            warnings = report.count(Severity::Warning),
            "lint complete"
        );
        report
    }

    fn load_json(&self, file: RepresentationId, report: &mut LintReport) -> Option<Value> {
        match read_json(&self.layout, file) {
            Ok(value) => {
                report.push(file, Severity::Info, "valid JSON syntax");
                Some(value)
            }
            Err(e) => {
                tracing::debug!(file = %file, error = %e, "lint load failed");
                report.push(file, Severity::Error, e.to_string());
                None
            }
        }
    }

    fn lint_schema(&self, report: &mut LintReport) {
        let file = RepresentationId::JsonSchema;
        let Some(doc) = self.load_json(file, report) else {
            return;
        };
        check_required_keys(&doc, file, report);

        if let Some(properties) = doc.get("properties").and_then(Value::as_object) {
            report.push(file, Severity::Info, format!("contains {} top-level properties", properties.len()));
            match properties.get("basics") {
                None => report.push(file, Severity::Warning, "missing 'basics' section"),
                Some(basics) => {
                    if let Some(fields) = basics.get("properties").and_then(Value::as_object) {
                        report.push(file, Severity::Info, format!("basics section has {} fields", fields.len()));
                        for field in RECOMMENDED_BASICS_FIELDS {
                            if !fields.contains_key(*field) {
                                report.push(file, Severity::Warning, format!("basics missing recommended field: {field}"));
                            }
                        }
                    }
                }
            }
        }

        match doc.get("definitions").and_then(Value::as_object) {
            Some(definitions) => {
                report.push(file, Severity::Info, format!("contains {} definitions", definitions.len()));
                let pattern = definitions
                    .get("iso8601")
                    .and_then(|d| d.get("pattern"))
                    .and_then(Value::as_str);
                if let Some(pattern) = pattern {
                    match Regex::new(pattern) {
                        Ok(_) => report.push(file, Severity::Info, "iso8601 pattern is a valid regex"),
                        Err(e) => report.push(file, Severity::Error, format!("invalid iso8601 regex pattern: {e}")),
                    }
                }
            }
            None => report.push(file, Severity::Warning, "no definitions section found"),
        }
    }

    fn lint_context(&self, report: &mut LintReport) {
        let file = RepresentationId::JsonLdContext;
        let Some(doc) = self.load_json(file, report) else {
            return;
        };
        if let Some(Value::String(remote)) = doc.get("@context") {
            report.push(file, Severity::Warning, format!("remote @context not inspected: {remote}"));
            return;
        }
        let Some(context) = context_map(&doc) else {
            report.push(file, Severity::Error, "missing required '@context' field");
            return;
        };
        report.push(file, Severity::Info, "has '@context' field");

        for ns in REQUIRED_NAMESPACES {
            if context.contains_key(*ns) {
                report.push(file, Severity::Info, format!("has namespace: {ns}"));
            } else {
                report.push(file, Severity::Warning, format!("missing namespace: {ns}"));
            }
        }

        if let Some(vocab) = context.get("@vocab") {
            match vocab.as_str() {
                Some(url) if url.starts_with("http://") || url.starts_with("https://") => {
                    report.push(file, Severity::Info, "@vocab is a URL");
                }
                _ => report.push(file, Severity::Warning, format!("@vocab should be a URL: {vocab}")),
            }
        }

        let mappings = context.keys().filter(|k| is_field_key(k)).count();
        report.push(file, Severity::Info, format!("contains {mappings} field mappings"));

        let non_standard: Vec<&str> = context
            .iter()
            .filter(|(_, value)| {
                value
                    .get("@id")
                    .and_then(Value::as_str)
                    .is_some_and(|id| !STANDARD_ID_PREFIXES.iter().any(|p| id.starts_with(p)))
            })
            .map(|(key, _)| key.as_str())
            .collect();
        if !non_standard.is_empty() {
            let shown = &non_standard[..non_standard.len().min(NON_STANDARD_ID_PREVIEW)];
            report.push(
                file,
                Severity::Warning,
                format!("fields with non-standard @id: {}", shown.join(", ")),
            );
        }
    }

    fn lint_meta_schema(&self, report: &mut LintReport) {
        let file = RepresentationId::MetaSchema;
        let Some(doc) = self.load_json(file, report) else {
            return;
        };
        check_required_keys(&doc, file, report);

        if let (Some(schema), Some(id)) = (doc.get("$schema"), doc.get("$id")) {
            if schema == id {
                report.push(file, Severity::Info, "self-referential meta-schema");
            } else {
                report.push(file, Severity::Warning, "$schema and $id differ (not self-referential)");
            }
        }

        if let Some(definitions) = doc.get("definitions").and_then(Value::as_object) {
            report.push(file, Severity::Info, format!("contains {} definitions", definitions.len()));
            for name in STANDARD_META_DEFINITIONS {
                if !definitions.contains_key(*name) {
                    report.push(file, Severity::Warning, format!("missing standard definition: {name}"));
                }
            }
        }

        if let Some(properties) = doc.get("properties").and_then(Value::as_object) {
            report.push(file, Severity::Info, format!("contains {} property definitions", properties.len()));
            for keyword in CORE_META_KEYWORDS {
                if !properties.contains_key(*keyword) {
                    report.push(file, Severity::Warning, format!("missing JSON Schema keyword: {keyword}"));
                }
            }
        }
    }

    fn lint_xsd(&self, report: &mut LintReport) {
        let file = RepresentationId::Xsd;
        let doc = match read_xsd(&self.layout) {
            Ok(doc) => doc,
            Err(e) => {
                report.push(file, Severity::Error, e.to_string());
                return;
            }
        };
        report.push(file, Severity::Info, "valid XML syntax");
        lint_xsd_document(&doc, report);
    }
}

fn check_required_keys(doc: &Value, file: RepresentationId, report: &mut LintReport) {
    for key in REQUIRED_SCHEMA_KEYS {
        if doc.get(*key).is_some() {
            report.push(file, Severity::Info, format!("has required field: {key}"));
        } else {
            report.push(file, Severity::Error, format!("missing required field: {key}"));
        }
    }
}

/// The `@context` mapping; inline objects of a context array are merged.
fn context_map(doc: &Value) -> Option<Map<String, Value>> {
    match doc.get("@context")? {
        Value::Object(map) => Some(map.clone()),
        Value::Array(entries) => Some(
            entries
                .iter()
                .filter_map(Value::as_object)
                .flat_map(|m| m.iter().map(|(k, v)| (k.clone(), v.clone())))
                .collect(),
        ),
        _ => None,
    }
}

fn lint_xsd_document(doc: &XsdDocument, report: &mut LintReport) {
    let file = RepresentationId::Xsd;

    if doc.root.is_xsd("schema") {
        report.push(file, Severity::Info, "root element is xs:schema");
    } else {
        report.push(file, Severity::Error, format!("root element should be xs:schema, got {}", doc.root));
    }

    match &doc.target_namespace {
        Some(ns) => report.push(file, Severity::Info, format!("has targetNamespace: {ns}")),
        None => report.push(file, Severity::Warning, "missing targetNamespace"),
    }

    report.push(
        file,
        Severity::Info,
        format!("contains {} complexType definitions", doc.complex_types.len()),
    );
    if doc.simple_type_count > 0 {
        report.push(
            file,
            Severity::Info,
            format!("contains {} simpleType definitions", doc.simple_type_count),
        );
    }

    if doc.top_level_elements.is_empty() {
        report.push(file, Severity::Warning, "no root element defined");
    } else {
        report.push(
            file,
            Severity::Info,
            format!("contains {} root element(s)", doc.top_level_elements.len()),
        );
    }

    match doc.complex_type(BASICS_TYPE) {
        Some(basics) => report.push(
            file,
            Severity::Info,
            format!("{BASICS_TYPE} has {} elements", basics.elements.len()),
        ),
        None => report.push(file, Severity::Warning, format!("{BASICS_TYPE} not found")),
    }

    for element in &doc.elements {
        if let (Some(prefix), Some(type_ref)) = (element.type_prefix(), element.type_ref.as_deref()) {
            if !KNOWN_TYPE_PREFIXES.contains(&prefix) {
                report.push(file, Severity::Warning, format!("unknown type prefix: {type_ref}"));
            }
        }
    }
}
