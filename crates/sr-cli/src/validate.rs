//! # Validate Subcommand
//!
//! Validates resume documents against `schema.json` (or `--schema`).
//! A document that cannot be read or parsed counts as invalid; the
//! remaining documents are still validated.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use sr_core::RepresentationId;
use sr_schema::{ResumeValidator, ResumeViolation, SourceLayout};

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Resume documents (JSON, or YAML by extension).
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Schema to validate against. Defaults to `schema.json` in the base directory.
    #[arg(long)]
    pub schema: Option<PathBuf>,

    /// Print results as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Validation result for one document.
#[derive(Debug, Serialize)]
pub struct FileResult {
    /// The document path.
    pub file: PathBuf,
    /// True iff the document loaded and had no violations.
    pub valid: bool,
    /// Schema violations.
    pub errors: Vec<ResumeViolation>,
    /// Why the document could not be validated at all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_error: Option<String>,
}

/// Execute the validate subcommand.
pub fn run_validate(args: &ValidateArgs, base_dir: &Path) -> Result<u8> {
    let schema_path = match &args.schema {
        Some(path) => crate::resolve_path(path, base_dir),
        None => SourceLayout::new(base_dir).path(RepresentationId::JsonSchema),
    };
    let validator = ResumeValidator::from_file(&schema_path)
        .with_context(|| format!("cannot use schema {}", schema_path.display()))?;

    let results: Vec<FileResult> = args.files.iter().map(|file| validate_one(&validator, file)).collect();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &results)?;
        writeln!(out)?;
    } else {
        render_results(&results, &mut out)?;
    }

    let all_valid = results.iter().all(|r| r.valid);
    tracing::info!(documents = results.len(), all_valid, "validation complete");
    Ok(if all_valid { 0 } else { 1 })
}

fn validate_one(validator: &ResumeValidator, file: &Path) -> FileResult {
    match validator.validate_file(file) {
        Ok(outcome) => FileResult {
            file: file.to_path_buf(),
            valid: outcome.valid,
            errors: outcome.errors,
            load_error: None,
        },
        Err(e) => {
            tracing::warn!(file = %file.display(), error = %e, "document not validated");
            FileResult {
                file: file.to_path_buf(),
                valid: false,
                errors: Vec::new(),
                load_error: Some(e.to_string()),
            }
        }
    }
}

/// Render one block per document.
pub fn render_results(results: &[FileResult], out: &mut impl Write) -> std::io::Result<()> {
    for result in results {
        match (&result.load_error, result.valid) {
            (Some(reason), _) => writeln!(out, "ERROR: {}: {reason}", result.file.display())?,
            (None, true) => writeln!(out, "OK: {}", result.file.display())?,
            (None, false) => {
                writeln!(out, "FAIL: {} ({} error(s))", result.file.display(), result.errors.len())?;
                for violation in &result.errors {
                    writeln!(out, "  {violation}")?;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &str = r#"{
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "properties": {"basics": {"type": "object", "properties": {"name": {"type": "string"}}}}
    }"#;

    fn setup() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("schema.json"), SCHEMA).unwrap();
        std::fs::write(dir.path().join("good.json"), r#"{"basics": {"name": "Ada"}}"#).unwrap();
        std::fs::write(dir.path().join("bad.json"), r#"{"basics": {"name": 1}}"#).unwrap();
        dir
    }

    fn args(files: &[&Path]) -> ValidateArgs {
        ValidateArgs {
            files: files.iter().map(|p| p.to_path_buf()).collect(),
            schema: None,
            json: false,
        }
    }

    #[test]
    fn valid_documents_exit_zero() {
        let dir = setup();
        let code = run_validate(&args(&[&dir.path().join("good.json")]), dir.path()).unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn any_invalid_document_exits_one() {
        let dir = setup();
        let files = [dir.path().join("good.json"), dir.path().join("bad.json")];
        let code = run_validate(&args(&[&files[0], &files[1]]), dir.path()).unwrap();
        assert_eq!(code, 1);
    }

    #[test]
    fn unreadable_document_counts_as_invalid() {
        let dir = setup();
        let validator = ResumeValidator::from_file(&dir.path().join("schema.json")).unwrap();
        let result = validate_one(&validator, &dir.path().join("absent.json"));
        assert!(!result.valid);
        assert!(result.load_error.is_some());
    }

    #[test]
    fn missing_schema_is_an_operational_error() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.json");
        assert!(run_validate(&args(&[&good]), dir.path()).is_err());
    }

    #[test]
    fn render_lists_violations_under_failures() {
        let dir = setup();
        let validator = ResumeValidator::from_file(&dir.path().join("schema.json")).unwrap();
        let results = vec![
            validate_one(&validator, &dir.path().join("good.json")),
            validate_one(&validator, &dir.path().join("bad.json")),
        ];
        let mut buf = Vec::new();
        render_results(&results, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("OK: "));
        assert!(text.contains("FAIL: "));
        assert!(text.contains("  /basics/name: "));
        assert!(text.contains("[type]"));
    }
}
