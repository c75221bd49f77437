//! # Resume Validation
//!
//! Validates resume documents against `schema.json` using the `jsonschema`
//! crate (Draft 7, format assertions enabled).
//!
//! ## Reference Resolution
//!
//! Internal `$ref`s (`#/definitions/iso8601`) are resolved by `jsonschema`
//! natively. Any other `$ref` URI is resolved against schemas loaded from
//! disk alongside the resume schema, keyed by their `$id` and by file name.
//! A URI that matches nothing resolves to the permissive schema `{}`, so
//! validation never reaches the network.
//!
//! ## Violations
//!
//! Each violation carries the JSON Pointer of the offending value, the
//! schema path that rejected it, the keyword at the end of that path
//! (`type`, `required`, `format`, …) and, when the pointer resolves within
//! the root schema, the keyword's value.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use jsonschema::{Retrieve, Uri, Validator};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Resolves remote `$ref`s to schemas held in memory.
struct LocalSchemaRetriever {
    schemas_by_uri: HashMap<String, Value>,
}

impl Retrieve for LocalSchemaRetriever {
    fn retrieve(&self, uri: &Uri<&str>) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str();
        if let Some(value) = self.schemas_by_uri.get(uri_str) {
            return Ok(value.clone());
        }
        let filename = uri_str.rsplit('/').next().unwrap_or(uri_str);
        if let Some(value) = self.schemas_by_uri.get(filename) {
            return Ok(value.clone());
        }
        tracing::debug!(uri = uri_str, "unresolved $ref, using permissive schema");
        Ok(serde_json::json!({}))
    }
}

/// Errors preparing a validator or loading a document.
#[derive(Error, Debug)]
pub enum ResumeValidationError {
    /// The schema file could not be read or is not JSON.
    #[error("schema load error for '{}': {reason}", path.display())]
    SchemaLoad {
        /// Schema file path.
        path: PathBuf,
        /// Why it could not be loaded.
        reason: String,
    },

    /// The schema is not a valid Draft 7 schema.
    #[error("validator build error: {reason}")]
    Build {
        /// Compiler diagnostic.
        reason: String,
    },

    /// A resume document could not be read or parsed.
    #[error("document load error for '{path}': {reason}")]
    DocumentLoad {
        /// Document path, or `<string>` for inline JSON.
        path: String,
        /// Why it could not be loaded.
        reason: String,
    },
}

/// One schema violation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumeViolation {
    /// JSON Pointer to the violating value; empty for the document root.
    pub instance_path: String,
    /// Human-readable description.
    pub message: String,
    /// JSON Pointer within the schema to the failing keyword.
    pub schema_path: String,
    /// The failing keyword.
    pub rule: String,
    /// The keyword's value in the schema, when resolvable.
    pub rule_value: Option<Value>,
}

impl fmt::Display for ResumeViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "(root): {} [{}]", self.message, self.rule)
        } else {
            write!(f, "{}: {} [{}]", self.instance_path, self.message, self.rule)
        }
    }
}

/// Result of validating one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationOutcome {
    /// True iff there are no violations.
    pub valid: bool,
    /// Every violation, in the order `jsonschema` reports them.
    pub errors: Vec<ResumeViolation>,
}

/// A compiled resume schema.
pub struct ResumeValidator {
    schema: Value,
    validator: Validator,
}

impl fmt::Debug for ResumeValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResumeValidator")
            .field("schema_id", &self.schema.get("$id"))
            .finish_non_exhaustive()
    }
}

impl ResumeValidator {
    /// Compile `schema` with no other schemas available for `$ref`s.
    ///
    /// # Errors
    ///
    /// [`ResumeValidationError::Build`] if the schema does not compile.
    pub fn from_schema(schema: Value) -> Result<Self, ResumeValidationError> {
        Self::compile(schema, HashMap::new())
    }

    /// Load and compile a schema file. Every other `*.json` file in the
    /// same directory is registered for `$ref` resolution.
    ///
    /// # Errors
    ///
    /// [`ResumeValidationError::SchemaLoad`] if the file cannot be read or
    /// parsed, [`ResumeValidationError::Build`] if it does not compile.
    pub fn from_file(path: &Path) -> Result<Self, ResumeValidationError> {
        let schema = load_schema(path)?;
        let mut schemas_by_uri = HashMap::new();

        let dir = match path.parent() {
            Some(d) if !d.as_os_str().is_empty() => d,
            _ => Path::new("."),
        };
        if dir.is_dir() {
            let entries = std::fs::read_dir(dir).map_err(|e| ResumeValidationError::SchemaLoad {
                path: dir.to_path_buf(),
                reason: format!("cannot read schema directory: {e}"),
            })?;
            for sibling in entries.filter_map(Result::ok).map(|e| e.path()) {
                if sibling == path || sibling.extension().and_then(|e| e.to_str()) != Some("json") {
                    continue;
                }
                match load_schema(&sibling) {
                    Ok(value) => register(&mut schemas_by_uri, &sibling, value),
                    Err(e) => tracing::debug!(error = %e, "skipping sibling schema"),
                }
            }
        }

        tracing::debug!(path = %path.display(), resources = schemas_by_uri.len(), "loaded resume schema");
        Self::compile(schema, schemas_by_uri)
    }

    fn compile(schema: Value, schemas_by_uri: HashMap<String, Value>) -> Result<Self, ResumeValidationError> {
        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft7);
        opts.should_validate_formats(true);
        opts.with_retriever(LocalSchemaRetriever { schemas_by_uri });
        let validator = opts.build(&schema).map_err(|e| ResumeValidationError::Build {
            reason: e.to_string(),
        })?;
        Ok(Self { schema, validator })
    }

    /// The schema being validated against.
    pub fn schema(&self) -> &Value {
        &self.schema
    }

    /// Validate a parsed document.
    pub fn validate(&self, instance: &Value) -> ValidationOutcome {
        let errors: Vec<ResumeViolation> = self
            .validator
            .iter_errors(instance)
            .map(|e| {
                let schema_path = e.schema_path.to_string();
                let rule = schema_path.rsplit('/').next().unwrap_or_default().to_string();
                ResumeViolation {
                    instance_path: e.instance_path.to_string(),
                    message: e.to_string(),
                    rule_value: self.schema.pointer(&schema_path).cloned(),
                    schema_path,
                    rule,
                }
            })
            .collect();
        ValidationOutcome {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Validate a JSON document given as text.
    ///
    /// # Errors
    ///
    /// [`ResumeValidationError::DocumentLoad`] if the text is not JSON.
    pub fn validate_str(&self, json: &str) -> Result<ValidationOutcome, ResumeValidationError> {
        let instance: Value = serde_json::from_str(json).map_err(|e| ResumeValidationError::DocumentLoad {
            path: "<string>".to_string(),
            reason: format!("invalid JSON: {e}"),
        })?;
        Ok(self.validate(&instance))
    }

    /// Validate a document file. `.yaml`/`.yml` files are read as YAML,
    /// anything else as JSON.
    ///
    /// # Errors
    ///
    /// [`ResumeValidationError::DocumentLoad`] if the file cannot be read
    /// or parsed.
    pub fn validate_file(&self, path: &Path) -> Result<ValidationOutcome, ResumeValidationError> {
        let load_error = |reason: String| ResumeValidationError::DocumentLoad {
            path: path.display().to_string(),
            reason,
        };
        let content = std::fs::read_to_string(path).map_err(|e| load_error(format!("cannot read file: {e}")))?;
        let instance: Value = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => {
                serde_yaml::from_str(&content).map_err(|e| load_error(format!("invalid YAML: {e}")))?
            }
            _ => serde_json::from_str(&content).map_err(|e| load_error(format!("invalid JSON: {e}")))?,
        };
        Ok(self.validate(&instance))
    }
}

fn load_schema(path: &Path) -> Result<Value, ResumeValidationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ResumeValidationError::SchemaLoad {
        path: path.to_path_buf(),
        reason: format!("cannot read file: {e}"),
    })?;
    serde_json::from_str(&content).map_err(|e| ResumeValidationError::SchemaLoad {
        path: path.to_path_buf(),
        reason: format!("invalid JSON: {e}"),
    })
}

fn register(schemas_by_uri: &mut HashMap<String, Value>, path: &Path, value: Value) {
    if let Some(id) = value.get("$id").and_then(Value::as_str) {
        schemas_by_uri.insert(id.to_string(), value.clone());
    }
    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        schemas_by_uri.insert(name.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> Value {
        json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "type": "object",
            "required": ["basics"],
            "definitions": {
                "iso8601": {"type": "string", "pattern": "^[1-2][0-9]{3}(-[0-1][0-9](-[0-3][0-9])?)?$"}
            },
            "properties": {
                "basics": {
                    "type": "object",
                    "properties": {
                        "name": {"type": "string"},
                        "email": {"type": "string", "format": "email"}
                    }
                },
                "work": {
                    "type": "array",
                    "items": {"type": "object", "properties": {"startDate": {"$ref": "#/definitions/iso8601"}}}
                }
            }
        })
    }

    fn validator() -> ResumeValidator {
        ResumeValidator::from_schema(schema()).unwrap()
    }

    #[test]
    fn valid_resume_has_no_errors() {
        let outcome = validator().validate(&json!({
            "basics": {"name": "Ada", "email": "ada@example.org"},
            "work": [{"startDate": "2020-01"}]
        }));
        assert!(outcome.valid);
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn wrong_type_reports_path_and_rule() {
        let outcome = validator().validate(&json!({"basics": {"name": 42}}));
        assert!(!outcome.valid);
        assert_eq!(outcome.errors.len(), 1);
        let err = &outcome.errors[0];
        assert_eq!(err.instance_path, "/basics/name");
        assert_eq!(err.rule, "type");
        assert_eq!(err.schema_path, "/properties/basics/properties/name/type");
        assert_eq!(err.rule_value, Some(json!("string")));
    }

    #[test]
    fn missing_required_is_reported_at_root() {
        let outcome = validator().validate(&json!({}));
        let err = &outcome.errors[0];
        assert_eq!(err.instance_path, "");
        assert_eq!(err.rule, "required");
        assert_eq!(err.rule_value, Some(json!(["basics"])));
        assert!(err.to_string().starts_with("(root): "));
    }

    #[test]
    fn formats_are_asserted() {
        let outcome = validator().validate(&json!({"basics": {"email": "not-an-email"}}));
        assert!(!outcome.valid);
        assert_eq!(outcome.errors[0].rule, "format");
    }

    #[test]
    fn validate_str_rejects_malformed_json() {
        let v = validator();
        assert!(v.validate_str(r#"{"basics": {}}"#).unwrap().valid);
        assert!(matches!(
            v.validate_str("{"),
            Err(ResumeValidationError::DocumentLoad { .. })
        ));
    }

    #[test]
    fn validate_file_reads_json_and_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("resume.json");
        std::fs::write(&json_path, r#"{"basics": {"name": "Ada"}}"#).unwrap();
        let yaml_path = dir.path().join("resume.yaml");
        std::fs::write(&yaml_path, "basics:\n  name: 7\n").unwrap();

        let v = validator();
        assert!(v.validate_file(&json_path).unwrap().valid);
        let yaml = v.validate_file(&yaml_path).unwrap();
        assert_eq!(yaml.errors[0].rule, "type");
        assert!(v.validate_file(&dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn from_file_resolves_sibling_refs() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("date.json"),
            r#"{"$id": "https://example.org/date.json", "type": "string", "pattern": "^[0-9]{4}$"}"#,
        )
        .unwrap();
        let schema_path = dir.path().join("schema.json");
        std::fs::write(
            &schema_path,
            r#"{"type": "object", "properties": {"year": {"$ref": "https://example.org/date.json"}}}"#,
        )
        .unwrap();

        let v = ResumeValidator::from_file(&schema_path).unwrap();
        assert!(v.validate(&json!({"year": "2024"})).valid);
        assert!(!v.validate(&json!({"year": "24"})).valid);
    }

    #[test]
    fn unreadable_schema_is_a_load_error() {
        let err = ResumeValidator::from_file(Path::new("/nonexistent/schema.json")).unwrap_err();
        assert!(matches!(err, ResumeValidationError::SchemaLoad { .. }));
    }

    #[test]
    fn outcome_serializes_with_rule_fields() {
        let outcome = validator().validate(&json!({"basics": {"name": 1}}));
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["valid"], false);
        assert_eq!(json["errors"][0]["rule"], "type");
        assert_eq!(json["errors"][0]["instance_path"], "/basics/name");
    }
}
