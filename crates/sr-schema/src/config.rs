//! # Comparison Configuration
//!
//! Optional YAML file tuning a comparison run. Every key is optional and
//! the defaults reproduce the built-in behavior:
//!
//! ```yaml
//! preview_limit: 10
//! max_depth: 2
//! sections:
//!   - key: basics
//!     fields: [name, email]
//! xsd_types:
//!   CustomType: work[].custom
//! ```
//!
//! `sections` replaces the built-in checklists when present. `xsd_types`
//! is layered over the built-in type map. Unknown keys are rejected.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use sr_core::PathError;
use thiserror::Error;

use crate::drift::SectionChecklist;
use crate::extract::json_schema::DEFAULT_MAX_DEPTH;
use crate::summary::DEFAULT_PREVIEW_LIMIT;
use crate::type_map::XsdTypeMap;

/// Errors loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read config {}: {source}", path.display())]
    Read {
        /// Config file path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not valid configuration YAML.
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        /// Config file path.
        path: PathBuf,
        /// YAML diagnostic.
        source: serde_yaml::Error,
    },

    /// An `xsd_types` entry names an invalid section prefix.
    #[error("invalid xsd_types entry: {0}")]
    TypeMap(#[from] PathError),
}

/// Tunables for one comparison run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompareConfig {
    /// Entries shown per truncated summary list.
    pub preview_limit: usize,
    /// JSON Schema traversal depth.
    pub max_depth: usize,
    /// Checklists replacing the built-in ones.
    pub sections: Option<Vec<SectionChecklist>>,
    /// Complex type → section prefix, layered over the built-in map.
    pub xsd_types: BTreeMap<String, String>,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            preview_limit: DEFAULT_PREVIEW_LIMIT,
            max_depth: DEFAULT_MAX_DEPTH,
            sections: None,
            xsd_types: BTreeMap::new(),
        }
    }
}

impl CompareConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Read`] if the file cannot be read,
    /// [`ConfigError::Parse`] if it is not valid configuration.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Parse configuration from YAML text. An empty document yields the defaults.
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    /// The checklists to report on.
    pub fn checklists(&self) -> Vec<SectionChecklist> {
        self.sections.clone().unwrap_or_else(SectionChecklist::standard)
    }

    /// The built-in type map with `xsd_types` layered on top.
    ///
    /// # Errors
    ///
    /// [`ConfigError::TypeMap`] if an entry is not a valid prefix.
    pub fn type_map(&self) -> Result<XsdTypeMap, ConfigError> {
        let overrides = self.xsd_types.iter().map(|(k, v)| (k.as_str(), v.as_str()));
        Ok(XsdTypeMap::standard_with(overrides)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_document_gives_defaults() {
        let config = CompareConfig::from_yaml("").unwrap();
        assert_eq!(config, CompareConfig::default());
        assert_eq!(config.preview_limit, 10);
        assert_eq!(config.max_depth, 2);
        assert_eq!(config.checklists().len(), 3);
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let config = CompareConfig::from_yaml("preview_limit: 3\n").unwrap();
        assert_eq!(config.preview_limit, 3);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn sections_replace_builtin_checklists() {
        let config = CompareConfig::from_yaml(
            "sections:\n  - key: work[]\n    fields: [position, name]\n",
        )
        .unwrap();
        let checklists = config.checklists();
        assert_eq!(checklists.len(), 1);
        assert_eq!(checklists[0].section().as_str(), "work[]");
    }

    #[test]
    fn xsd_types_layer_over_builtin_map() {
        let config = CompareConfig::from_yaml("xsd_types:\n  CustomType: work[].custom\n").unwrap();
        let map = config.type_map().unwrap();
        assert_eq!(
            map.section_for("CustomType").map(|s| s.as_path().to_string()),
            Some("work[].custom".to_string())
        );
        assert!(map.section_for("BasicsType").is_some());
    }

    #[test]
    fn invalid_type_prefix_is_rejected() {
        let config = CompareConfig::from_yaml("xsd_types:\n  Bad: \"a..b\"\n").unwrap();
        assert!(matches!(config.type_map(), Err(ConfigError::TypeMap(_))));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(CompareConfig::from_yaml("preview: 3\n").is_err());
    }

    #[test]
    fn load_reads_file_and_reports_missing() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_depth: 4").unwrap();
        let config = CompareConfig::load(file.path()).unwrap();
        assert_eq!(config.max_depth, 4);

        let missing = CompareConfig::load(Path::new("/nonexistent/sr.yaml"));
        assert!(matches!(missing, Err(ConfigError::Read { .. })));
    }
}
