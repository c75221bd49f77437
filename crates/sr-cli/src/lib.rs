//! # sr-cli — Schema Resume Drift Toolkit CLI
//!
//! Provides the `sr` command-line interface over `sr-schema`.
//!
//! ## Subcommands
//!
//! - `sr compare` — Field presence across the four representations
//!   (the default when no subcommand is given).
//! - `sr lint` — Structural checks on each representation file.
//! - `sr validate` — Validate resume documents against `schema.json`.
//!
//! ```bash
//! sr
//! sr --base-dir ../schema-resume compare --json
//! sr lint
//! sr validate resume.json --schema schema.json
//! ```
//!
//! ## Exit Codes
//!
//! | Code | Meaning                                           |
//! |------|---------------------------------------------------|
//! | 0    | Success (`compare` is informational and always 0) |
//! | 1    | Lint errors or invalid resumes                    |
//! | 2    | Operational failure (unreadable config, bad schema) |
//!
//! ## Crate Policy
//!
//! - Argument parsing lives here; comparison, linting and validation live
//!   in `sr-schema`.
//! - Reports go to stdout, logs to stderr.

pub mod compare;
pub mod lint;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sr_schema::CompareConfig;

/// Exit code for operational failures.
pub const EXIT_OPERATIONAL: u8 = 2;

/// Resolve a path that may be relative to the base directory.
///
/// Absolute paths are returned as-is. A relative path that exists under
/// `base_dir` resolves there; otherwise it is taken relative to the
/// current directory.
pub fn resolve_path(path: &Path, base_dir: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    let base_relative = base_dir.join(path);
    if base_relative.exists() {
        base_relative
    } else {
        path.to_path_buf()
    }
}

/// Load the comparison config, or the defaults when none is given.
pub fn load_config(path: Option<&Path>, base_dir: &Path) -> Result<CompareConfig> {
    let Some(path) = path else {
        return Ok(CompareConfig::default());
    };
    let path = resolve_path(path, base_dir);
    CompareConfig::load(&path).with_context(|| format!("failed to load config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_path_absolute_path_returned_as_is() {
        let result = resolve_path(Path::new("/absolute/sr.yaml"), Path::new("/some/base"));
        assert_eq!(result, PathBuf::from("/absolute/sr.yaml"));
    }

    #[test]
    fn resolve_path_prefers_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("sr.yaml"), b"max_depth: 1\n").unwrap();
        assert_eq!(resolve_path(Path::new("sr.yaml"), dir.path()), dir.path().join("sr.yaml"));
    }

    #[test]
    fn resolve_path_falls_back_to_cwd() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(resolve_path(Path::new("missing.yaml"), dir.path()), PathBuf::from("missing.yaml"));
    }

    #[test]
    fn load_config_defaults_without_path() {
        let config = load_config(None, Path::new(".")).unwrap();
        assert_eq!(config, CompareConfig::default());
    }

    #[test]
    fn load_config_reads_base_relative_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("sr.yaml"), b"preview_limit: 4\n").unwrap();
        let config = load_config(Some(Path::new("sr.yaml")), dir.path()).unwrap();
        assert_eq!(config.preview_limit, 4);
    }

    #[test]
    fn load_config_reports_unknown_keys() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("sr.yaml"), b"colour: red\n").unwrap();
        let err = load_config(Some(Path::new("sr.yaml")), dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("failed to load config"));
    }
}
