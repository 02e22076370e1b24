//! `kinfolk.toml` configuration.
//!
//! # Example
//!
//! ```toml
//! [import]
//! strictness = "strict"
//! endpoints = "person_id"
//! default_tree_name = "Family Archive"
//! description = "Imported from the county records export"
//! ```
//!
//! Every key is optional. Command-line flags override the file.

use std::path::{Path, PathBuf};

use kinfolk_core::{ImportError, ImportOptions};
use serde::{Deserialize, Serialize};

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "kinfolk.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KinfolkConfig {
    /// `[import]` section: options handed to the importer.
    #[serde(default)]
    pub import: ImportOptions,
}

/// Read and parse a config TOML file from `path`.
pub fn read_config(path: &Path) -> Result<KinfolkConfig, ImportError> {
    let content = std::fs::read_to_string(path).map_err(|e| ImportError::Config {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    toml::from_str(&content).map_err(|e| ImportError::Config {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// The explicit file if given, else `kinfolk.toml` when present, else defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<KinfolkConfig, ImportError> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !fallback.is_file() {
                return Ok(KinfolkConfig::default());
            }
            fallback
        }
    };
    tracing::debug!(path = %path.display(), "loading configuration");
    read_config(&path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinfolk_core::{EndpointMode, Strictness};
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn parses_import_section() {
        let f = write_temp(
            "[import]\nstrictness = \"strict\"\nendpoints = \"person_id\"\ndefault_tree_name = \"Archive\"\n",
        );
        let config = read_config(f.path()).unwrap();
        assert_eq!(config.import.strictness, Strictness::Strict);
        assert_eq!(config.import.endpoints, EndpointMode::PersonId);
        assert_eq!(config.import.default_tree_name, "Archive");
    }

    #[test]
    fn empty_file_gives_defaults() {
        let f = write_temp("");
        assert_eq!(read_config(f.path()).unwrap(), KinfolkConfig::default());
    }

    #[test]
    fn bad_value_is_a_config_error() {
        let f = write_temp("[import]\nstrictness = \"paranoid\"\n");
        let err = read_config(f.path()).unwrap_err();
        assert!(matches!(err, ImportError::Config { .. }));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = load_config(Some(Path::new("/no/such/kinfolk.toml"))).unwrap_err();
        assert_eq!(err.kind(), "config");
    }
}
