//! CLI configuration.
//!
//! Read from `shortsql.toml` in the working directory, falling back to
//! `<config dir>/shortsql/config.toml`. Missing files mean defaults.
//!
//! ```toml
//! [output]
//! url_safe = true
//! format = "json"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ShortSqlError, ShortSqlResult};

/// Local config file name.
pub const LOCAL_CONFIG: &str = "shortsql.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Percent-encode rendered strings by default
    #[serde(default)]
    pub url_safe: bool,
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Plain,
    Json,
}

impl Config {
    /// Parse config from TOML text.
    pub fn from_toml(content: &str) -> ShortSqlResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load from an explicit path. The file must exist.
    pub fn from_path(path: &Path) -> ShortSqlResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ShortSqlError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Load from `explicit` if given, otherwise from the first default
    /// location that exists.
    pub fn load(explicit: Option<&Path>) -> ShortSqlResult<Self> {
        if let Some(path) = explicit {
            tracing::debug!(path = %path.display(), "loading config");
            return Self::from_path(path);
        }

        for path in default_paths() {
            if path.exists() {
                tracing::debug!(path = %path.display(), "loading config");
                return Self::from_path(&path);
            }
        }

        tracing::debug!("no config file found, using defaults");
        Ok(Self::default())
    }
}

/// Candidate config files, most specific first.
pub fn default_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_CONFIG)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("shortsql").join("config.toml"));
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert!(!config.output.url_safe);
        assert_eq!(config.output.format, OutputFormat::Plain);
    }

    #[test]
    fn test_output_section() {
        let config = Config::from_toml("[output]\nurl_safe = true\nformat = \"json\"\n").unwrap();
        assert!(config.output.url_safe);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_bad_format_is_error() {
        let err = Config::from_toml("[output]\nformat = \"yaml\"\n").unwrap_err();
        assert!(matches!(err, ShortSqlError::Toml(_)));
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = Config::load(Some(Path::new("/nonexistent/shortsql.toml"))).unwrap_err();
        assert!(matches!(err, ShortSqlError::Config(_)));
    }

    #[test]
    fn test_local_file_comes_first() {
        assert_eq!(default_paths()[0], PathBuf::from(LOCAL_CONFIG));
    }
}
