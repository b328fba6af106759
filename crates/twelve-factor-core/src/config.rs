//! Configuration types for twelve-factor validation.

use crate::patterns::PatternSpec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Top-level configuration, usually loaded from `twelve-factor.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// File enumeration and sampling settings.
    #[serde(default)]
    pub scan: ScanConfig,

    /// Per-check configurations, keyed by factor slug.
    #[serde(default)]
    pub checks: HashMap<String, CheckConfig>,

    /// Extra patterns appended to the built-in table, keyed by signal name.
    #[serde(default)]
    pub patterns: HashMap<String, Vec<PatternSpec>>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a check is enabled. Checks are enabled unless configured otherwise.
    #[must_use]
    pub fn is_check_enabled(&self, slug: &str) -> bool {
        self.checks
            .get(slug)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }
}

/// How the project tree is enumerated and sampled.
///
/// Several checks only look at the first N matching files. Traversal is
/// depth-first and sorted by file name, so the sample is deterministic, but
/// findings from sampled checks are a lower bound rather than exhaustive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Source files scanned for hardcoded configuration.
    #[serde(default = "default_config_sample")]
    pub config_sample: usize,

    /// Script files scanned for filesystem writes.
    #[serde(default = "default_write_sample")]
    pub write_sample: usize,

    /// Files scanned for stdout logging.
    #[serde(default = "default_stdout_sample")]
    pub stdout_sample: usize,

    /// Files larger than this are skipped when reading contents.
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,

    /// Whether symbolic links are followed during traversal.
    #[serde(default)]
    pub follow_links: bool,

    /// Directory names pruned from recursive scans.
    #[serde(default = "default_exclude_dirs")]
    pub exclude_dirs: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            config_sample: default_config_sample(),
            write_sample: default_write_sample(),
            stdout_sample: default_stdout_sample(),
            max_file_bytes: default_max_file_bytes(),
            follow_links: false,
            exclude_dirs: default_exclude_dirs(),
        }
    }
}

fn default_config_sample() -> usize {
    20
}

fn default_write_sample() -> usize {
    10
}

fn default_stdout_sample() -> usize {
    20
}

fn default_max_file_bytes() -> u64 {
    4 * 1024 * 1024
}

fn default_exclude_dirs() -> Vec<String> {
    vec![".git".to_string(), "node_modules".to_string()]
}

/// Per-check configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Whether this check runs.
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {}: {source}", path.display())]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}
