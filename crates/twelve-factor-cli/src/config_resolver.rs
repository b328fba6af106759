//! Configuration file resolution.
//!
//! The only source is the project being validated:
//!
//! 1. `{project}/twelve-factor.toml` or `.twelve-factor.toml`
//! 2. No config found → defaults

use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Found in the project directory.
    Project(PathBuf),
    /// No config found; defaults will be used.
    Default,
}

/// Project-level config file names, checked in order.
const PROJECT_CONFIG_NAMES: &[&str] = &["twelve-factor.toml", ".twelve-factor.toml"];

/// Resolves the configuration file path for a project directory.
#[must_use]
pub fn resolve(project_dir: &Path) -> ConfigSource {
    for name in PROJECT_CONFIG_NAMES {
        let candidate = project_dir.join(name);
        if candidate.is_file() {
            tracing::debug!("Found project config: {}", candidate.display());
            return ConfigSource::Project(candidate);
        }
    }

    ConfigSource::Default
}
