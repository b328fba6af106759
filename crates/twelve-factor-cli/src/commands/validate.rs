//! Validate command implementation.

use anyhow::{Context, Result};
use std::path::Path;
use twelve_factor_checks::all_checks;
use twelve_factor_core::{Config, Engine};

use crate::config_resolver::{self, ConfigSource};

/// Validates the project at `path` and prints the report.
///
/// The exit status does not depend on the score.
pub fn run(path: &Path) -> Result<()> {
    let config = match config_resolver::resolve(path) {
        ConfigSource::Default => Config::default(),
        ConfigSource::Project(p) => {
            tracing::info!("Using project config: {}", p.display());
            Config::from_file(&p)
                .with_context(|| format!("Failed to load config: {}", p.display()))?
        }
    };

    let engine = Engine::builder()
        .root(path)
        .config(config)
        .checks(all_checks())
        .build()
        .context("Failed to build validation engine")?;

    tracing::info!(
        "Validating {:?} with {} checks",
        engine.root(),
        engine.check_count()
    );

    let result = engine.validate();

    super::output::print(&result);

    Ok(())
}
