//! # twelve-factor-checks
//!
//! Built-in checks, one per twelve-factor principle.
//!
//! Every check is a filesystem heuristic: it looks for conventional files,
//! directories and source idioms and reports passes, warnings and
//! violations. None of them executes project code.
//!
//! ## Available Checks
//!
//! | Factor | Name | Looks for |
//! |--------|------|-----------|
//! | I | `codebase` | Git repository, single app root, `.gitignore` |
//! | II | `dependencies` | Manifests with exact versions, lock files |
//! | III | `config` | `.env.example`, hardcoded values, per-environment config files |
//! | IV | `backing-services` | Service URLs read from the environment |
//! | V | `build-release-run` | Dockerfile build steps, CI configuration |
//! | VI | `processes` | Session state, writes outside temp directories |
//! | VII | `port-binding` | `PORT` from the environment, WAR files |
//! | VIII | `concurrency` | Procfile process types, compose services |
//! | IX | `disposability` | SIGTERM handlers |
//! | X | `dev-prod-parity` | Docker with compose, dev-only manifests |
//! | XI | `logs` | File handlers and appenders, stdout logging |
//! | XII | `admin-processes` | Admin script directories, migrations |
//!
//! ## Usage
//!
//! ```ignore
//! use twelve_factor_checks::validate_all;
//! use twelve_factor_core::report;
//!
//! let result = validate_all("./my-app")?;
//! println!("{}", report::render(&result));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod admin_processes;
mod backing_services;
mod build_release_run;
mod codebase;
mod concurrency;
mod config;
mod dependencies;
mod dev_prod_parity;
mod disposability;
mod logs;
mod port_binding;
mod processes;
mod support;

#[cfg(test)]
mod testing;

pub use admin_processes::AdminProcessesCheck;
pub use backing_services::BackingServicesCheck;
pub use build_release_run::BuildReleaseRunCheck;
pub use codebase::CodebaseCheck;
pub use concurrency::ConcurrencyCheck;
pub use config::ConfigCheck;
pub use dependencies::DependenciesCheck;
pub use dev_prod_parity::DevProdParityCheck;
pub use disposability::DisposabilityCheck;
pub use logs::LogsCheck;
pub use port_binding::PortBindingCheck;
pub use processes::ProcessesCheck;

/// Re-export core types for convenience.
pub use twelve_factor_core::{Check, CheckResult, Config, Engine, EngineError, Factor, Finding};

use std::path::PathBuf;
use twelve_factor_core::CheckBox;

/// Returns all twelve checks in factor order.
#[must_use]
pub fn all_checks() -> Vec<CheckBox> {
    vec![
        Box::new(CodebaseCheck::new()),
        Box::new(DependenciesCheck::new()),
        Box::new(ConfigCheck::new()),
        Box::new(BackingServicesCheck::new()),
        Box::new(BuildReleaseRunCheck::new()),
        Box::new(ProcessesCheck::new()),
        Box::new(PortBindingCheck::new()),
        Box::new(ConcurrencyCheck::new()),
        Box::new(DisposabilityCheck::new()),
        Box::new(DevProdParityCheck::new()),
        Box::new(LogsCheck::new()),
        Box::new(AdminProcessesCheck::new()),
    ]
}

/// Runs every check against `root` with the default configuration.
///
/// # Errors
///
/// Returns an error if the engine cannot be built.
pub fn validate_all(root: impl Into<PathBuf>) -> Result<CheckResult, EngineError> {
    validate_with_config(root, Config::default())
}

/// Runs every check against `root` with an explicit configuration.
///
/// # Errors
///
/// Returns an error if a configured pattern does not compile or names an
/// unknown signal.
pub fn validate_with_config(
    root: impl Into<PathBuf>,
    config: Config,
) -> Result<CheckResult, EngineError> {
    let engine = Engine::builder()
        .root(root)
        .checks(all_checks())
        .config(config)
        .build()?;
    Ok(engine.validate())
}
