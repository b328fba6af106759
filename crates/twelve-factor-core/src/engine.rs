//! Rule engine orchestrating check execution.

use crate::check::{Check, CheckBox};
use crate::config::Config;
use crate::context::ProjectContext;
use crate::patterns::{PatternTable, Signal};
use crate::types::CheckResult;

use miette::Diagnostic;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while setting up the engine.
///
/// Validation itself cannot fail; these are raised by
/// [`EngineBuilder::build`] before any check runs.
#[derive(Debug, Error, Diagnostic)]
pub enum EngineError {
    /// IO error resolving the project root.
    #[error("IO error: {0}")]
    #[diagnostic(code(twelve_factor::io))]
    Io(#[from] std::io::Error),

    /// A pattern failed to compile.
    #[error("Invalid pattern for signal `{signal}`: {regex}")]
    #[diagnostic(
        code(twelve_factor::pattern),
        help("patterns use the `regex` crate syntax; look-around is not supported")
    )]
    Pattern {
        /// Signal the pattern belongs to.
        signal: Signal,
        /// The offending expression.
        regex: String,
        /// Compilation error.
        #[source]
        source: regex::Error,
    },

    /// Configuration named a signal that does not exist.
    #[error("Unknown pattern signal `{0}`")]
    #[diagnostic(
        code(twelve_factor::unknown_signal),
        help("known signals: suspicious-config, session-state, filesystem-write, port-binding, signal-handler, file-logging, stdout-logging")
    )]
    UnknownSignal(String),
}

/// Builder for configuring an [`Engine`].
#[derive(Default)]
pub struct EngineBuilder {
    root: Option<PathBuf>,
    checks: Vec<CheckBox>,
    config: Option<Config>,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the project root to validate.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a check. Checks run in the order they are added.
    #[must_use]
    pub fn check<C: Check + 'static>(mut self, check: C) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    /// Adds several boxed checks, keeping their order.
    #[must_use]
    pub fn checks<I: IntoIterator<Item = CheckBox>>(mut self, checks: I) -> Self {
        self.checks.extend(checks);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the engine, compiling the pattern table.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured pattern is invalid or the current
    /// directory cannot be determined for a relative root.
    pub fn build(self) -> Result<Engine, EngineError> {
        let config = self.config.unwrap_or_default();
        let root = self.root.unwrap_or_else(|| PathBuf::from("."));

        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let patterns = PatternTable::compile(&config)?;

        Ok(Engine {
            root,
            checks: self.checks,
            config,
            patterns,
        })
    }
}

/// Runs a fixed, ordered list of checks against one project root.
///
/// Use [`Engine::builder()`] to construct an instance.
pub struct Engine {
    root: PathBuf,
    checks: Vec<CheckBox>,
    config: Config,
    patterns: PatternTable,
}

impl Engine {
    /// Creates a new builder for configuring an engine.
    #[must_use]
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// Returns the project root being validated.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered checks.
    #[must_use]
    pub fn check_count(&self) -> usize {
        self.checks.len()
    }

    /// Runs every enabled check in order and merges their findings.
    ///
    /// Each call starts from an empty result, so repeated runs against an
    /// unchanged tree produce identical results.
    #[must_use]
    pub fn validate(&self) -> CheckResult {
        info!("Starting validation at {:?}", self.root);

        let ctx = ProjectContext::new(&self.root, &self.config.scan, &self.patterns);
        let mut result = CheckResult::new();

        for check in &self.checks {
            if !self.config.is_check_enabled(check.name()) {
                debug!("Skipping disabled check: {}", check.name());
                continue;
            }

            info!("📁 {}", check.factor());
            debug!("Running {} ({})", check.name(), check.description());
            let findings = check.check(&ctx);
            debug!("{} produced {} finding(s)", check.name(), findings.len());
            result.extend(findings);
        }

        let (passes, warnings, violations) = result.counts();
        info!(
            "Validation complete: {} pass(es), {} warning(s), {} violation(s)",
            passes, warnings, violations
        );

        result
    }
}
