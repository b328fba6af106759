//! Factor IX: fast startup and graceful shutdown.
//!
//! # Detected Patterns
//!
//! - `process.on('SIGTERM', ...)` in Node.js
//! - `signal.signal(signal.SIGTERM, ...)` in Python
//! - `trap ... TERM` in shell scripts
//!
//! Every regular file is searched, whatever its extension.

use crate::support::first_file_per_pattern;
use twelve_factor_core::{Check, Factor, Finding, ProjectContext, Signal};

/// Checks that some process traps the termination signal.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisposabilityCheck;

impl DisposabilityCheck {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Check for DisposabilityCheck {
    fn factor(&self) -> Factor {
        Factor::Disposability
    }

    fn description(&self) -> &'static str {
        "SIGTERM handlers in any source or script"
    }

    fn check(&self, ctx: &ProjectContext<'_>) -> Vec<Finding> {
        let factor = self.factor();
        let hits = first_file_per_pattern(ctx, Signal::SignalHandler, &ctx.all_files());

        if hits.is_empty() {
            return vec![Finding::warning(
                factor,
                "No graceful shutdown handlers detected",
            )];
        }

        hits.into_iter()
            .map(|(pattern, path)| {
                Finding::pass(factor, format!("{} found", pattern.description())).with_file(path)
            })
            .collect()
    }
}
