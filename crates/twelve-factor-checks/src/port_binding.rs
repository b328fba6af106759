//! Factor VII: export services via port binding.
//!
//! # Rationale
//!
//! A twelve-factor app is self-contained and binds the port it is given,
//! instead of being deployed into an app server.
//!
//! # Detected Patterns
//!
//! - Express, Node.js `http`, Python and Rails idioms that take the port
//!   from `PORT` (one pass per idiom)
//! - `.war` archives anywhere in the tree

use crate::support::first_file_per_pattern;
use twelve_factor_core::{Check, Factor, Finding, ProjectContext, Signal};

/// Extensions scanned for self-hosted servers.
const SERVER_EXTENSIONS: &[&str] = &["js", "py", "rb"];

/// Checks that the app binds a port from the environment instead of
/// relying on an application server container.
#[derive(Debug, Clone, Copy, Default)]
pub struct PortBindingCheck;

impl PortBindingCheck {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Check for PortBindingCheck {
    fn factor(&self) -> Factor {
        Factor::PortBinding
    }

    fn description(&self) -> &'static str {
        "Server listens on PORT from the environment, no WAR deployables"
    }

    fn check(&self, ctx: &ProjectContext<'_>) -> Vec<Finding> {
        let factor = self.factor();
        let files = ctx.files_with_extensions(SERVER_EXTENSIONS);

        let mut findings: Vec<Finding> = first_file_per_pattern(ctx, Signal::PortBinding, &files)
            .into_iter()
            .map(|(pattern, path)| {
                Finding::pass(factor, format!("{} found", pattern.description())).with_file(path)
            })
            .collect();

        if findings.is_empty() {
            findings.push(Finding::warning(
                factor,
                "No PORT environment variable usage detected",
            ));
        }

        let archives = ctx.files_with_extension("war");
        if !archives.is_empty() {
            findings.push(
                Finding::violation(factor, "WAR files suggest server container dependency")
                    .with_count(archives.len()),
            );
        }

        findings
    }
}
