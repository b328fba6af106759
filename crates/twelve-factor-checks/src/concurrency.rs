//! Factor VIII: scale out via the process model.
//!
//! # Detected Patterns
//!
//! - A `Procfile`, and whether it declares both `web:` and `worker:`
//! - A compose file with more than one service

use crate::support::compose_file;
use tracing::debug;
use twelve_factor_core::{Check, Factor, Finding, ProjectContext};

/// Process formation descriptor.
const PROCFILE: &str = "Procfile";

/// Checks for declared process types.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConcurrencyCheck;

impl ConcurrencyCheck {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Number of services declared in a compose document, or `None` if it does
/// not parse.
fn service_count(content: &str) -> Option<usize> {
    let doc: serde_yaml::Value = serde_yaml::from_str(content).ok()?;
    let count = match doc.get("services") {
        Some(serde_yaml::Value::Mapping(services)) => services.len(),
        Some(serde_yaml::Value::Sequence(services)) => services.len(),
        _ => 0,
    };
    Some(count)
}

impl Check for ConcurrencyCheck {
    fn factor(&self) -> Factor {
        Factor::Concurrency
    }

    fn description(&self) -> &'static str {
        "Procfile with web and worker processes, multi-service compose file"
    }

    fn check(&self, ctx: &ProjectContext<'_>) -> Vec<Finding> {
        let factor = self.factor();
        let mut findings = Vec::new();

        if ctx.exists(PROCFILE) {
            findings
                .push(Finding::pass(factor, "Procfile defines process types").with_file(PROCFILE));
            let formation = ctx
                .read_relative(PROCFILE)
                .is_some_and(|content| content.contains("web:") && content.contains("worker:"));
            if formation {
                findings.push(
                    Finding::pass(factor, "Multiple process types defined").with_file(PROCFILE),
                );
            }
        } else {
            findings.push(Finding::warning(factor, "No Procfile found"));
        }

        if let Some(compose) = compose_file(ctx) {
            match ctx.read_relative(compose).map(|content| service_count(&content)) {
                Some(Some(count)) if count > 1 => findings.push(
                    Finding::pass(factor, "Multiple services in docker-compose")
                        .with_file(compose)
                        .with_count(count),
                ),
                Some(None) => debug!("Could not parse {compose}"),
                _ => {}
            }
        }

        findings
    }
}
