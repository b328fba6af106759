//! Factor X: keep development, staging and production as similar as possible.
//!
//! Passes when a `Dockerfile` and a compose file are both present. A
//! separate dev-only manifest (`requirements-dev.txt`, `package-dev.json`)
//! is a warning.

use crate::support::{compose_file, DOCKERFILE};
use twelve_factor_core::{Check, Factor, Finding, ProjectContext};

/// Dependency manifests used only in development.
const DEV_ONLY_MANIFESTS: &[&str] = &["requirements-dev.txt", "package-dev.json"];

/// Checks for containerized environments and dev-only dependency sets.
#[derive(Debug, Clone, Copy, Default)]
pub struct DevProdParityCheck;

impl DevProdParityCheck {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Check for DevProdParityCheck {
    fn factor(&self) -> Factor {
        Factor::DevProdParity
    }

    fn description(&self) -> &'static str {
        "Dockerfile with compose file, no separate dev dependency manifests"
    }

    fn check(&self, ctx: &ProjectContext<'_>) -> Vec<Finding> {
        let factor = self.factor();
        let mut findings = Vec::new();

        if ctx.exists(DOCKERFILE) && compose_file(ctx).is_some() {
            findings.push(Finding::pass(
                factor,
                "Docker used for environment consistency",
            ));
        }

        if let Some(manifest) = ctx.first_existing(DEV_ONLY_MANIFESTS) {
            findings.push(
                Finding::warning(factor, "Separate dev dependencies might indicate divergence")
                    .with_file(manifest),
            );
        }

        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{passes, warnings, Fixture};

    #[test]
    fn dockerfile_alone_is_not_enough() {
        let findings = Fixture::new()
            .file("Dockerfile", "FROM node:20\n")
            .run(&DevProdParityCheck);
        assert!(findings.is_empty());
    }

    #[test]
    fn dockerfile_with_compose() {
        let findings = Fixture::new()
            .file("Dockerfile", "FROM node:20\n")
            .file("compose.yml", "services: {}\n")
            .run(&DevProdParityCheck);
        assert_eq!(
            passes(&findings),
            vec!["Docker used for environment consistency"]
        );
    }

    #[test]
    fn dev_manifests_warn_once() {
        let findings = Fixture::new()
            .file("requirements-dev.txt", "pytest\n")
            .file("package-dev.json", "{}\n")
            .run(&DevProdParityCheck);
        assert_eq!(
            warnings(&findings),
            vec!["Separate dev dependencies might indicate divergence"]
        );
    }
}
