//! Factor V: strictly separate build and run stages.
//!
//! # Detected Patterns
//!
//! - A root `Dockerfile`, and whether it has both `COPY` and `RUN` steps
//! - CI configuration: GitHub Actions, GitLab CI, Jenkins or CircleCI

use crate::support::DOCKERFILE;
use twelve_factor_core::{Check, Factor, Finding, ProjectContext};

/// CI/CD configuration locations.
const CI_CONFIGS: &[&str] = &[
    ".github/workflows",
    ".gitlab-ci.yml",
    "Jenkinsfile",
    ".circleci/config.yml",
];

/// Checks for a container build descriptor and CI configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildReleaseRunCheck;

impl BuildReleaseRunCheck {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Check for BuildReleaseRunCheck {
    fn factor(&self) -> Factor {
        Factor::BuildReleaseRun
    }

    fn description(&self) -> &'static str {
        "Dockerfile with build steps, CI configuration"
    }

    fn check(&self, ctx: &ProjectContext<'_>) -> Vec<Finding> {
        let factor = self.factor();
        let mut findings = Vec::new();

        if ctx.exists(DOCKERFILE) {
            findings.push(
                Finding::pass(factor, "Dockerfile present for containerized builds")
                    .with_file(DOCKERFILE),
            );
            let separated = ctx
                .read_relative(DOCKERFILE)
                .is_some_and(|content| content.contains("COPY") && content.contains("RUN"));
            if separated {
                findings.push(
                    Finding::pass(factor, "Build steps separated in Dockerfile")
                        .with_file(DOCKERFILE),
                );
            }
        } else {
            findings.push(Finding::warning(factor, "No Dockerfile found"));
        }

        if let Some(ci) = ctx.first_existing(CI_CONFIGS) {
            findings.push(Finding::pass(factor, "CI/CD configuration found").with_file(ci));
        }

        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{passes, warnings, Fixture};

    #[test]
    fn no_dockerfile_warns() {
        let findings = Fixture::new().run(&BuildReleaseRunCheck);
        assert_eq!(warnings(&findings), vec!["No Dockerfile found"]);
        assert!(passes(&findings).is_empty());
    }

    #[test]
    fn dockerfile_with_copy_and_run() {
        let findings = Fixture::new()
            .file(
                "Dockerfile",
                "FROM python:3.12\nCOPY . /app\nRUN pip install -r requirements.txt\n",
            )
            .dir(".github/workflows")
            .run(&BuildReleaseRunCheck);
        assert_eq!(
            passes(&findings),
            vec![
                "Dockerfile present for containerized builds",
                "Build steps separated in Dockerfile",
                "CI/CD configuration found",
            ]
        );
    }

    #[test]
    fn dockerfile_without_build_steps() {
        let findings = Fixture::new()
            .file("Dockerfile", "FROM nginx\n")
            .file("Jenkinsfile", "pipeline {}\n")
            .run(&BuildReleaseRunCheck);
        assert_eq!(
            passes(&findings),
            vec![
                "Dockerfile present for containerized builds",
                "CI/CD configuration found",
            ]
        );
    }

    #[test]
    fn unreadable_dockerfile_is_tolerated() {
        let findings = Fixture::new()
            .bytes("Dockerfile", &[0xff, 0xfe, 0xfd])
            .run(&BuildReleaseRunCheck);
        assert_eq!(
            passes(&findings),
            vec!["Dockerfile present for containerized builds"]
        );
    }
}
