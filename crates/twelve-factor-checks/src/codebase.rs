//! Factor I: one codebase tracked in revision control.
//!
//! # Rationale
//!
//! One app maps to one repository. Several app manifests in different
//! directories usually mean several apps share a codebase.
//!
//! # Detected Patterns
//!
//! - `.git` at the root (directory or worktree file)
//! - Directories holding `package.json`, `requirements.txt`, `Gemfile`,
//!   `pom.xml` or `build.gradle`; more than one is a warning
//! - `.gitignore` at the root

use std::collections::BTreeSet;
use std::path::Path;
use twelve_factor_core::{Check, Factor, Finding, ProjectContext};

/// Manifests that suggest an application root.
const APP_MANIFESTS: &[&str] = &[
    "package.json",
    "requirements.txt",
    "Gemfile",
    "pom.xml",
    "build.gradle",
];

/// Checks for version control and a single application root.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodebaseCheck;

impl CodebaseCheck {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Check for CodebaseCheck {
    fn factor(&self) -> Factor {
        Factor::Codebase
    }

    fn description(&self) -> &'static str {
        "Git repository, single app root, .gitignore"
    }

    fn check(&self, ctx: &ProjectContext<'_>) -> Vec<Finding> {
        let factor = self.factor();
        let mut findings = Vec::new();

        // `.git` is a file in worktrees and submodules.
        if ctx.exists(".git") {
            findings.push(Finding::pass(factor, "Git repository found"));
        } else {
            findings.push(Finding::violation(factor, "No Git repository found"));
        }

        let app_roots: BTreeSet<_> = ctx
            .all_files()
            .into_iter()
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| APP_MANIFESTS.contains(&n))
            })
            .filter_map(|path| path.parent().map(Path::to_path_buf))
            .collect();

        if app_roots.len() > 1 {
            findings.push(
                Finding::warning(factor, "Multiple app roots detected - possible violation")
                    .with_count(app_roots.len()),
            );
        }

        if ctx.exists(".gitignore") {
            findings.push(Finding::pass(factor, ".gitignore present").with_file(".gitignore"));
        } else {
            findings.push(Finding::warning(factor, "No .gitignore file"));
        }

        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{passes, violations, warnings, Fixture};

    #[test]
    fn empty_project() {
        let findings = Fixture::new().run(&CodebaseCheck);
        assert_eq!(violations(&findings), vec!["No Git repository found"]);
        assert_eq!(warnings(&findings), vec!["No .gitignore file"]);
        assert!(passes(&findings).is_empty());
    }

    #[test]
    fn git_repository_with_ignore_file() {
        let findings = Fixture::new()
            .dir(".git")
            .file(".gitignore", "target/\n")
            .file("package.json", "{}")
            .run(&CodebaseCheck);
        assert_eq!(
            passes(&findings),
            vec!["Git repository found", ".gitignore present"]
        );
        assert!(warnings(&findings).is_empty());
    }

    #[test]
    fn git_worktree_file_counts() {
        let findings = Fixture::new()
            .file(".git", "gitdir: ../main/.git/worktrees/x\n")
            .run(&CodebaseCheck);
        assert!(passes(&findings).contains(&"Git repository found"));
    }

    #[test]
    fn multiple_app_roots_warn_once() {
        let findings = Fixture::new()
            .file("api/requirements.txt", "flask==2.0\n")
            .file("web/package.json", "{}")
            .file("web/Gemfile", "")
            .run(&CodebaseCheck);
        let warning = findings
            .iter()
            .find(|f| f.message.starts_with("Multiple app roots"))
            .unwrap();
        assert_eq!(warning.count, Some(2));
    }

    #[test]
    fn manifests_in_one_directory_are_one_root() {
        let findings = Fixture::new()
            .file("package.json", "{}")
            .file("requirements.txt", "")
            .run(&CodebaseCheck);
        assert!(!warnings(&findings).iter().any(|w| w.starts_with("Multiple")));
    }

    #[test]
    fn node_modules_are_not_app_roots() {
        let findings = Fixture::new()
            .file("package.json", "{}")
            .file("node_modules/left-pad/package.json", "{}")
            .run(&CodebaseCheck);
        assert!(!warnings(&findings).iter().any(|w| w.starts_with("Multiple")));
    }
}
