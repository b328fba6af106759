//! Factor XII: run admin tasks as one-off processes.
//!
//! # Rationale
//!
//! Migrations and maintenance scripts belong in the codebase so they run
//! against the same release as the app.
//!
//! # Detected Patterns
//!
//! - `scripts/`, `bin/`, `tasks/` or `management/` directories
//! - `migrations/`, `db/migrate/` or `alembic/` directories
//!
//! Absence is not reported.

use twelve_factor_core::{Check, Factor, Finding, ProjectContext};

/// Conventional homes for one-off scripts.
const ADMIN_DIRS: &[&str] = &["scripts", "bin", "tasks", "management"];

/// Migration directories and tool markers.
const MIGRATION_DIRS: &[&str] = &["migrations", "db/migrate", "alembic"];

/// Checks for admin scripts and database migrations kept with the app.
///
/// Absence of either is not reported.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdminProcessesCheck;

impl AdminProcessesCheck {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Check for AdminProcessesCheck {
    fn factor(&self) -> Factor {
        Factor::AdminProcesses
    }

    fn description(&self) -> &'static str {
        "Admin script directories, database migrations"
    }

    fn check(&self, ctx: &ProjectContext<'_>) -> Vec<Finding> {
        let factor = self.factor();
        let mut findings = Vec::new();

        if let Some(dir) = ctx.first_existing(ADMIN_DIRS) {
            findings.push(Finding::pass(factor, "Admin scripts directory found").with_file(dir));
        }

        if let Some(dir) = ctx.first_existing(MIGRATION_DIRS) {
            findings.push(
                Finding::pass(factor, "Database migration structure found").with_file(dir),
            );
        }

        findings
    }
}
