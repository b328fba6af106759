//! Factor VI: execute the app as one or more stateless processes.
//!
//! # Rationale
//!
//! Anything kept in process memory or on local disk is gone after a restart
//! and invisible to other instances. Sessions belong in a backing store.
//!
//! # Detected Patterns
//!
//! - `session[...] =` assignments, express-session stores and sticky-session
//!   settings in `.js` files (violation per match)
//! - `fs.write*` calls that do not mention `/tmp` or `/temp`, and
//!   `File.open(..., 'w')` (warning per pattern and file)
//!
//! # Configuration
//!
//! - `scan.write_sample`: `.js` files searched for writes (default: 10)

use twelve_factor_core::{file_name, Check, Factor, Finding, ProjectContext, Signal};

/// Extension scanned for session state and filesystem writes.
const SCRIPT_EXTENSION: &str = "js";

/// Checks for in-process session state and local filesystem writes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessesCheck;

impl ProcessesCheck {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Check for ProcessesCheck {
    fn factor(&self) -> Factor {
        Factor::Processes
    }

    fn description(&self) -> &'static str {
        "No sticky or in-memory sessions, no writes outside temp directories"
    }

    fn check(&self, ctx: &ProjectContext<'_>) -> Vec<Finding> {
        let factor = self.factor();
        let mut findings = Vec::new();
        let scripts = ctx.files_with_extension(SCRIPT_EXTENSION);

        for path in &scripts {
            let Some(content) = ctx.read_text(path) else {
                continue;
            };
            let relative = ctx.relative(path);
            for pattern in ctx.patterns.all_matches(Signal::SessionState, &content) {
                findings.push(
                    Finding::violation(
                        factor,
                        format!("{} in {}", pattern.description(), relative.display()),
                    )
                    .with_file(relative.clone()),
                );
            }
        }

        let patterns = ctx.patterns.patterns(Signal::FilesystemWrite);
        let mut writes = Vec::new();
        for path in scripts.iter().take(ctx.scan.write_sample) {
            let Some(content) = ctx.read_text(path) else {
                continue;
            };
            for (index, pattern) in patterns.iter().enumerate() {
                if pattern.is_match(&content) {
                    let finding = Finding::warning(
                        factor,
                        format!("{} in {}", pattern.description(), file_name(path)),
                    )
                    .with_file(ctx.relative(path));
                    writes.push((index, finding));
                }
            }
        }
        writes.sort_by_key(|(index, _)| *index);
        findings.extend(writes.into_iter().map(|(_, finding)| finding));

        findings
    }
}
