//! Check trait for defining factor checks.

use crate::context::ProjectContext;
use crate::types::{Factor, Finding};

/// A project-wide check for one factor.
///
/// Checks inspect the filesystem through [`ProjectContext`] and return their
/// findings; they never write to the project and never fail. Files that
/// cannot be read are skipped by the context, so a check only ever sees
/// readable text.
///
/// # Example
///
/// ```ignore
/// use twelve_factor_core::{Check, Factor, Finding, ProjectContext};
///
/// pub struct RequireReadme;
///
/// impl Check for RequireReadme {
///     fn factor(&self) -> Factor { Factor::Codebase }
///     fn name(&self) -> &'static str { "require-readme" }
///
///     fn check(&self, ctx: &ProjectContext) -> Vec<Finding> {
///         if ctx.exists("README.md") {
///             vec![Finding::pass(self.factor(), "README.md present")]
///         } else {
///             vec![Finding::warning(self.factor(), "No README.md")]
///         }
///     }
/// }
/// ```
pub trait Check: Send + Sync {
    /// The factor this check evaluates.
    fn factor(&self) -> Factor;

    /// Kebab-case name of this check, used to enable or disable it.
    fn name(&self) -> &'static str {
        self.factor().slug()
    }

    /// Returns a brief description of what this check looks for.
    fn description(&self) -> &'static str {
        ""
    }

    /// Inspects the project and returns findings in the order they were made.
    fn check(&self, ctx: &ProjectContext<'_>) -> Vec<Finding>;
}

/// Type alias for boxed `Check` trait objects.
pub type CheckBox = Box<dyn Check>;
