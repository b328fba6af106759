//! Factor III: store config in the environment.
//!
//! # Rationale
//!
//! Credentials and deploy-specific values change between environments while
//! code does not. Values baked into source, or one config file per
//! environment, tie a build to a single deploy.
//!
//! # Detected Patterns
//!
//! - `.env.example` or a similar file documenting variables
//! - Hardcoded secrets, localhost URLs, external URLs and quoted constants
//!   in Python, JavaScript, Java and Ruby sources (first match per file)
//! - `config/production.json`, `settings/prod.py` and other per-environment
//!   config files
//!
//! # Configuration
//!
//! - `scan.config_sample`: source files inspected (default: 20)
//! - `patterns.suspicious-config`: extra patterns appended to the built-ins

use twelve_factor_core::{Check, Factor, Finding, ProjectContext, Signal};

/// Files documenting the expected environment variables.
const ENV_DOCS: &[&str] = &[".env.example", ".env.sample", "env.example"];

/// Source extensions sampled for hardcoded configuration, in scan order.
const SOURCE_EXTENSIONS: &[&str] = &["py", "js", "java", "rb"];

/// Per-environment config files that should be environment variables instead.
const ENV_CONFIG_FILES: &[&str] = &[
    "config/production.json",
    "config/development.json",
    "settings/prod.py",
    "settings/dev.py",
];

/// Checks for documented environment variables and hardcoded configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigCheck;

impl ConfigCheck {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Check for ConfigCheck {
    fn factor(&self) -> Factor {
        Factor::Config
    }

    fn description(&self) -> &'static str {
        "Documented env vars, no hardcoded secrets or per-environment config files"
    }

    fn check(&self, ctx: &ProjectContext<'_>) -> Vec<Finding> {
        let factor = self.factor();
        let mut findings = Vec::new();

        if ctx.exists_any(ENV_DOCS) {
            findings.push(Finding::pass(
                factor,
                "Environment variable documentation found",
            ));
        } else {
            findings.push(Finding::warning(
                factor,
                "No .env.example file documenting required variables",
            ));
        }

        // Grouped by extension, then sampled: a heuristic, not a full scan.
        let sample = SOURCE_EXTENSIONS
            .iter()
            .flat_map(|ext| ctx.files_with_extension(ext))
            .take(ctx.scan.config_sample);

        for path in sample {
            let Some(content) = ctx.read_text(&path) else {
                continue;
            };
            if let Some(pattern) = ctx.patterns.first_match(Signal::SuspiciousConfig, &content) {
                let relative = ctx.relative(&path);
                findings.push(
                    Finding::warning(
                        factor,
                        format!("{} found in {}", pattern.description(), relative.display()),
                    )
                    .with_file(relative),
                );
            }
        }

        for config in ENV_CONFIG_FILES {
            if ctx.exists(config) {
                findings.push(
                    Finding::violation(
                        factor,
                        format!("Environment-specific config file: {config}"),
                    )
                    .with_file(*config),
                );
            }
        }

        findings
    }
}
