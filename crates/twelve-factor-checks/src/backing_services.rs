//! Factor IV: treat backing services as attached resources.
//!
//! # Rationale
//!
//! A database or queue should be swappable by changing configuration alone.
//! Reading its URL from the environment is the usual way to achieve that.
//!
//! # Detected Patterns
//!
//! A source file that both reads the environment with its own language's
//! idiom (`os.environ`, `process.env`, `ENV[`, `System.getenv`,
//! `os.Getenv`) and names a service variable such as `DATABASE_URL` or
//! `REDIS_URL`. The first such file is enough.

use twelve_factor_core::{Check, Factor, Finding, ProjectContext};

/// Conventional variables carrying a backing service locator.
const SERVICE_ENV_VARS: &[&str] = &[
    "DATABASE_URL",
    "REDIS_URL",
    "RABBITMQ_URL",
    "ELASTICSEARCH_URL",
    "MONGODB_URI",
    "CACHE_URL",
];

/// Environment access idioms by source extension.
const ENV_ACCESS: &[(&str, &[&str])] = &[
    ("py", &["os.environ", "os.getenv"]),
    ("js", &["process.env"]),
    ("ts", &["process.env"]),
    ("rb", &["ENV["]),
    ("java", &["System.getenv"]),
    ("go", &["os.Getenv"]),
];

/// Checks that service locators come from the environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct BackingServicesCheck;

impl BackingServicesCheck {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn access_idioms(ext: &str) -> &'static [&'static str] {
    ENV_ACCESS
        .iter()
        .find(|(e, _)| *e == ext)
        .map_or(&[][..], |(_, idioms)| *idioms)
}

impl Check for BackingServicesCheck {
    fn factor(&self) -> Factor {
        Factor::BackingServices
    }

    fn description(&self) -> &'static str {
        "Service URLs read from environment variables"
    }

    fn check(&self, ctx: &ProjectContext<'_>) -> Vec<Finding> {
        let factor = self.factor();
        let extensions: Vec<&str> = ENV_ACCESS.iter().map(|(ext, _)| *ext).collect();

        for path in ctx.files_with_extensions(&extensions) {
            let idioms = path
                .extension()
                .and_then(|e| e.to_str())
                .map_or(&[][..], access_idioms);
            let Some(content) = ctx.read_text(&path) else {
                continue;
            };

            let uses_env = idioms.iter().any(|idiom| content.contains(idiom));
            if uses_env && SERVICE_ENV_VARS.iter().any(|var| content.contains(var)) {
                return vec![Finding::pass(
                    factor,
                    "Services referenced via environment variables",
                )
                .with_file(ctx.relative(&path))];
            }
        }

        vec![Finding::warning(
            factor,
            "No backing service environment variables detected",
        )]
    }
}
