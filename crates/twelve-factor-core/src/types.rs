//! Core types for findings and validation results.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One of the twelve methodology factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Factor {
    /// I. One codebase tracked in revision control.
    Codebase,
    /// II. Explicitly declare and isolate dependencies.
    Dependencies,
    /// III. Store config in the environment.
    Config,
    /// IV. Treat backing services as attached resources.
    BackingServices,
    /// V. Strictly separate build and run stages.
    BuildReleaseRun,
    /// VI. Execute the app as one or more stateless processes.
    Processes,
    /// VII. Export services via port binding.
    PortBinding,
    /// VIII. Scale out via the process model.
    Concurrency,
    /// IX. Fast startup and graceful shutdown.
    Disposability,
    /// X. Keep development, staging, and production similar.
    DevProdParity,
    /// XI. Treat logs as event streams.
    Logs,
    /// XII. Run admin tasks as one-off processes.
    AdminProcesses,
}

impl Factor {
    /// All factors in methodology order.
    pub const ALL: [Self; 12] = [
        Self::Codebase,
        Self::Dependencies,
        Self::Config,
        Self::BackingServices,
        Self::BuildReleaseRun,
        Self::Processes,
        Self::PortBinding,
        Self::Concurrency,
        Self::Disposability,
        Self::DevProdParity,
        Self::Logs,
        Self::AdminProcesses,
    ];

    /// Roman numeral of this factor (e.g., "IV").
    #[must_use]
    pub fn numeral(self) -> &'static str {
        match self {
            Self::Codebase => "I",
            Self::Dependencies => "II",
            Self::Config => "III",
            Self::BackingServices => "IV",
            Self::BuildReleaseRun => "V",
            Self::Processes => "VI",
            Self::PortBinding => "VII",
            Self::Concurrency => "VIII",
            Self::Disposability => "IX",
            Self::DevProdParity => "X",
            Self::Logs => "XI",
            Self::AdminProcesses => "XII",
        }
    }

    /// Human-readable title (e.g., "Backing Services").
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Codebase => "Codebase",
            Self::Dependencies => "Dependencies",
            Self::Config => "Config",
            Self::BackingServices => "Backing Services",
            Self::BuildReleaseRun => "Build, Release, Run",
            Self::Processes => "Processes",
            Self::PortBinding => "Port Binding",
            Self::Concurrency => "Concurrency",
            Self::Disposability => "Disposability",
            Self::DevProdParity => "Dev/Prod Parity",
            Self::Logs => "Logs",
            Self::AdminProcesses => "Admin Processes",
        }
    }

    /// Kebab-case identifier used in configuration (e.g., "backing-services").
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::Codebase => "codebase",
            Self::Dependencies => "dependencies",
            Self::Config => "config",
            Self::BackingServices => "backing-services",
            Self::BuildReleaseRun => "build-release-run",
            Self::Processes => "processes",
            Self::PortBinding => "port-binding",
            Self::Concurrency => "concurrency",
            Self::Disposability => "disposability",
            Self::DevProdParity => "dev-prod-parity",
            Self::Logs => "logs",
            Self::AdminProcesses => "admin-processes",
        }
    }
}

impl std::fmt::Display for Factor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Factor {}: {}", self.numeral(), self.title())
    }
}

/// Classification of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingKind {
    /// The project follows the factor in this respect.
    Pass,
    /// Possible problem, or missing evidence.
    Warning,
    /// The project breaks the factor.
    Violation,
}

impl FindingKind {
    /// Glyph printed in front of findings of this kind.
    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Pass => "✓",
            Self::Warning => "⚠️ ",
            Self::Violation => "✗",
        }
    }
}

impl std::fmt::Display for FindingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pass => write!(f, "pass"),
            Self::Warning => write!(f, "warning"),
            Self::Violation => write!(f, "violation"),
        }
    }
}

/// A single categorized observation produced by a check.
///
/// `message` is the complete sentence shown to users. When the message names
/// a file or a count, the same value is also carried in `file` / `count`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Factor that produced this finding.
    pub factor: Factor,
    /// Pass, warning, or violation.
    pub kind: FindingKind,
    /// Human-readable message.
    pub message: String,
    /// File the finding refers to, relative to the project root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Number of offending items, where applicable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl Finding {
    /// Creates a new finding.
    #[must_use]
    pub fn new(factor: Factor, kind: FindingKind, message: impl Into<String>) -> Self {
        Self {
            factor,
            kind,
            message: message.into(),
            file: None,
            count: None,
        }
    }

    /// Creates a pass.
    #[must_use]
    pub fn pass(factor: Factor, message: impl Into<String>) -> Self {
        Self::new(factor, FindingKind::Pass, message)
    }

    /// Creates a warning.
    #[must_use]
    pub fn warning(factor: Factor, message: impl Into<String>) -> Self {
        Self::new(factor, FindingKind::Warning, message)
    }

    /// Creates a violation.
    #[must_use]
    pub fn violation(factor: Factor, message: impl Into<String>) -> Self {
        Self::new(factor, FindingKind::Violation, message)
    }

    /// Attaches the file this finding refers to.
    #[must_use]
    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Attaches a count.
    #[must_use]
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind.glyph(), self.message)
    }
}

/// Result of a validation run: three ordered buckets of findings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Passing findings, in check execution order.
    pub passes: Vec<Finding>,
    /// Warnings, in check execution order.
    pub warnings: Vec<Finding>,
    /// Violations, in check execution order.
    pub violations: Vec<Finding>,
}

impl CheckResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a finding to the bucket matching its kind.
    pub fn push(&mut self, finding: Finding) {
        match finding.kind {
            FindingKind::Pass => self.passes.push(finding),
            FindingKind::Warning => self.warnings.push(finding),
            FindingKind::Violation => self.violations.push(finding),
        }
    }

    /// Appends findings in order, sorting each into its bucket.
    pub fn extend<I: IntoIterator<Item = Finding>>(&mut self, findings: I) {
        for finding in findings {
            self.push(finding);
        }
    }

    /// Compliance score in percent: `passes / (passes + violations) * 100`.
    ///
    /// Returns `None` when there are neither passes nor violations, since the
    /// ratio is undefined. Warnings never affect the score.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn score(&self) -> Option<f64> {
        let denominator = self.passes.len() + self.violations.len();
        if denominator == 0 {
            return None;
        }
        Some(self.passes.len() as f64 / denominator as f64 * 100.0)
    }

    /// Returns all findings for one factor, passes first, then warnings, then violations.
    #[must_use]
    pub fn findings_for(&self, factor: Factor) -> Vec<&Finding> {
        self.passes
            .iter()
            .chain(&self.warnings)
            .chain(&self.violations)
            .filter(|f| f.factor == factor)
            .collect()
    }

    /// Counts findings by kind as `(passes, warnings, violations)`.
    #[must_use]
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.passes.len(), self.warnings.len(), self.violations.len())
    }
}
