//! Text rendering of validation results.

use crate::types::{CheckResult, Finding};
use std::fmt::Write;

const RULE_WIDTH: usize = 60;

/// Advice printed at the end of a report, chosen by score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    /// Score below 50, or no score at all.
    Critical,
    /// Score from 50 up to 80.
    Moderate,
    /// Score of 80 or more.
    Good,
}

impl Recommendation {
    /// Picks the recommendation for a score.
    ///
    /// An undefined score (no passes and no violations) means nothing could
    /// be confirmed, which is treated as critical.
    #[must_use]
    pub fn for_score(score: Option<f64>) -> Self {
        match score {
            Some(s) if s >= 80.0 => Self::Good,
            Some(s) if s >= 50.0 => Self::Moderate,
            _ => Self::Critical,
        }
    }

    /// Recommendation text.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Critical => "Critical: Address violations before deployment",
            Self::Moderate => "Moderate: Fix violations and review warnings",
            Self::Good => "Good: Review warnings for optimization opportunities",
        }
    }
}

/// Formats a score as `NN.N%`, or `N/A` when undefined.
#[must_use]
pub fn format_score(score: Option<f64>) -> String {
    score.map_or_else(|| "N/A".to_string(), |s| format!("{s:.1}%"))
}

/// Renders a result as the human-readable report.
///
/// Sections appear in the order passes, warnings, violations, and only when
/// non-empty.
#[must_use]
pub fn render(result: &CheckResult) -> String {
    let mut out = String::new();
    let rule = "=".repeat(RULE_WIDTH);

    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "📊 12-FACTOR VALIDATION REPORT");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out);

    let score = result.score();
    let _ = writeln!(out, "Score: {}", format_score(score));
    let _ = writeln!(out);

    section(&mut out, "✅ PASSES:", &result.passes);
    section(&mut out, "⚠️  WARNINGS:", &result.warnings);
    section(&mut out, "❌ VIOLATIONS:", &result.violations);

    let _ = writeln!(out, "📝 RECOMMENDATIONS:");
    let _ = writeln!(out, "  - {}", Recommendation::for_score(score).message());
    let _ = writeln!(out);
    let _ = writeln!(out, "{rule}");

    out
}

fn section(out: &mut String, heading: &str, findings: &[Finding]) {
    if findings.is_empty() {
        return;
    }
    let _ = writeln!(out, "{heading}");
    for finding in findings {
        let _ = writeln!(out, "  {finding}");
    }
    let _ = writeln!(out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Factor;

    #[test]
    fn recommendation_thresholds() {
        assert_eq!(Recommendation::for_score(None), Recommendation::Critical);
        assert_eq!(Recommendation::for_score(Some(0.0)), Recommendation::Critical);
        assert_eq!(Recommendation::for_score(Some(49.9)), Recommendation::Critical);
        assert_eq!(Recommendation::for_score(Some(50.0)), Recommendation::Moderate);
        assert_eq!(Recommendation::for_score(Some(79.9)), Recommendation::Moderate);
        assert_eq!(Recommendation::for_score(Some(80.0)), Recommendation::Good);
        assert_eq!(Recommendation::for_score(Some(100.0)), Recommendation::Good);
    }

    #[test]
    fn score_formatting() {
        assert_eq!(format_score(None), "N/A");
        assert_eq!(format_score(Some(66.666)), "66.7%");
        assert_eq!(format_score(Some(100.0)), "100.0%");
    }

    #[test]
    fn render_prints_non_empty_sections_in_order() {
        let mut result = CheckResult::new();
        result.push(Finding::violation(Factor::Codebase, "No Git repository found"));
        result.push(Finding::pass(Factor::Codebase, ".gitignore present"));

        let text = render(&result);
        assert!(text.contains("Score: 50.0%"));
        assert!(text.contains("  ✓ .gitignore present"));
        assert!(text.contains("  ✗ No Git repository found"));
        assert!(!text.contains("WARNINGS"));

        let passes = text.find("PASSES").unwrap();
        let violations = text.find("VIOLATIONS").unwrap();
        let advice = text.find("Moderate: Fix violations").unwrap();
        assert!(passes < violations && violations < advice);
    }

    #[test]
    fn render_empty_result() {
        let text = render(&CheckResult::new());
        assert!(text.contains("Score: N/A"));
        assert!(text.contains("Critical: Address violations before deployment"));
        assert!(!text.contains("PASSES"));
        assert!(!text.contains("VIOLATIONS"));
    }
}
