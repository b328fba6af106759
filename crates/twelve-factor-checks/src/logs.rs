//! Factor XI: treat logs as event streams.
//!
//! # Rationale
//!
//! The app should write its event stream to stdout and leave routing and
//! storage to the execution environment. Log files on local disk are lost
//! with the process and break horizontal scaling.
//!
//! # Detected Patterns
//!
//! - `FileHandler`/`RotatingFileHandler`, winston `filename:` transports and
//!   log4j `FileAppender` in `.py`, `.js` and `.java` files (violation per
//!   pattern and file)
//! - `console.log`, `print(`, `logging.StreamHandler` or
//!   `System.out.println` anywhere in the stdout sample (one pass)
//!
//! # Configuration
//!
//! - `scan.stdout_sample`: files searched for stdout logging (default: 20)

use twelve_factor_core::{file_name, Check, Factor, Finding, ProjectContext, Signal};

/// Extensions scanned for file-based logging.
const SOURCE_EXTENSIONS: &[&str] = &["py", "js", "java"];

/// Checks that logs go to stdout rather than into files.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogsCheck;

impl LogsCheck {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Check for LogsCheck {
    fn factor(&self) -> Factor {
        Factor::Logs
    }

    fn description(&self) -> &'static str {
        "No file handlers or appenders, some stdout logging"
    }

    fn check(&self, ctx: &ProjectContext<'_>) -> Vec<Finding> {
        let factor = self.factor();
        let mut findings = Vec::new();

        // One file in memory at a time; sorted back to pattern-major order.
        let patterns = ctx.patterns.patterns(Signal::FileLogging);
        let mut file_logging = Vec::new();
        for path in ctx.files_with_extensions(SOURCE_EXTENSIONS) {
            let Some(content) = ctx.read_text(&path) else {
                continue;
            };
            for (index, pattern) in patterns.iter().enumerate() {
                if pattern.is_match(&content) {
                    let finding = Finding::violation(
                        factor,
                        format!("{} in {}", pattern.description(), file_name(&path)),
                    )
                    .with_file(ctx.relative(&path));
                    file_logging.push((index, finding));
                }
            }
        }
        file_logging.sort_by_key(|(index, _)| *index);
        findings.extend(file_logging.into_iter().map(|(_, finding)| finding));

        let streams_to_stdout = ctx
            .all_files()
            .into_iter()
            .take(ctx.scan.stdout_sample)
            .filter_map(|path| ctx.read_text(&path))
            .any(|content| ctx.patterns.first_match(Signal::StdoutLogging, &content).is_some());

        if streams_to_stdout {
            findings.push(Finding::pass(factor, "stdout/console logging detected"));
        }

        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{passes, violations, Fixture};
    use twelve_factor_core::ScanConfig;

    #[test]
    fn nothing_to_report() {
        let findings = Fixture::new()
            .file("README.md", "# app\n")
            .run(&LogsCheck);
        assert!(findings.is_empty());
    }

    #[test]
    fn file_logging_in_every_language_is_recorded() {
        let findings = Fixture::new()
            .file("app.py", "handler = logging.FileHandler('app.log')\n")
            .file(
                "src/logger.js",
                "winston.createLogger({ transports: [file({ filename: 'app.log' })] })\n",
            )
            .file(
                "src/Main.java",
                "// log4j.appender.file=org.apache.log4j.FileAppender\n",
            )
            .run(&LogsCheck);
        assert_eq!(
            violations(&findings),
            vec![
                "File-based logging (Python) in app.py",
                "File-based logging (Node.js) in logger.js",
                "File-based logging (Java) in Main.java",
            ]
        );
    }

    #[test]
    fn violations_are_not_deduplicated_across_files() {
        let findings = Fixture::new()
            .file("a.py", "RotatingFileHandler('a.log')\n")
            .file("b.js", "// FileHandler\n")
            .file("c.java", "new FileHandler(\"c.log\")\n")
            .run(&LogsCheck);
        assert_eq!(
            violations(&findings),
            vec![
                "File-based logging (Python) in a.py",
                "File-based logging (Python) in b.js",
                "File-based logging (Python) in c.java",
            ]
        );
    }

    #[test]
    fn violations_are_grouped_by_pattern_then_file() {
        let findings = Fixture::new()
            .file("a.js", "winston.createLogger({ filename: 'a.log' })\n")
            .file("b.py", "logging.FileHandler('b.log')\n")
            .file("c.js", "winston.add({ filename: 'c.log' }) // FileHandler\n")
            .run(&LogsCheck);
        assert_eq!(
            violations(&findings),
            vec![
                "File-based logging (Python) in b.py",
                "File-based logging (Python) in c.js",
                "File-based logging (Node.js) in a.js",
                "File-based logging (Node.js) in c.js",
            ]
        );
    }

    #[test]
    fn console_logging_passes_once() {
        let findings = Fixture::new()
            .file("index.js", "console.log('up')\n")
            .file("main.py", "print('up')\n")
            .run(&LogsCheck);
        assert_eq!(passes(&findings), vec!["stdout/console logging detected"]);
    }

    #[test]
    fn stdout_scan_is_sampled() {
        let scan = ScanConfig {
            stdout_sample: 1,
            ..ScanConfig::default()
        };
        let findings = Fixture::new()
            .file("a.txt", "nothing here\n")
            .file("b.js", "console.log('up')\n")
            .scan(scan)
            .run(&LogsCheck);
        assert!(passes(&findings).is_empty());
    }

    #[test]
    fn stdout_sample_covers_any_extension() {
        let findings = Fixture::new()
            .file("scripts/run.sh", "python -c 'print(1)'\n")
            .run(&LogsCheck);
        assert_eq!(passes(&findings), vec!["stdout/console logging detected"]);
    }
}
