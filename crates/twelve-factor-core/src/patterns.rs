//! Regex pattern table shared by content-scanning checks.
//!
//! Each [`Signal`] names something a check looks for in file contents and
//! maps to an ordered list of `(regex, description)` entries. The built-in
//! entries cover common Node.js, Python, Ruby, Java and shell idioms;
//! configuration can append more without touching check logic.

use crate::config::Config;
use crate::engine::EngineError;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Something a check looks for in file contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Signal {
    /// Hardcoded secrets, URLs, or constants (Factor III).
    SuspiciousConfig,
    /// In-process session state (Factor VI).
    SessionState,
    /// Writes to the local filesystem outside temp directories (Factor VI).
    FilesystemWrite,
    /// Listening on a port taken from the environment (Factor VII).
    PortBinding,
    /// Trapping the termination signal (Factor IX).
    SignalHandler,
    /// Logging into files instead of streams (Factor XI).
    FileLogging,
    /// Logging to stdout or the console (Factor XI).
    StdoutLogging,
}

impl Signal {
    /// All signals.
    pub const ALL: [Self; 7] = [
        Self::SuspiciousConfig,
        Self::SessionState,
        Self::FilesystemWrite,
        Self::PortBinding,
        Self::SignalHandler,
        Self::FileLogging,
        Self::StdoutLogging,
    ];

    /// Kebab-case name used in configuration.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::SuspiciousConfig => "suspicious-config",
            Self::SessionState => "session-state",
            Self::FilesystemWrite => "filesystem-write",
            Self::PortBinding => "port-binding",
            Self::SignalHandler => "signal-handler",
            Self::FileLogging => "file-logging",
            Self::StdoutLogging => "stdout-logging",
        }
    }

    /// Looks a signal up by its configuration name.
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.slug() == slug)
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

/// Uncompiled pattern entry, as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSpec {
    /// Regular expression (`regex` crate syntax).
    pub regex: String,
    /// What a match means, used in finding messages.
    pub description: String,
    /// Match ignoring ASCII and Unicode case.
    #[serde(default)]
    pub case_insensitive: bool,
    /// A match whose text contains any of these substrings is discarded.
    #[serde(default)]
    pub ignore_if_contains: Vec<String>,
}

struct Builtin {
    regex: &'static str,
    description: &'static str,
    case_insensitive: bool,
    ignore_if_contains: &'static [&'static str],
}

const fn builtin(regex: &'static str, description: &'static str) -> Builtin {
    Builtin {
        regex,
        description,
        case_insensitive: false,
        ignore_if_contains: &[],
    }
}

const fn builtin_ci(regex: &'static str, description: &'static str) -> Builtin {
    Builtin {
        regex,
        description,
        case_insensitive: true,
        ignore_if_contains: &[],
    }
}

const SUSPICIOUS_CONFIG: &[Builtin] = &[
    builtin_ci(
        r#"(password|secret|key|token)\s*=\s*["'][\w\d]{8,}["']"#,
        "Hardcoded secrets",
    ),
    builtin_ci(r"(localhost|127\.0\.0\.1):\d+", "Hardcoded localhost URLs"),
    builtin_ci(
        r"https?://[a-zA-Z0-9\.\-]+\.(com|org|net)",
        "Hardcoded external URLs",
    ),
    builtin_ci(r#"[A-Z_]+\s*=\s*["'][^"']+["']"#, "Possible hardcoded config"),
];

const SESSION_STATE: &[Builtin] = &[
    builtin_ci(r"session\[.+\]\s*=", "Session storage detected"),
    builtin_ci(
        r"express-session.*store:\s*new\s*\w+Store",
        "Server-side session store",
    ),
    builtin_ci(r"sticky.?session", "Sticky sessions detected"),
];

const FILESYSTEM_WRITE: &[Builtin] = &[
    Builtin {
        regex: r"fs\.write[^;\n]*",
        description: "Writing to non-temp filesystem",
        case_insensitive: false,
        ignore_if_contains: &["/tmp", "/temp"],
    },
    builtin(r#"File\.open.*["']w["']"#, "File write operations detected"),
];

const PORT_BINDING: &[Builtin] = &[
    builtin(
        r"app\.listen\(.*process\.env\.PORT",
        "Express.js with PORT env var",
    ),
    builtin(
        r"http\.createServer.*\.listen\(.*process\.env\.PORT",
        "Node.js HTTP server",
    ),
    builtin(
        r#"port\s*=\s*os\.environ\.get\(["']PORT"#,
        "Python PORT configuration",
    ),
    builtin(r"Rails\.application\.config\.port", "Rails port configuration"),
];

const SIGNAL_HANDLER: &[Builtin] = &[
    builtin(r#"process\.on\(["']SIGTERM"#, "SIGTERM handler (Node.js)"),
    builtin(r"signal\.signal\(signal\.SIGTERM", "SIGTERM handler (Python)"),
    builtin(r"trap.*TERM", "SIGTERM trap (Shell)"),
];

const FILE_LOGGING: &[Builtin] = &[
    builtin(
        r"FileHandler|RotatingFileHandler",
        "File-based logging (Python)",
    ),
    builtin(r"winston.*filename:", "File-based logging (Node.js)"),
    builtin(r"log4j.*FileAppender", "File-based logging (Java)"),
];

const STDOUT_LOGGING: &[Builtin] = &[
    builtin(r"console\.log|console\.error", "Console logging (Node.js)"),
    builtin(r"print\(|logging\.StreamHandler", "stdout logging (Python)"),
    builtin(r"System\.out\.println", "stdout logging (Java)"),
];

fn builtins(signal: Signal) -> &'static [Builtin] {
    match signal {
        Signal::SuspiciousConfig => SUSPICIOUS_CONFIG,
        Signal::SessionState => SESSION_STATE,
        Signal::FilesystemWrite => FILESYSTEM_WRITE,
        Signal::PortBinding => PORT_BINDING,
        Signal::SignalHandler => SIGNAL_HANDLER,
        Signal::FileLogging => FILE_LOGGING,
        Signal::StdoutLogging => STDOUT_LOGGING,
    }
}

/// Returns the built-in entries for a signal as editable specs.
#[must_use]
pub fn builtin_specs(signal: Signal) -> Vec<PatternSpec> {
    builtins(signal)
        .iter()
        .map(|b| PatternSpec {
            regex: b.regex.to_string(),
            description: b.description.to_string(),
            case_insensitive: b.case_insensitive,
            ignore_if_contains: b.ignore_if_contains.iter().map(|s| (*s).to_string()).collect(),
        })
        .collect()
}

/// A compiled pattern entry.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
    description: String,
    ignore_if_contains: Vec<String>,
}

impl Pattern {
    /// Compiles a spec.
    ///
    /// # Errors
    ///
    /// Returns an error if the regular expression is invalid.
    pub fn compile(signal: Signal, spec: &PatternSpec) -> Result<Self, EngineError> {
        let regex = RegexBuilder::new(&spec.regex)
            .case_insensitive(spec.case_insensitive)
            .build()
            .map_err(|source| EngineError::Pattern {
                signal,
                regex: spec.regex.clone(),
                source,
            })?;
        Ok(Self {
            regex,
            description: spec.description.clone(),
            ignore_if_contains: spec.ignore_if_contains.clone(),
        })
    }

    /// What a match means.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns true if `content` contains a match that is not discarded.
    #[must_use]
    pub fn is_match(&self, content: &str) -> bool {
        if self.ignore_if_contains.is_empty() {
            return self.regex.is_match(content);
        }
        self.regex.find_iter(content).any(|m| {
            !self
                .ignore_if_contains
                .iter()
                .any(|needle| m.as_str().contains(needle.as_str()))
        })
    }
}

/// Compiled patterns for every signal.
#[derive(Debug, Clone, Default)]
pub struct PatternTable {
    entries: HashMap<Signal, Vec<Pattern>>,
}

impl PatternTable {
    /// Compiles the built-in patterns only.
    ///
    /// # Errors
    ///
    /// Returns an error if a built-in regex fails to compile.
    pub fn builtin() -> Result<Self, EngineError> {
        Self::compile(&Config::default())
    }

    /// Compiles the built-in patterns plus those appended by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if a regex fails to compile or a configured signal
    /// name is unknown.
    pub fn compile(config: &Config) -> Result<Self, EngineError> {
        let mut entries: HashMap<Signal, Vec<Pattern>> = HashMap::new();

        for signal in Signal::ALL {
            let compiled = builtin_specs(signal)
                .iter()
                .map(|spec| Pattern::compile(signal, spec))
                .collect::<Result<Vec<_>, _>>()?;
            entries.insert(signal, compiled);
        }

        for (name, specs) in &config.patterns {
            let signal =
                Signal::from_slug(name).ok_or_else(|| EngineError::UnknownSignal(name.clone()))?;
            let list = entries.entry(signal).or_default();
            for spec in specs {
                list.push(Pattern::compile(signal, spec)?);
            }
        }

        Ok(Self { entries })
    }

    /// Patterns registered for a signal, in order.
    #[must_use]
    pub fn patterns(&self, signal: Signal) -> &[Pattern] {
        self.entries
            .get(&signal)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// First pattern of `signal` that matches `content`.
    #[must_use]
    pub fn first_match(&self, signal: Signal, content: &str) -> Option<&Pattern> {
        self.patterns(signal).iter().find(|p| p.is_match(content))
    }

    /// Every pattern of `signal` that matches `content`, in table order.
    #[must_use]
    pub fn all_matches(&self, signal: Signal, content: &str) -> Vec<&Pattern> {
        self.patterns(signal)
            .iter()
            .filter(|p| p.is_match(content))
            .collect()
    }
}
