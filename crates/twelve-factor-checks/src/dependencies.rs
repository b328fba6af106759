//! Factor II: explicitly declare and isolate dependencies.
//!
//! Every manifest present in the project root is inspected by its own
//! parser, which counts declared versions that are not exact pins. A
//! manifest that cannot be read or parsed is still counted as present but
//! produces no finding of its own.
//!
//! # Detected Patterns
//!
//! - `package.json`: `dependencies` values using `^`, `~` or `*`
//! - `requirements.txt`, `Pipfile`: requirements not pinned with `==`
//! - `Gemfile`: gems without an exact version
//! - `pom.xml`: dependency and plugin version ranges, `LATEST`, `RELEASE`
//! - `build.gradle`: `+` and `latest.` coordinates
//! - `go.mod`: always exact
//!
//! A lock file from any ecosystem passes separately.

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;
use twelve_factor_core::{Check, Factor, Finding, ProjectContext};

/// Lock files pinning resolved versions.
const LOCK_FILES: &[&str] = &[
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "Pipfile.lock",
    "poetry.lock",
    "Gemfile.lock",
    "go.sum",
];

/// How the versions declared in one manifest are constrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pinning {
    /// Every declared version is exact.
    Exact,
    /// This many declared versions are ranges, wildcards, or missing.
    Fuzzy(usize),
}

impl Pinning {
    fn from_fuzzy_count(count: usize) -> Self {
        if count == 0 {
            Self::Exact
        } else {
            Self::Fuzzy(count)
        }
    }
}

struct Manifest {
    file: &'static str,
    ecosystem: &'static str,
    inspect: fn(&str) -> Option<Pinning>,
}

const MANIFESTS: &[Manifest] = &[
    Manifest {
        file: "package.json",
        ecosystem: "npm",
        inspect: inspect_package_json,
    },
    Manifest {
        file: "requirements.txt",
        ecosystem: "Python",
        inspect: inspect_requirements,
    },
    Manifest {
        file: "Pipfile",
        ecosystem: "Pipenv",
        inspect: inspect_pipfile,
    },
    Manifest {
        file: "Gemfile",
        ecosystem: "Ruby",
        inspect: inspect_gemfile,
    },
    Manifest {
        file: "pom.xml",
        ecosystem: "Maven",
        inspect: inspect_pom,
    },
    Manifest {
        file: "build.gradle",
        ecosystem: "Gradle",
        inspect: inspect_gradle,
    },
    Manifest {
        file: "go.mod",
        ecosystem: "Go",
        inspect: inspect_go_mod,
    },
];

/// Checks dependency manifests, version pinning, and lock files.
#[derive(Debug, Clone, Copy, Default)]
pub struct DependenciesCheck;

impl DependenciesCheck {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Check for DependenciesCheck {
    fn factor(&self) -> Factor {
        Factor::Dependencies
    }

    fn description(&self) -> &'static str {
        "Dependency manifests with exact versions and a lock file"
    }

    fn check(&self, ctx: &ProjectContext<'_>) -> Vec<Finding> {
        let factor = self.factor();
        let mut findings = Vec::new();
        let mut manifest_found = false;

        for manifest in MANIFESTS {
            if !ctx.exists(manifest.file) {
                continue;
            }
            manifest_found = true;

            let Some(content) = ctx.read_relative(manifest.file) else {
                continue;
            };
            let Some(pinning) = (manifest.inspect)(&content) else {
                debug!("Could not parse {}", manifest.file);
                continue;
            };

            findings.push(match pinning {
                Pinning::Exact => Finding::pass(
                    factor,
                    format!(
                        "All {} dependencies have exact versions",
                        manifest.ecosystem
                    ),
                )
                .with_file(manifest.file),
                Pinning::Fuzzy(count) => Finding::warning(
                    factor,
                    format!(
                        "{count} {} dependencies without exact versions",
                        manifest.ecosystem
                    ),
                )
                .with_file(manifest.file)
                .with_count(count),
            });
        }

        if !manifest_found {
            findings.push(Finding::violation(factor, "No dependency manifest found"));
        }

        if let Some(lock) = ctx.first_existing(LOCK_FILES) {
            findings.push(Finding::pass(factor, "Dependency lock file present").with_file(lock));
        } else {
            findings.push(Finding::warning(
                factor,
                "No lock file found - exact versions not guaranteed",
            ));
        }

        findings
    }
}

/// `dependencies` values using `^`, `~` or `*` are fuzzy.
fn inspect_package_json(content: &str) -> Option<Pinning> {
    let json: serde_json::Value = serde_json::from_str(content).ok()?;
    let fuzzy = json
        .get("dependencies")
        .and_then(serde_json::Value::as_object)
        .map_or(0, |deps| {
            deps.values()
                .filter_map(serde_json::Value::as_str)
                .filter(|v| v.contains(['^', '~', '*']))
                .count()
        });
    Some(Pinning::from_fuzzy_count(fuzzy))
}

/// Requirement lines without `==` are fuzzy; option lines (`-r`, `-e`) are ignored.
#[allow(clippy::unnecessary_wraps)]
fn inspect_requirements(content: &str) -> Option<Pinning> {
    let fuzzy = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter(|line| !line.contains("==") && !line.starts_with('-'))
        .count();
    Some(Pinning::from_fuzzy_count(fuzzy))
}

/// Pipfile packages are exact only when pinned with `==`.
fn inspect_pipfile(content: &str) -> Option<Pinning> {
    let table: toml::Table = content.parse().ok()?;
    let fuzzy = ["packages", "dev-packages"]
        .iter()
        .filter_map(|section| table.get(*section).and_then(toml::Value::as_table))
        .flat_map(toml::Table::values)
        .filter(|spec| {
            let version = match spec {
                toml::Value::String(s) => Some(s.as_str()),
                toml::Value::Table(t) => t.get("version").and_then(toml::Value::as_str),
                _ => None,
            };
            !version.is_some_and(is_double_equals_pin)
        })
        .count();
    Some(Pinning::from_fuzzy_count(fuzzy))
}

fn is_double_equals_pin(version: &str) -> bool {
    version
        .trim()
        .strip_prefix("==")
        .is_some_and(|rest| !rest.is_empty() && !rest.contains([',', '*']))
}

/// `gem` lines with no version or a non-exact constraint are fuzzy.
#[allow(clippy::unnecessary_wraps)]
fn inspect_gemfile(content: &str) -> Option<Pinning> {
    let fuzzy = content
        .lines()
        .map(str::trim)
        .filter_map(|line| {
            line.strip_prefix("gem ")
                .or_else(|| line.strip_prefix("gem("))
        })
        .filter(|args| {
            let constraints: Vec<&str> = args
                .split(',')
                .skip(1)
                .map(str::trim)
                .filter(|arg| arg.starts_with(['"', '\'']))
                .map(|arg| arg.trim_matches(|c| c == '"' || c == '\'' || c == ')'))
                .collect();
            constraints.is_empty() || !constraints.iter().all(|c| is_exact_gem_version(c))
        })
        .count();
    Some(Pinning::from_fuzzy_count(fuzzy))
}

fn is_exact_gem_version(constraint: &str) -> bool {
    let version = constraint
        .trim()
        .strip_prefix('=')
        .map_or(constraint.trim(), str::trim_start);
    version.starts_with(|c: char| c.is_ascii_digit()) && !version.contains(['>', '<', '~'])
}

/// Elements whose `<version>` child declares a dependency version.
const POM_VERSIONED: &[&[u8]] = &[b"dependency", b"plugin"];

/// Dependency and plugin `<version>` ranges (`[1.0,2.0)`) and
/// `LATEST`/`RELEASE` are fuzzy. Comments are skipped by the XML reader.
fn inspect_pom(content: &str) -> Option<Pinning> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut open: Vec<Vec<u8>> = Vec::new();
    let mut fuzzy = 0;
    loop {
        match reader.read_event() {
            Ok(Event::Start(element)) => open.push(element.local_name().as_ref().to_vec()),
            Ok(Event::End(_)) => {
                open.pop();
            }
            Ok(Event::Text(text)) => {
                let declares_version = matches!(
                    open.as_slice(),
                    [.., parent, child]
                        if child.as_slice() == b"version"
                            && POM_VERSIONED.contains(&parent.as_slice())
                );
                if declares_version && is_fuzzy_maven_version(text.unescape().ok()?.trim()) {
                    fuzzy += 1;
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                debug!("Malformed pom.xml at byte {}: {e}", reader.error_position());
                return None;
            }
        }
    }
    Some(Pinning::from_fuzzy_count(fuzzy))
}

fn is_fuzzy_maven_version(version: &str) -> bool {
    version.starts_with(['[', '(']) || version == "LATEST" || version == "RELEASE"
}

/// Coordinates ending in `+` or using `latest.` are dynamic.
#[allow(clippy::unnecessary_wraps)]
fn inspect_gradle(content: &str) -> Option<Pinning> {
    let fuzzy = content
        .lines()
        .flat_map(quoted_strings)
        .filter(|s| s.matches(':').count() >= 2)
        .filter_map(|coordinate| coordinate.rsplit(':').next())
        .filter(|version| version.ends_with('+') || version.starts_with("latest."))
        .count();
    Some(Pinning::from_fuzzy_count(fuzzy))
}

/// Go module versions are always exact (tags or pseudo-versions).
#[allow(clippy::unnecessary_wraps)]
fn inspect_go_mod(_content: &str) -> Option<Pinning> {
    Some(Pinning::Exact)
}

/// Single- or double-quoted substrings of a line.
fn quoted_strings(line: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut rest = line;
    while let Some(start) = rest.find(['"', '\'']) {
        let quote = rest[start..].chars().next().unwrap_or('"');
        let after = &rest[start + 1..];
        let Some(end) = after.find(quote) else {
            break;
        };
        out.push(&after[..end]);
        rest = &after[end + 1..];
    }
    out
}
