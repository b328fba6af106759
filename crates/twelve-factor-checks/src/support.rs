//! Helpers shared by several checks.

use std::path::PathBuf;
use twelve_factor_core::{Pattern, ProjectContext, Signal};

/// Multi-service compose descriptors, in lookup order.
pub const COMPOSE_FILES: &[&str] = &[
    "docker-compose.yml",
    "docker-compose.yaml",
    "compose.yml",
    "compose.yaml",
];

/// Build-image descriptor.
pub const DOCKERFILE: &str = "Dockerfile";

/// First compose descriptor present in the project root.
pub fn compose_file(ctx: &ProjectContext<'_>) -> Option<&'static str> {
    ctx.first_existing(COMPOSE_FILES)
}

/// For each pattern of `signal`, the first of `files` it matches.
///
/// Results follow pattern order; patterns that match nothing are omitted.
/// Each file is read at most once and the scan stops as soon as every
/// pattern has been seen.
pub fn first_file_per_pattern<'t>(
    ctx: &ProjectContext<'t>,
    signal: Signal,
    files: &[PathBuf],
) -> Vec<(&'t Pattern, PathBuf)> {
    let patterns = ctx.patterns.patterns(signal);
    let mut hits: Vec<Option<PathBuf>> = vec![None; patterns.len()];

    for path in files {
        if hits.iter().all(Option::is_some) {
            break;
        }
        let Some(content) = ctx.read_text(path) else {
            continue;
        };
        for (slot, pattern) in hits.iter_mut().zip(patterns) {
            if slot.is_none() && pattern.is_match(&content) {
                *slot = Some(ctx.relative(path));
            }
        }
    }

    patterns
        .iter()
        .zip(hits)
        .filter_map(|(pattern, hit)| hit.map(|path| (pattern, path)))
        .collect()
}
