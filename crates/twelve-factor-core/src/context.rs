//! Context types for check execution.

use crate::config::ScanConfig;
use crate::patterns::PatternTable;

use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Why a file's contents could not be used.
///
/// Every variant is an expected property of arbitrary project trees, so
/// [`ProjectContext::read_text`] logs and skips them.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// The file could not be opened or read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The file is not UTF-8 text (binary content, other encodings).
    #[error("{} is not valid UTF-8", path.display())]
    NotText {
        /// File that failed.
        path: PathBuf,
    },

    /// The file exceeds the configured size limit.
    #[error("{} is {size} bytes, over the {limit} byte limit", path.display())]
    TooLarge {
        /// File that was skipped.
        path: PathBuf,
        /// Actual size.
        size: u64,
        /// Configured limit.
        limit: u64,
    },

    /// The path exists but is not a regular file (directory, FIFO, socket).
    #[error("{} is not a regular file", path.display())]
    NotAFile {
        /// Path that was skipped.
        path: PathBuf,
    },
}

/// Context provided to checks.
///
/// Gives read-only access to the project tree: existence tests relative to
/// the root, deterministic file enumeration, and tolerant text reading.
/// Nothing is cached, so every call walks or reads the filesystem again.
#[derive(Debug, Clone, Copy)]
pub struct ProjectContext<'a> {
    /// Root directory of the project.
    pub root: &'a Path,
    /// Enumeration and sampling settings.
    pub scan: &'a ScanConfig,
    /// Compiled content patterns.
    pub patterns: &'a PatternTable,
}

impl<'a> ProjectContext<'a> {
    /// Creates a new project context.
    #[must_use]
    pub fn new(root: &'a Path, scan: &'a ScanConfig, patterns: &'a PatternTable) -> Self {
        Self {
            root,
            scan,
            patterns,
        }
    }

    /// Returns true if `relative` (file or directory) exists under the root.
    #[must_use]
    pub fn exists(&self, relative: &str) -> bool {
        self.root.join(relative).exists()
    }

    /// Returns true if any of `candidates` exists under the root.
    #[must_use]
    pub fn exists_any(&self, candidates: &[&str]) -> bool {
        candidates.iter().any(|c| self.exists(c))
    }

    /// Returns the first of `candidates` that exists under the root.
    #[must_use]
    pub fn first_existing<'c>(&self, candidates: &[&'c str]) -> Option<&'c str> {
        candidates.iter().copied().find(|c| self.exists(c))
    }

    /// All regular files under the root, depth-first, sorted by name.
    ///
    /// Directories named in `scan.exclude_dirs` are pruned. Entries that
    /// cannot be visited are skipped.
    #[must_use]
    pub fn all_files(&self) -> Vec<PathBuf> {
        self.walk(|_| true)
    }

    /// Files whose extension is exactly `ext` (without the dot).
    #[must_use]
    pub fn files_with_extension(&self, ext: &str) -> Vec<PathBuf> {
        self.walk(|path| has_extension(path, ext))
    }

    /// Files whose extension is any of `exts`, in a single traversal.
    #[must_use]
    pub fn files_with_extensions(&self, exts: &[&str]) -> Vec<PathBuf> {
        self.walk(|path| exts.iter().any(|ext| has_extension(path, ext)))
    }

    fn walk(&self, keep: impl Fn(&Path) -> bool) -> Vec<PathBuf> {
        let exclude = &self.scan.exclude_dirs;

        WalkDir::new(self.root)
            .follow_links(self.scan.follow_links)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !(entry.file_type().is_dir()
                        && entry
                            .file_name()
                            .to_str()
                            .is_some_and(|name| exclude.iter().any(|e| e == name)))
            })
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    debug!("Skipping unreadable entry: {e}");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(walkdir::DirEntry::into_path)
            .filter(|path| keep(path))
            .collect()
    }

    /// Reads a file as UTF-8 text, reporting why it could not be used.
    ///
    /// # Errors
    ///
    /// Returns a [`ReadError`] if the path is not a regular file, or the file
    /// is unreadable, too large, or not text.
    pub fn try_read(&self, path: &Path) -> Result<String, ReadError> {
        let io_err = |source| ReadError::Io {
            path: path.to_path_buf(),
            source,
        };

        // Opening a FIFO blocks until a writer appears.
        let metadata = std::fs::metadata(path).map_err(io_err)?;
        if !metadata.is_file() {
            return Err(ReadError::NotAFile {
                path: path.to_path_buf(),
            });
        }

        let size = metadata.len();
        if size > self.scan.max_file_bytes {
            return Err(ReadError::TooLarge {
                path: path.to_path_buf(),
                size,
                limit: self.scan.max_file_bytes,
            });
        }

        let bytes = std::fs::read(path).map_err(io_err)?;
        String::from_utf8(bytes).map_err(|_| ReadError::NotText {
            path: path.to_path_buf(),
        })
    }

    /// Reads a file as UTF-8 text, or `None` if it cannot be used.
    ///
    /// Failures are logged at debug level and otherwise ignored; a single
    /// bad file never aborts a check.
    #[must_use]
    pub fn read_text(&self, path: &Path) -> Option<String> {
        match self.try_read(path) {
            Ok(content) => Some(content),
            Err(e) => {
                debug!("Skipping file: {e}");
                None
            }
        }
    }

    /// Reads a file given relative to the root.
    #[must_use]
    pub fn read_relative(&self, relative: &str) -> Option<String> {
        self.read_text(&self.root.join(relative))
    }

    /// Path relative to the project root, for messages.
    #[must_use]
    pub fn relative(&self, path: &Path) -> PathBuf {
        path.strip_prefix(self.root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf)
    }
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension().is_some_and(|e| e == ext)
}

/// Base name of a path, for messages that name a file without its directory.
#[must_use]
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(String::new, |n| n.to_string_lossy().into_owned())
}
