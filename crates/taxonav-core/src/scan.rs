use std::fs;
use std::path::{Component, Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::Serialize;
use walkdir::WalkDir;

use crate::error::{Result, TaxonavError};
use crate::frontmatter;
use crate::models::MetadataRecord;

/// Filtering options for a post scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Lowercased file extensions accepted as posts.
    pub extensions: Vec<String>,
    /// Exclude source paths by glob, matched against the path relative
    /// to the posts directory.
    pub exclude_globs: Vec<String>,
    /// Include hidden files and directories.
    pub include_hidden: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            extensions: vec!["md".to_string(), "markdown".to_string()],
            exclude_globs: Vec::new(),
            include_hidden: false,
        }
    }
}

/// Result of one scan pass over the posts directory.
///
/// `records` preserves enumeration order. Posts that could not be read
/// or whose frontmatter failed to parse land in `skipped`; a per-file
/// failure never aborts the scan.
#[derive(Debug, Clone, Serialize)]
pub struct ScanOutcome {
    pub records: Vec<MetadataRecord>,
    pub skipped: Vec<SkippedPost>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkippedPost {
    pub path: String,
    pub reason: String,
}

/// Enumerates and parses post files under one directory.
#[derive(Debug)]
pub struct PostScanner {
    posts_dir: PathBuf,
    options: ScanOptions,
    exclude: GlobSet,
}

impl PostScanner {
    pub fn new(posts_dir: impl Into<PathBuf>) -> Result<Self> {
        Self::with_options(posts_dir, ScanOptions::default())
    }

    pub fn with_options(posts_dir: impl Into<PathBuf>, options: ScanOptions) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &options.exclude_globs {
            let trimmed = pattern.trim();
            if trimmed.is_empty() {
                continue;
            }
            let glob = Glob::new(trimmed).map_err(|err| {
                TaxonavError::Validation(format!("invalid exclude glob '{trimmed}': {err}"))
            })?;
            builder.add(glob);
        }
        let exclude = builder
            .build()
            .map_err(|err| TaxonavError::Validation(format!("invalid exclude globs: {err}")))?;

        Ok(Self {
            posts_dir: posts_dir.into(),
            options,
            exclude,
        })
    }

    #[must_use]
    pub fn posts_dir(&self) -> &Path {
        &self.posts_dir
    }

    /// Post paths in deterministic (sorted) enumeration order.
    ///
    /// Index tie-break order is defined by this listing, never by read
    /// completion order. A missing posts directory lists as empty.
    pub fn list_posts(&self) -> Result<Vec<PathBuf>> {
        if !self.posts_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();
        for entry in WalkDir::new(&self.posts_dir).follow_links(false) {
            let entry = entry.map_err(|e| TaxonavError::Validation(e.to_string()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(&self.posts_dir)
                .map_err(|e| TaxonavError::Validation(e.to_string()))?;
            if self.allows_file(relative) {
                posts.push(entry.path().to_path_buf());
            }
        }
        posts.sort();
        Ok(posts)
    }

    /// Reads and parses every listed post into a metadata record.
    pub fn scan(&self) -> Result<ScanOutcome> {
        let mut records = Vec::new();
        let mut skipped = Vec::new();

        for path in self.list_posts()? {
            let source_id = path.to_string_lossy().to_string();
            let raw = match fs::read_to_string(&path) {
                Ok(raw) => raw,
                Err(err) => {
                    skipped.push(SkippedPost {
                        path: source_id,
                        reason: format!("read failed: {err}"),
                    });
                    continue;
                }
            };
            match frontmatter::parse(&source_id, &raw) {
                Ok(parsed) => records.push(parsed.record),
                Err(err) => skipped.push(SkippedPost {
                    path: source_id,
                    reason: err.to_string(),
                }),
            }
        }

        Ok(ScanOutcome { records, skipped })
    }

    fn allows_file(&self, relative: &Path) -> bool {
        if !self.options.include_hidden && path_has_hidden_component(relative) {
            return false;
        }
        if self.exclude.is_match(relative_to_unix_path(relative)) {
            return false;
        }
        relative
            .extension()
            .and_then(|x| x.to_str())
            .map(|x| {
                let lowered = x.to_ascii_lowercase();
                self.options.extensions.iter().any(|ext| *ext == lowered)
            })
            .unwrap_or(false)
    }
}

fn path_has_hidden_component(path: &Path) -> bool {
    path.components().any(|component| match component {
        Component::Normal(part) => part.to_string_lossy().starts_with('.'),
        _ => false,
    })
}

fn relative_to_unix_path(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
