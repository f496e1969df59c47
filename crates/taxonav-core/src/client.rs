use std::path::{Path, PathBuf};

use crate::config::EnvOverrides;
use crate::error::Result;
use crate::indexer::TaxonomyIndex;
use crate::models::{TaxonomyAxis, TaxonomyTree};
use crate::scan::{PostScanner, ScanOptions, ScanOutcome};
use crate::workspace::BlogWorkspace;

type RebuildSubscriber = Box<dyn Fn(&TaxonomyIndex) + Send + Sync>;

/// Facade over workspace detection, post scanning and taxonomy indexing.
///
/// An index is rebuilt in full on every query; there is no caching
/// contract. Subscribers registered with `on_rebuild` are notified after
/// each rebuild, including the empty rebuild of an ineligible workspace,
/// so a host UI can always refresh from the latest index.
pub struct Taxonav {
    root: PathBuf,
    overrides: EnvOverrides,
    subscribers: Vec<RebuildSubscriber>,
}

impl std::fmt::Debug for Taxonav {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Taxonav")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl Taxonav {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            overrides: EnvOverrides::from_env(),
            subscribers: Vec::new(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn is_eligible(&self) -> bool {
        BlogWorkspace::detect(&self.root).is_some()
    }

    /// Registers a callback invoked after every index rebuild.
    pub fn on_rebuild(&mut self, subscriber: impl Fn(&TaxonomyIndex) + Send + Sync + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Scans the workspace posts without building an index.
    pub fn scan(&self) -> Result<ScanOutcome> {
        match self.scanner()? {
            Some(scanner) => scanner.scan(),
            None => Ok(ScanOutcome {
                records: Vec::new(),
                skipped: Vec::new(),
            }),
        }
    }

    /// Rebuilds the taxonomy index for one axis from the current posts.
    ///
    /// An ineligible workspace yields an empty index (the host renders
    /// an empty tree), not an error.
    pub fn rebuild(&self, axis: TaxonomyAxis) -> Result<TaxonomyIndex> {
        let index = match self.scanner()? {
            Some(scanner) => {
                let outcome = scanner.scan()?;
                TaxonomyIndex::build(&outcome.records, axis)?
            }
            None => TaxonomyIndex::empty(axis),
        };
        for subscriber in &self.subscribers {
            subscriber(&index);
        }
        Ok(index)
    }

    /// Two-level term -> files view for one axis.
    pub fn tree(&self, axis: TaxonomyAxis) -> Result<TaxonomyTree> {
        let index = self.rebuild(axis)?;
        Ok(TaxonomyTree::from_index(&index))
    }

    fn scanner(&self) -> Result<Option<PostScanner>> {
        let posts_dir = match &self.overrides.posts_dir {
            Some(dir) if dir.is_absolute() => Some(dir.clone()),
            Some(dir) => Some(self.root.join(dir)),
            None => BlogWorkspace::detect(&self.root).map(|ws| ws.posts_dir().to_path_buf()),
        };
        let Some(posts_dir) = posts_dir else {
            return Ok(None);
        };

        let mut options = ScanOptions::default();
        if let Some(include_hidden) = self.overrides.include_hidden {
            options.include_hidden = include_hidden;
        }
        options
            .exclude_globs
            .extend(self.overrides.exclude_globs.iter().cloned());

        PostScanner::with_options(posts_dir, options).map(Some)
    }
}
