//! Glob resolution with proximity ordering.
//!
//! A scan returns files sorted by how far they sit from the document the
//! user is looking at, so nearby definitions surface first when a caller
//! only consumes the start of the sequence.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use glob::{MatchOptions, Pattern};

use crate::error::{IndexError, IndexResult};
use crate::workspace::Workspace;

/// `*` and `?` never cross a `/`; only `**` spans directories.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// A compiled glob, matched against workspace-relative paths
#[derive(Debug, Clone)]
pub struct GlobPattern {
    source: String,
    pattern: Pattern,
}

impl GlobPattern {
    pub fn new(source: &str) -> IndexResult<Self> {
        let pattern = Pattern::new(source).map_err(|e| IndexError::InvalidGlob {
            pattern: source.to_string(),
            source: e,
        })?;
        Ok(Self {
            source: source.to_string(),
            pattern,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Match a path relative to the workspace root, in either slash style
    pub fn matches(&self, relative: &Path) -> bool {
        let normalized = relative.to_string_lossy().replace('\\', "/");
        self.pattern.matches_with(&normalized, MATCH_OPTIONS)
    }
}

/// Resolves glob patterns to ordered file sequences.
pub struct GlobResolver<'a> {
    workspace: &'a dyn Workspace,
    proximity: bool,
}

impl<'a> GlobResolver<'a> {
    pub fn new(workspace: &'a dyn Workspace) -> Self {
        Self {
            workspace,
            proximity: true,
        }
    }

    /// Enable or disable ordering by distance from the active document
    pub fn with_proximity(mut self, proximity: bool) -> Self {
        self.proximity = proximity;
        self
    }

    /// Enumerate matching files.
    ///
    /// Without an active document the discovery order is kept as is.
    pub fn resolve(&self, pattern: &GlobPattern) -> IndexResult<GlobFiles> {
        let mut files = self.workspace.find_files(pattern)?;
        if self.proximity {
            if let Some(active) = self.workspace.active_document() {
                order_by_distance(&active, &mut files);
            }
        }
        Ok(GlobFiles::new(files))
    }
}

/// Sequence of resolved files.
///
/// Dropping it part way through costs nothing beyond the scan already done;
/// [`GlobFiles::restart`] rewinds to the first file without rescanning.
#[derive(Debug, Clone)]
pub struct GlobFiles {
    files: Arc<[PathBuf]>,
    next: usize,
}

impl GlobFiles {
    fn new(files: Vec<PathBuf>) -> Self {
        Self {
            files: files.into(),
            next: 0,
        }
    }

    pub fn restart(&mut self) {
        self.next = 0;
    }

    /// Total number of files, consumed or not
    pub fn total(&self) -> usize {
        self.files.len()
    }
}

impl Iterator for GlobFiles {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        let file = self.files.get(self.next)?.clone();
        self.next += 1;
        Some(file)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.files.len() - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GlobFiles {}

/// Stable sort by [`path_distance`] from `active`; ties keep discovery order
pub fn order_by_distance(active: &Path, files: &mut [PathBuf]) {
    files.sort_by_key(|file| path_distance(active, file));
}

/// Number of components in the relative path from the directory containing
/// `from_file` to `to`.
///
/// `a/b/c.json` to `a/b/d.json` is 1 (`d.json`); to `a/x/y/d.json` it is 4
/// (`../x/y/d.json`).
pub fn path_distance(from_file: &Path, to: &Path) -> usize {
    let from: Vec<Component> = from_file
        .parent()
        .map(|dir| dir.components().collect())
        .unwrap_or_default();
    let target: Vec<Component> = to.components().collect();

    let shared = from
        .iter()
        .zip(&target)
        .take_while(|(a, b)| a == b)
        .count();

    (from.len() - shared) + (target.len() - shared)
}
