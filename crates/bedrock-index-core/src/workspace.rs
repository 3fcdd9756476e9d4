//! Workspace abstraction for testability
//!
//! The index never touches the file system directly. Everything it needs
//! from the host (glob search, open-by-path, the active document) goes
//! through the [`Workspace`] trait.
//!
//! For production code, use [`DiskWorkspace`], which walks the workspace
//! root with `ignore` and reads through the size-limited reader in
//! `file_utils`. Hidden directories and `.gitignore`d files are walked like
//! any other; only the configured `exclude` globs leave files out.
//!
//! For tests, use [`MockWorkspace`], an in-memory store that also counts
//! glob scans and reads so tests can check how much work the index did.
//!
//! ## Example
//!
//! ```rust,ignore
//! use bedrock_index_core::workspace::{MockWorkspace, Workspace};
//!
//! let ws = MockWorkspace::new("/ws");
//! ws.add_file("/ws/rp/animations/walk.json", r#"{"animations": {}}"#);
//! assert!(ws.exists(std::path::Path::new("/ws/rp/animations/walk.json")));
//! ```

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

use crate::config::IndexConfig;
use crate::error::{IndexError, IndexResult};
use crate::glob_resolver::GlobPattern;

/// Host environment operations the index depends on.
///
/// Must be `Send + Sync` so a single index can be shared between tasks.
pub trait Workspace: Send + Sync + std::fmt::Debug {
    /// Workspace root; glob patterns match paths relative to it
    fn root(&self) -> &Path;

    /// Every file whose root-relative path matches `pattern`, in discovery order
    fn find_files(&self, pattern: &GlobPattern) -> IndexResult<Vec<PathBuf>>;

    /// Full text content of a file
    fn read_to_string(&self, path: &Path) -> IndexResult<String>;

    /// The document currently focused in the host, if any
    fn active_document(&self) -> Option<PathBuf>;

    fn exists(&self, path: &Path) -> bool;
}

/// Workspace backed by a directory on disk.
#[derive(Debug)]
pub struct DiskWorkspace {
    root: PathBuf,
    exclude: RwLock<Vec<glob::Pattern>>,
    max_file_size: AtomicU64,
    active: RwLock<Option<PathBuf>>,
}

impl DiskWorkspace {
    /// Open a workspace rooted at `root`.
    ///
    /// The root is canonicalized so that paths reported by file watchers
    /// line up with the paths produced by scans.
    pub fn open(root: impl AsRef<Path>, config: &IndexConfig) -> IndexResult<Self> {
        let root = root.as_ref();
        let root = root.canonicalize().map_err(|source| IndexError::Workspace {
            root: root.to_path_buf(),
            source,
        })?;

        Ok(Self {
            root,
            exclude: RwLock::new(config.exclude_patterns()?),
            max_file_size: AtomicU64::new(config.max_file_size),
            active: RwLock::new(None),
        })
    }

    pub fn set_active_document(&self, path: Option<PathBuf>) {
        *self.active.write().unwrap_or_else(PoisonError::into_inner) = path;
    }

    /// Apply changed exclude patterns and size limit to later scans and reads
    pub fn reconfigure(&self, config: &IndexConfig) -> IndexResult<()> {
        let exclude = config.exclude_patterns()?;
        *self.exclude.write().unwrap_or_else(PoisonError::into_inner) = exclude;
        self.max_file_size.store(config.max_file_size, Ordering::SeqCst);
        Ok(())
    }

    fn is_excluded(exclude: &[glob::Pattern], relative: &Path) -> bool {
        let relative = relative.to_string_lossy().replace('\\', "/");
        exclude.iter().any(|p| p.matches(&relative))
    }
}

impl Workspace for DiskWorkspace {
    fn root(&self) -> &Path {
        &self.root
    }

    fn find_files(&self, pattern: &GlobPattern) -> IndexResult<Vec<PathBuf>> {
        use ignore::WalkBuilder;

        if !self.root.is_dir() {
            return Err(IndexError::Workspace {
                root: self.root.clone(),
                source: io::Error::new(io::ErrorKind::NotFound, "workspace root is not a directory"),
            });
        }

        let exclude = self.exclude.read().unwrap_or_else(PoisonError::into_inner);
        let files = WalkBuilder::new(&self.root)
            .standard_filters(false)
            .build()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::debug!("skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
            .filter_map(|entry| {
                let relative = entry.path().strip_prefix(&self.root).ok()?;
                (!Self::is_excluded(&exclude, relative) && pattern.matches(relative))
                    .then(|| entry.path().to_path_buf())
            })
            .collect();

        Ok(files)
    }

    fn read_to_string(&self, path: &Path) -> IndexResult<String> {
        let limit = self.max_file_size.load(Ordering::SeqCst);
        crate::file_utils::read_file_with_limit(path, limit)
    }

    fn active_document(&self) -> Option<PathBuf> {
        self.active
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// In-memory workspace for tests.
///
/// Files are discovered in path order. Every `find_files` call and every
/// `read_to_string` call is counted.
#[derive(Debug, Default)]
pub struct MockWorkspace {
    root: PathBuf,
    files: RwLock<BTreeMap<PathBuf, String>>,
    active: RwLock<Option<PathBuf>>,
    scans: AtomicUsize,
    reads: AtomicUsize,
}

impl MockWorkspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    /// Add or replace a file
    pub fn add_file(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.into(), content.into());
    }

    pub fn remove(&self, path: impl AsRef<Path>) {
        self.files
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(path.as_ref());
    }

    pub fn set_active_document(&self, path: Option<PathBuf>) {
        *self.active.write().unwrap_or_else(PoisonError::into_inner) = path;
    }

    /// Number of `find_files` calls so far
    pub fn scan_count(&self) -> usize {
        self.scans.load(Ordering::SeqCst)
    }

    /// Number of `read_to_string` calls so far
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl Workspace for MockWorkspace {
    fn root(&self) -> &Path {
        &self.root
    }

    fn find_files(&self, pattern: &GlobPattern) -> IndexResult<Vec<PathBuf>> {
        self.scans.fetch_add(1, Ordering::SeqCst);
        let files = self.files.read().unwrap_or_else(PoisonError::into_inner);
        Ok(files
            .keys()
            .filter(|path| {
                path.strip_prefix(&self.root)
                    .is_ok_and(|relative| pattern.matches(relative))
            })
            .cloned()
            .collect())
    }

    fn read_to_string(&self, path: &Path) -> IndexResult<String> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let files = self.files.read().unwrap_or_else(PoisonError::into_inner);
        files.get(path).cloned().ok_or_else(|| IndexError::FileRead {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::NotFound, "file not found"),
        })
    }

    fn active_document(&self) -> Option<PathBuf> {
        self.active
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn exists(&self, path: &Path) -> bool {
        self.files
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(path)
    }
}
