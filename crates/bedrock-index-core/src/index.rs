//! The file index: lazily populated, per-type definition lookup.
//!
//! Each file type's partition is populated on first use. Population of a
//! type is serialized by that type's mutex; a caller that arrives while a
//! population is running waits for it and then sees the finished partition
//! instead of scanning again. Different types populate independently.
//!
//! After population the partition is only changed by single-file calls
//! ([`FileIndex::refresh_cache_for_file`], [`FileIndex::delete_file_from_cache`])
//! or dropped entirely by [`FileIndex::empty_cache`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Instant;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::cache::{CachedFile, Partition, TypeCache};
use crate::config::IndexConfig;
use crate::defaults;
use crate::error::IndexResult;
use crate::glob_resolver::{GlobPattern, GlobResolver};
use crate::handlers::handler_for;
use crate::loader::load_document;
use crate::position::RangeInfo;
use crate::progress::{LogProgress, ProgressReporter, ProgressScope};
use crate::workspace::Workspace;
use crate::{DataType, FileType};

/// Where one identifier is defined
#[derive(Debug, Clone, Serialize)]
pub struct LocationData {
    pub path: PathBuf,
    pub range: RangeInfo,
    #[serde(skip)]
    pub file: Arc<CachedFile>,
}

/// Identifier to definition location, derived from one partition
pub type DefinitionLocation = HashMap<String, LocationData>;

pub struct FileIndex {
    workspace: Arc<dyn Workspace>,
    progress: Arc<dyn ProgressReporter>,
    config: RwLock<IndexConfig>,
    cache: TypeCache,
    bulk_locks: [Mutex<()>; FileType::COUNT],
}

impl std::fmt::Debug for FileIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileIndex")
            .field("workspace", &self.workspace)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl FileIndex {
    pub fn new(workspace: Arc<dyn Workspace>) -> Self {
        Self::with_config(workspace, IndexConfig::default())
    }

    pub fn with_config(workspace: Arc<dyn Workspace>, config: IndexConfig) -> Self {
        Self {
            workspace,
            progress: Arc::new(LogProgress),
            config: RwLock::new(config),
            cache: TypeCache::new(),
            bulk_locks: std::array::from_fn(|_| Mutex::new(())),
        }
    }

    /// Replace the progress reporter shown during population
    pub fn with_progress(mut self, progress: Arc<dyn ProgressReporter>) -> Self {
        self.progress = progress;
        self
    }

    pub fn workspace(&self) -> &dyn Workspace {
        self.workspace.as_ref()
    }

    pub fn cache(&self) -> &TypeCache {
        &self.cache
    }

    pub fn config(&self) -> IndexConfig {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Install a new configuration. Every partition is dropped.
    pub fn set_config(&self, config: IndexConfig) {
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = config;
        self.empty_cache();
    }

    /// All cached files of one type, populating the partition first if needed.
    ///
    /// Files that cannot be read or parsed are left out of the partition.
    /// Only host failures (glob or workspace errors) are returned.
    pub async fn get_all_by_type(&self, file_type: FileType) -> IndexResult<Partition> {
        let _guard = self.bulk_locks[file_type.index()].lock().await;
        match self.cache.partition(file_type) {
            Some(partition) => Ok(partition),
            None => self.populate(file_type).await,
        }
    }

    /// Build a partition from a fresh scan and install it in one step
    async fn populate(&self, file_type: FileType) -> IndexResult<Partition> {
        let handler = handler_for(file_type);
        let pattern = GlobPattern::new(handler.glob())?;
        let proximity = self.config().proximity_ordering;
        let generation = self.cache.generation();

        // A failed scan leaves the partition unpopulated so the next call retries
        let files = GlobResolver::new(self.workspace.as_ref())
            .with_proximity(proximity)
            .resolve(&pattern)?;

        let _progress = ProgressScope::start(Arc::clone(&self.progress), handler.title());
        let started = Instant::now();
        let total = files.total();
        let mut partition = Partition::new();
        let mut skipped = 0usize;

        info!("populating {} from {} files", file_type, total);

        for path in files {
            if partition.contains_key(&path) {
                continue;
            }

            match load_document(self.workspace.as_ref(), &path) {
                Ok(document) => {
                    let file = CachedFile::extract(file_type, &document);
                    debug!("indexed {}", path.display());
                    partition.insert(path, Arc::new(file));
                }
                Err(e) if e.is_recoverable() => {
                    warn!("skipping {}: {}", path.display(), e);
                    skipped += 1;
                }
                Err(e) => return Err(e),
            }

            tokio::task::yield_now().await;
        }

        info!(
            "populated {}: {} indexed, {} skipped in {:?}",
            file_type,
            partition.len(),
            skipped,
            started.elapsed()
        );

        if !self.cache.install(file_type, partition.clone(), generation) {
            info!("cache emptied while populating {}, result not kept", file_type);
        }
        Ok(partition)
    }

    /// Flatten one data type across every file of a type.
    ///
    /// Files are visited in path order; on a duplicate identifier the later
    /// file wins.
    pub async fn get_all_of_type_by_data_type(
        &self,
        file_type: FileType,
        data_type: DataType,
    ) -> IndexResult<DefinitionLocation> {
        let partition = self.get_all_by_type(file_type).await?;
        let mut locations = DefinitionLocation::new();

        for file in partition.values() {
            let Some(records) = file.records(data_type) else {
                continue;
            };
            for (identifier, range) in records {
                locations.insert(
                    identifier.clone(),
                    LocationData {
                        path: file.path().to_path_buf(),
                        range: *range,
                        file: Arc::clone(file),
                    },
                );
            }
        }

        Ok(locations)
    }

    pub async fn get_identifiers_by_file_type(
        &self,
        file_type: FileType,
    ) -> IndexResult<DefinitionLocation> {
        self.get_all_of_type_by_data_type(file_type, DataType::Definition)
            .await
    }

    /// Look up where an identifier is defined.
    ///
    /// For geometry and materials, `name` also finds a single definition
    /// declared as `name:parent`. Several such candidates are ambiguous and
    /// give `None`.
    pub async fn find_by_identifier(
        &self,
        file_type: FileType,
        identifier: &str,
    ) -> IndexResult<Option<LocationData>> {
        let mut locations = self.get_identifiers_by_file_type(file_type).await?;

        if let Some(location) = locations.remove(identifier) {
            return Ok(Some(location));
        }
        if !file_type.supports_hierarchical_names() {
            return Ok(None);
        }

        let prefix = format!("{}:", identifier);
        let mut candidates = locations
            .into_iter()
            .filter(|(key, _)| key.starts_with(&prefix));

        match (candidates.next(), candidates.next()) {
            (Some((_, location)), None) => Ok(Some(location)),
            _ => Ok(None),
        }
    }

    /// Whether an entity id is vanilla or defined by a server entity file
    pub async fn is_known_entity(&self, identifier: &str) -> IndexResult<bool> {
        if defaults::is_vanilla_entity(identifier) {
            return Ok(true);
        }

        let identifiers = self
            .get_identifiers_by_file_type(FileType::ServerEntity)
            .await?;
        let bare = identifier.strip_prefix("minecraft:").unwrap_or(identifier);

        Ok(identifiers.contains_key(identifier)
            || identifiers.contains_key(bare)
            || identifiers.contains_key(&format!("minecraft:{}", bare)))
    }

    /// Re-extract one cached file after it changed on disk.
    ///
    /// Returns `false` without reading anything when no partition holds the
    /// file. A file that can no longer be read or parsed stays cached with
    /// an empty extraction until it is fixed. A path held by several
    /// partitions is refreshed in each of them.
    pub fn refresh_cache_for_file(&self, path: &Path) -> IndexResult<bool> {
        let owners = self.cache.find_all(path);
        if owners.is_empty() {
            return Ok(false);
        }

        let document = match load_document(self.workspace.as_ref(), path) {
            Ok(document) => Some(document),
            Err(e) if e.is_recoverable() => {
                warn!("{} no longer indexes: {}", path.display(), e);
                None
            }
            Err(e) => return Err(e),
        };

        let mut refreshed = false;
        for (file_type, _) in owners {
            let file = match &document {
                Some(document) => CachedFile::extract(file_type, document),
                None => CachedFile::empty(file_type, path),
            };
            refreshed |= self.cache.set(file).is_some();
        }

        debug!("refreshed {}", path.display());
        Ok(refreshed)
    }

    /// Drop a file from every partition that holds it
    pub fn delete_file_from_cache(&self, path: &Path) -> bool {
        let mut removed = false;
        for (file_type, _) in self.cache.find_all(path) {
            removed |= self.cache.delete(file_type, path);
        }
        if removed {
            debug!("removed {}", path.display());
        }
        removed
    }

    /// Drop every partition; the next lookup of each type scans again
    pub fn empty_cache(&self) {
        info!("emptying definition cache");
        self.cache.clear();
    }

    /// Resolve a texture reference such as `textures/entity/cow` to a file.
    ///
    /// Each configured extension is probed anywhere in the workspace. The
    /// reference resolves only when exactly one file matches in total.
    pub fn get_texture(&self, reference: &str) -> IndexResult<Option<PathBuf>> {
        let reference = reference.trim_start_matches("./").trim_start_matches('/');
        if reference.is_empty() {
            return Ok(None);
        }

        let escaped = glob::Pattern::escape(reference);
        let mut found = Vec::new();

        for extension in &self.config().texture_extensions {
            let pattern = GlobPattern::new(&format!("**/{}.{}", escaped, extension))?;
            found.extend(self.workspace.find_files(&pattern)?);
            if found.len() > 1 {
                debug!("ambiguous texture reference {}", reference);
                return Ok(None);
            }
        }

        Ok(found.pop())
    }

    /// The cached entry for a path, whatever its type
    pub fn find_cached_file(&self, path: &Path) -> Option<(FileType, Arc<CachedFile>)> {
        self.cache.find(path)
    }
}
