//! Type-partitioned store of cached file extractions.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::handlers::{handler_for, ExtractedRecord, FileExtraction};
use crate::loader::Document;
use crate::{DataType, FileType};

/// Latest extraction of one file
#[derive(Debug, Clone, PartialEq)]
pub struct CachedFile {
    path: PathBuf,
    file_type: FileType,
    extraction: FileExtraction,
}

impl CachedFile {
    /// Run the file type's handler over a parsed document
    pub fn extract(file_type: FileType, document: &Document) -> Self {
        Self {
            path: document.path.clone(),
            file_type,
            extraction: handler_for(file_type).extract(document),
        }
    }

    /// An entry that contributes nothing until the file parses again
    pub fn empty(file_type: FileType, path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file_type,
            extraction: FileExtraction::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    pub fn extraction(&self) -> &FileExtraction {
        &self.extraction
    }

    pub fn records(&self, data_type: DataType) -> Option<&ExtractedRecord> {
        self.extraction.get(&data_type)
    }
}

/// Files of one type, keyed by path.
///
/// Ordered by path so that flattening is deterministic.
pub type Partition = BTreeMap<PathBuf, Arc<CachedFile>>;

/// Cache of extracted files, one partition per file type.
///
/// A partition exists once population of its type has finished; an empty
/// partition is still populated. Partitions are only created by
/// [`TypeCache::install`] and only dropped by [`TypeCache::clear`].
#[derive(Debug, Default)]
pub struct TypeCache {
    partitions: RwLock<HashMap<FileType, Partition>>,
    generation: AtomicU64,
}

impl TypeCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<FileType, Partition>> {
        self.partitions.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<FileType, Partition>> {
        self.partitions.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether the partition for `file_type` has been populated
    pub fn has(&self, file_type: FileType) -> bool {
        self.read().contains_key(&file_type)
    }

    /// Bumped by every [`TypeCache::clear`]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Install a fully built partition.
    ///
    /// Refused when the cache was cleared after `generation` was read, so a
    /// scan that started before the clear never shows up as populated.
    pub fn install(&self, file_type: FileType, partition: Partition, generation: u64) -> bool {
        let mut partitions = self.write();
        if self.generation.load(Ordering::SeqCst) != generation {
            return false;
        }
        partitions.insert(file_type, partition);
        true
    }

    pub fn get(&self, file_type: FileType, path: &Path) -> Option<Arc<CachedFile>> {
        self.read().get(&file_type)?.get(path).cloned()
    }

    pub fn contains(&self, file_type: FileType, path: &Path) -> bool {
        self.read()
            .get(&file_type)
            .is_some_and(|partition| partition.contains_key(path))
    }

    /// Insert or replace an entry of a populated partition.
    ///
    /// Returns `None` and stores nothing when the partition does not exist.
    pub fn set(&self, file: CachedFile) -> Option<Arc<CachedFile>> {
        let file = Arc::new(file);
        self.write()
            .get_mut(&file.file_type)?
            .insert(file.path.clone(), Arc::clone(&file));
        Some(file)
    }

    /// Remove one entry. Returns whether it was present.
    pub fn delete(&self, file_type: FileType, path: &Path) -> bool {
        self.write()
            .get_mut(&file_type)
            .is_some_and(|partition| partition.remove(path).is_some())
    }

    /// Drop every partition
    pub fn clear(&self) {
        let mut partitions = self.write();
        self.generation.fetch_add(1, Ordering::SeqCst);
        partitions.clear();
    }

    /// Snapshot of one partition
    pub fn partition(&self, file_type: FileType) -> Option<Partition> {
        self.read().get(&file_type).cloned()
    }

    /// Find the entry owning `path`, whatever its type
    pub fn find(&self, path: &Path) -> Option<(FileType, Arc<CachedFile>)> {
        self.find_all(path).into_iter().next()
    }

    /// Every entry for `path`, one per partition holding it.
    ///
    /// Globs of different types can overlap (`models/entity/` is matched by
    /// both geometry and client entities), so a path may be cached twice.
    pub fn find_all(&self, path: &Path) -> Vec<(FileType, Arc<CachedFile>)> {
        let partitions = self.read();
        FileType::ALL
            .into_iter()
            .filter_map(|file_type| {
                partitions
                    .get(&file_type)?
                    .get(path)
                    .map(|file| (file_type, Arc::clone(file)))
            })
            .collect()
    }

    /// Number of entries in one partition
    pub fn len(&self, file_type: FileType) -> usize {
        self.read().get(&file_type).map_or(0, |p| p.len())
    }

    pub fn is_empty(&self) -> bool {
        self.read().values().all(|p| p.is_empty())
    }
}
