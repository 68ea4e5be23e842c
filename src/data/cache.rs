use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::error::LoadResult;
use super::loader::load_file;
use super::model::SalesDataset;

// ---------------------------------------------------------------------------
// LoadCache – memoised file → cleaned dataset
// ---------------------------------------------------------------------------

/// Explicit memoisation of [`load_file`], keyed on file identity.
///
/// Entries live until [`LoadCache::invalidate`] or [`LoadCache::clear`] is
/// called; nothing expires on its own.  Failed loads are never stored, so
/// the next request retries.  Datasets are handed out as `Arc` and are never
/// mutated after cleaning.
#[derive(Debug, Default)]
pub struct LoadCache {
    entries: HashMap<PathBuf, Arc<SalesDataset>>,
}

impl LoadCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached dataset for `path`, loading it on first use.
    pub fn get_or_load(&mut self, path: &Path) -> LoadResult<Arc<SalesDataset>> {
        self.get_or_load_with(path, load_file)
    }

    /// Same as [`get_or_load`](Self::get_or_load) with a caller-supplied loader.
    pub fn get_or_load_with<F>(&mut self, path: &Path, load: F) -> LoadResult<Arc<SalesDataset>>
    where
        F: FnOnce(&Path) -> LoadResult<SalesDataset>,
    {
        let key = Self::key(path);
        if let Some(ds) = self.entries.get(&key) {
            log::debug!("Cache hit for {}", key.display());
            return Ok(Arc::clone(ds));
        }

        let ds = Arc::new(load(path)?);
        log::info!("Loaded {} records from {}", ds.len(), key.display());
        self.entries.insert(key, Arc::clone(&ds));
        Ok(ds)
    }

    /// Drop the entry for `path`.  Returns whether anything was cached.
    pub fn invalidate(&mut self, path: &Path) -> bool {
        self.entries.remove(&Self::key(path)).is_some()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(&Self::key(path))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// File identity: the path made absolute against the working directory.
    fn key(path: &Path) -> PathBuf {
        std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
    }
}
