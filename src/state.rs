use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::color::ColorMap;
use crate::config::DEFAULT_DATA_PATH;
use crate::data::cache::LoadCache;
use crate::data::filter::{filtered_indices, FilterSelection};
use crate::data::model::{Category, Region, SalesDataset};
use crate::data::summary::Summary;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Memoised loads, keyed on file identity.
    pub cache: LoadCache,

    /// File the current dataset came from (or failed to come from).
    pub data_path: PathBuf,

    /// Cleaned dataset, shared read-only with the cache.
    /// `None` when nothing could be loaded.
    pub dataset: Option<Arc<SalesDataset>>,

    /// Region / Category multi-select state.
    pub filters: FilterSelection,

    /// Indices of records passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Aggregates for `visible_indices`; `None` when the selection is empty.
    pub summary: Option<Summary>,

    /// Stable colours for the chart labels.
    pub region_colors: ColorMap<Region>,
    pub category_colors: ColorMap<Category>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            cache: LoadCache::new(),
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            dataset: None,
            filters: FilterSelection::default(),
            visible_indices: Vec::new(),
            summary: None,
            region_colors: ColorMap::new(&Region::ALL),
            category_colors: ColorMap::new(&Category::ALL),
            status_message: None,
        }
    }
}

impl AppState {
    /// State with the default extract loaded (or its load error recorded).
    pub fn startup() -> Self {
        let mut state = Self::default();
        let path = state.data_path.clone();
        state.load(&path);
        state
    }

    /// Load `path` through the cache.  On failure the previous dataset is
    /// dropped so nothing is charted from stale or partial data.
    pub fn load(&mut self, path: &Path) {
        self.data_path = path.to_path_buf();
        match self.cache.get_or_load(path) {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.dataset = None;
                self.filters = FilterSelection::default();
                self.visible_indices.clear();
                self.summary = None;
                self.status_message = Some(e.to_string());
            }
        }
    }

    /// Invalidate the cached copy of the current file and load it again.
    pub fn reload(&mut self) {
        let path = self.data_path.clone();
        if self.cache.invalidate(&path) {
            log::info!("Invalidated cached data for {}", path.display());
        }
        self.load(&path);
    }

    /// Ingest a newly loaded dataset, initialise filters and aggregates.
    pub fn set_dataset(&mut self, dataset: Arc<SalesDataset>) {
        self.filters = FilterSelection::all(&dataset);
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    /// Recompute `visible_indices` and the summary after a filter change.
    pub fn refilter(&mut self) {
        let Some(ds) = &self.dataset else {
            return;
        };
        self.visible_indices = filtered_indices(ds, &self.filters);
        self.summary = Summary::compute(ds, &self.visible_indices);
        if self.summary.is_none() {
            log::warn!("No data available for the selected filters");
        }
    }

    /// Toggle a single region in the selection.
    pub fn toggle_region(&mut self, region: Region) {
        if !self.filters.regions.remove(&region) {
            self.filters.regions.insert(region);
        }
        self.refilter();
    }

    /// Toggle a single category in the selection.
    pub fn toggle_category(&mut self, category: Category) {
        if !self.filters.categories.remove(&category) {
            self.filters.categories.insert(category);
        }
        self.refilter();
    }

    pub fn select_all_regions(&mut self) {
        if let Some(ds) = &self.dataset {
            self.filters.regions = ds.regions.clone();
            self.refilter();
        }
    }

    pub fn select_no_regions(&mut self) {
        self.filters.regions.clear();
        self.refilter();
    }

    pub fn select_all_categories(&mut self) {
        if let Some(ds) = &self.dataset {
            self.filters.categories = ds.categories.clone();
            self.refilter();
        }
    }

    pub fn select_no_categories(&mut self) {
        self.filters.categories.clear();
        self.refilter();
    }
}
