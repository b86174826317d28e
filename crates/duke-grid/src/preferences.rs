//! Layout preference persistence
//!
//! Column widths and row heights are saved as one JSON record under a fixed
//! key in a string key-value store. The record is read once when
//! [`LayoutPreferences`] is created and written back after resizing settles.
//! Failures to read or write are logged and otherwise ignored: a grid with
//! default sizes is always usable.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use duke_grid_core::{GridSettings, GridSizes};
use thiserror::Error;

use crate::debounce::Debouncer;

/// Key the layout record is stored under
pub const GRID_SIZES_KEY: &str = "grid-sizes";

/// Errors from a preference store
#[derive(Debug, Error)]
pub enum PreferenceError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Stored record is not valid JSON for the expected type
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A string key-value store for preferences
pub trait PreferenceStore {
    /// Read a value
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError>;

    /// Write a value
    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        (**self).set(key, value)
    }
}

/// In-memory preference store
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    values: HashMap<String, String>,
}

impl MemoryPreferenceStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preference store keeping one `<key>.json` file per key in a directory
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    dir: PathBuf,
}

impl FilePreferenceStore {
    /// Store files in `dir`; created on first write
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// File a key is stored in
    pub fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        match fs::read_to_string(self.path(key)) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(key), value)?;
        Ok(())
    }
}

/// Column and row sizes backed by a preference store
///
/// Resizes apply immediately to [`sizes`](Self::sizes); saving is debounced.
/// A pending save is written when the value is dropped.
#[derive(Debug)]
pub struct LayoutPreferences<S: PreferenceStore> {
    store: S,
    settings: GridSettings,
    sizes: GridSizes,
    pending: Debouncer<GridSizes>,
}

impl<S: PreferenceStore> LayoutPreferences<S> {
    /// Load sizes from `store`, falling back to defaults
    pub fn new(store: S, settings: GridSettings) -> Self {
        let sizes = load_sizes(&store, &settings);
        let pending = Debouncer::new(settings.layout_save_delay);
        Self {
            store,
            settings,
            sizes,
            pending,
        }
    }

    /// Current sizes
    pub fn sizes(&self) -> &GridSizes {
        &self.sizes
    }

    /// The backing store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Width of a column
    pub fn column_width(&self, col: u32) -> f64 {
        self.sizes.column_width(col, &self.settings)
    }

    /// Height of a row
    pub fn row_height(&self, row: u32) -> f64 {
        self.sizes.row_height(row, &self.settings)
    }

    /// Resize a column; returns the width applied
    pub fn resize_column(&mut self, col: u32, width: f64, now: Instant) -> f64 {
        let width = self.sizes.set_column_width(col, width, &self.settings);
        self.schedule_save(now);
        width
    }

    /// Resize a row; returns the height applied
    pub fn resize_row(&mut self, row: u32, height: f64, now: Instant) -> f64 {
        let height = self.sizes.set_row_height(row, height, &self.settings);
        self.schedule_save(now);
        height
    }

    /// Replace all sizes
    pub fn update(&mut self, mut sizes: GridSizes, now: Instant) {
        sizes.sanitize(&self.settings);
        self.sizes = sizes;
        self.schedule_save(now);
    }

    /// Whether a save is waiting
    pub fn is_dirty(&self) -> bool {
        self.pending.is_pending()
    }

    /// Save if resizing has settled; returns whether a save was written
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.pending.take_due(now) {
            Some(sizes) => self.save(&sizes),
            None => false,
        }
    }

    /// Save any pending change now; returns whether a save was written
    pub fn flush(&mut self) -> bool {
        match self.pending.flush() {
            Some(sizes) => self.save(&sizes),
            None => false,
        }
    }

    fn schedule_save(&mut self, now: Instant) {
        self.pending.schedule(self.sizes.clone(), now);
    }

    fn save(&mut self, sizes: &GridSizes) -> bool {
        let result = serde_json::to_string(sizes)
            .map_err(PreferenceError::from)
            .and_then(|json| self.store.set(GRID_SIZES_KEY, &json));
        match result {
            Ok(()) => {
                log::debug!(
                    "saved layout: {} columns, {} rows",
                    sizes.columns.len(),
                    sizes.rows.len()
                );
                true
            }
            Err(e) => {
                log::warn!("failed to save layout preferences: {e}");
                false
            }
        }
    }
}

impl<S: PreferenceStore> Drop for LayoutPreferences<S> {
    fn drop(&mut self) {
        self.flush();
    }
}

fn load_sizes<S: PreferenceStore>(store: &S, settings: &GridSettings) -> GridSizes {
    let json = match store.get(GRID_SIZES_KEY) {
        Ok(Some(json)) => json,
        Ok(None) => return GridSizes::default(),
        Err(e) => {
            log::warn!("failed to load layout preferences: {e}");
            return GridSizes::default();
        }
    };
    match serde_json::from_str::<GridSizes>(&json) {
        Ok(mut sizes) => {
            sizes.sanitize(settings);
            sizes
        }
        Err(e) => {
            log::warn!("ignoring stored layout preferences: {e}");
            GridSizes::default()
        }
    }
}
