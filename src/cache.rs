//! An explicit, invalidatable cache for expensive dataset loads.
//!
//! Training repeatedly asks for the same feature dataset. The cache holds
//! one loaded value, keyed by where it came from and how it was shaped.

use std::{path::PathBuf, sync::Arc};

/// What a cached dataset was loaded from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DatasetKey {
    pub path: PathBuf,
    /// Binary labels rather than multi-class.
    pub binary: bool,
    /// Minority class upsampled.
    pub upsample: bool,
}

/// Holds at most one dataset. Only upsampled datasets are retained.
#[derive(Debug)]
pub struct DatasetCache<T> {
    entry: Option<(DatasetKey, Arc<T>)>,
}

impl<T> Default for DatasetCache<T> {
    fn default() -> Self {
        Self { entry: None }
    }
}

impl<T> DatasetCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached dataset for `key`, loading it on a miss.
    ///
    /// A failed load leaves the cache as it was. A successful load of a
    /// non-upsampled dataset is returned but not retained.
    pub fn get_or_load<E>(
        &mut self,
        key: &DatasetKey,
        load: impl FnOnce(&DatasetKey) -> Result<T, E>,
    ) -> Result<Arc<T>, E> {
        if self.is_cached(key)
            && let Some((_, value)) = &self.entry
        {
            return Ok(Arc::clone(value));
        }

        tracing::debug!(
            path = %key.path.display(),
            binary = key.binary,
            upsample = key.upsample,
            "loading dataset"
        );
        let value = Arc::new(load(key)?);
        if key.upsample {
            self.entry = Some((key.clone(), Arc::clone(&value)));
        }
        Ok(value)
    }

    pub fn is_cached(&self, key: &DatasetKey) -> bool {
        key.upsample && self.entry.as_ref().is_some_and(|(k, _)| k == key)
    }

    /// Drops the cached dataset.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}
