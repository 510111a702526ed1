use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use namegender_db::{DatasetError, DatasetSource, FrequencyIndex, LoadOptions, NameReport};
use namegender_types::GenderLabel;
use tracing::info;

use crate::{ResolveError, resolve};

/// Owns the census table and the index built from it.
///
/// The index is built on the first query (or [`load`](Self::load)); concurrent
/// first callers block until that single build finishes and then share it.
/// Queries work on an `Arc` snapshot, so a [`reload`](Self::reload) never
/// changes the index underneath a query already in progress.
pub struct Detector {
    source: DatasetSource,
    options: LoadOptions,
    index: RwLock<Option<Arc<FrequencyIndex>>>,
    builds: AtomicUsize,
}

impl Detector {
    /// Create an unloaded detector; nothing is read until first use.
    pub fn new(source: impl Into<DatasetSource>, options: LoadOptions) -> Self {
        Self {
            source: source.into(),
            options,
            index: RwLock::new(None),
            builds: AtomicUsize::new(0),
        }
    }

    pub fn source(&self) -> &DatasetSource {
        &self.source
    }

    pub fn options(&self) -> LoadOptions {
        self.options
    }

    /// Build the index if it is not built yet and return it.
    pub fn load(&self) -> Result<Arc<FrequencyIndex>, DatasetError> {
        if let Some(index) = self.read_slot().as_ref() {
            return Ok(Arc::clone(index));
        }
        let mut slot = self.write_slot();
        // Another caller may have finished the build while we waited.
        if let Some(index) = slot.as_ref() {
            return Ok(Arc::clone(index));
        }
        let index = self.build()?;
        *slot = Some(Arc::clone(&index));
        Ok(index)
    }

    /// Drop the current index and rebuild it from the source.
    ///
    /// On failure the detector stays unloaded and the next query retries.
    pub fn reload(&self) -> Result<Arc<FrequencyIndex>, DatasetError> {
        let mut slot = self.write_slot();
        slot.take();
        info!("reloading {}", self.source.describe());
        let index = self.build()?;
        *slot = Some(Arc::clone(&index));
        Ok(index)
    }

    pub fn is_loaded(&self) -> bool {
        self.read_slot().is_some()
    }

    /// Current index without triggering a load.
    pub fn snapshot(&self) -> Option<Arc<FrequencyIndex>> {
        self.read_slot().clone()
    }

    /// Number of times the index has been built.
    pub fn build_count(&self) -> usize {
        self.builds.load(Ordering::Acquire)
    }

    /// Most probable gender for `name`, see [`resolve`](crate::resolve).
    pub fn get_gender(
        &self,
        name: &str,
        country: Option<&str>,
        strict: bool,
    ) -> Result<GenderLabel, ResolveError> {
        let index = self.load()?;
        resolve(&index, name, country, strict)
    }

    /// Every label for `name` with its non-zero per-country counts.
    pub fn dump_name(&self, name: &str) -> Result<Option<NameReport>, DatasetError> {
        Ok(self.load()?.dump(name))
    }

    fn build(&self) -> Result<Arc<FrequencyIndex>, DatasetError> {
        let index = FrequencyIndex::load(&self.source, self.options)?;
        self.builds.fetch_add(1, Ordering::AcqRel);
        Ok(Arc::new(index))
    }

    // The slot only ever holds a complete index, so a poisoned lock is still usable.
    fn read_slot(&self) -> RwLockReadGuard<'_, Option<Arc<FrequencyIndex>>> {
        self.index.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_slot(&self) -> RwLockWriteGuard<'_, Option<Arc<FrequencyIndex>>> {
        self.index.write().unwrap_or_else(PoisonError::into_inner)
    }
}
