//! Cached, atomically reloadable catalog store.
//!
//! Readers get an `Arc<Snapshot>` and keep using it for as long as they
//! like; a reload builds a new snapshot off to the side and swaps the
//! pointer, so nobody ever sees a half-built catalog.

use crate::snapshot::Snapshot;
use crate::source::{CatalogSource, JsonFileSource};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

/// Owner of the published catalog snapshot.
pub struct CatalogStore {
    source: Box<dyn CatalogSource>,
    current: RwLock<Option<Arc<Snapshot>>>,
    /// Serializes snapshot builds
    reload_lock: Mutex<()>,
    /// Generation of the last published snapshot
    generation: AtomicU64,
}

impl std::fmt::Debug for CatalogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogStore")
            .field("source", &self.source.describe())
            .field("generation", &self.generation.load(Ordering::Acquire))
            .finish()
    }
}

impl CatalogStore {
    /// Creates a store over `source`. Nothing is read until [`load`](Self::load).
    pub fn new(source: impl CatalogSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            current: RwLock::new(None),
            reload_lock: Mutex::new(()),
            generation: AtomicU64::new(0),
        }
    }

    /// Creates a store backed by a JSON file.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new(JsonFileSource::new(path))
    }

    /// Description of the underlying source.
    pub fn source(&self) -> String {
        self.source.describe()
    }

    /// Returns true once a snapshot has been published.
    pub fn is_loaded(&self) -> bool {
        self.published().is_some()
    }

    /// The latest published snapshot, or an empty one before the first load.
    ///
    /// Never touches the source.
    pub fn current(&self) -> Arc<Snapshot> {
        self.published()
            .unwrap_or_else(|| Arc::new(Snapshot::empty(self.source.describe(), 0)))
    }

    /// Load the catalog, reusing the cached snapshot unless `force_reload`.
    ///
    /// Never fails: an unreadable source publishes an empty snapshot and
    /// malformed records are skipped. Concurrent reloads are serialized, and
    /// a reload that had to wait for another one to publish returns that
    /// snapshot instead of building its own.
    pub fn load(&self, force_reload: bool) -> Arc<Snapshot> {
        if !force_reload {
            if let Some(snapshot) = self.published() {
                return snapshot;
            }
        }

        let seen = self.generation.load(Ordering::Acquire);
        let _guard = self.reload_lock.lock().unwrap_or_else(PoisonError::into_inner);

        if self.generation.load(Ordering::Acquire) != seen {
            if let Some(snapshot) = self.published() {
                tracing::debug!(
                    source = %self.source.describe(),
                    "Reload coalesced with concurrent load"
                );
                return snapshot;
            }
        }

        let generation = self.generation.load(Ordering::Acquire) + 1;
        let snapshot = Arc::new(self.build(generation));

        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&snapshot));
        self.generation.store(generation, Ordering::Release);

        foodshare_telemetry::metrics().gauge("catalog.entries", snapshot.len() as u64);
        tracing::info!(
            source = %snapshot.source(),
            entries = snapshot.len(),
            skipped = snapshot.skipped(),
            generation,
            "Catalog snapshot published"
        );

        snapshot
    }

    /// Shorthand for `load(true)`.
    pub fn reload(&self) -> Arc<Snapshot> {
        self.load(true)
    }

    fn published(&self) -> Option<Arc<Snapshot>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn build(&self, generation: u64) -> Snapshot {
        foodshare_telemetry::timed_span!("catalog.build", generation);
        let source = self.source.describe();
        match self.source.fetch() {
            Ok(records) => Snapshot::from_records(source, generation, records),
            Err(e) => {
                tracing::warn!(
                    source = %source,
                    error = %e,
                    "Catalog source unavailable, publishing empty catalog"
                );
                Snapshot::empty(source, generation)
            }
        }
    }
}
