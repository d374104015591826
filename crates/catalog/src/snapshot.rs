//! Immutable catalog snapshots.

use crate::entry::{normalize_name, CatalogEntry};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::{BTreeSet, HashSet};

/// A complete, immutable view of the catalog at one point in time.
///
/// `names()[i]` is always the normalized name of `entries()[i]`.
#[derive(Debug, Clone)]
pub struct Snapshot {
    entries: Vec<CatalogEntry>,
    names: Vec<String>,
    source: String,
    loaded_at: DateTime<Utc>,
    generation: u64,
    skipped: usize,
}

impl Snapshot {
    /// A snapshot with no entries.
    pub fn empty(source: impl Into<String>, generation: u64) -> Self {
        Self::from_entries(source, generation, Vec::new(), 0)
    }

    /// Validate raw records, skipping (and logging) the malformed ones.
    pub fn from_records(source: impl Into<String>, generation: u64, records: Vec<Value>) -> Self {
        let source = source.into();
        let mut entries = Vec::with_capacity(records.len());
        let mut skipped = 0;

        for (index, record) in records.iter().enumerate() {
            match CatalogEntry::from_record(record) {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    skipped += 1;
                    tracing::warn!(source = %source, index, error = %e, "Skipping catalog record");
                }
            }
        }

        let duplicates = {
            let mut seen = HashSet::with_capacity(entries.len());
            entries.iter().filter(|e| !seen.insert(e.id.as_str())).count()
        };
        if duplicates > 0 {
            tracing::warn!(source = %source, duplicates, "Catalog contains duplicate product ids");
        }

        Self::from_entries(source, generation, entries, skipped)
    }

    fn from_entries(
        source: impl Into<String>,
        generation: u64,
        entries: Vec<CatalogEntry>,
        skipped: usize,
    ) -> Self {
        let names = entries.iter().map(|e| normalize_name(&e.name)).collect();
        Self {
            entries,
            names,
            source: source.into(),
            loaded_at: Utc::now(),
            generation,
            skipped,
        }
    }

    /// Entries in load order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Normalized names, parallel to [`entries`](Self::entries).
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Entry at `index`.
    pub fn get(&self, index: usize) -> Option<&CatalogEntry> {
        self.entries.get(index)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the snapshot has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Where the records came from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// When the snapshot was built.
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Publish counter; 0 means nothing has been loaded yet.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of records rejected during the load.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Distinct non-empty categories, sorted.
    pub fn categories(&self) -> BTreeSet<&str> {
        self.entries
            .iter()
            .map(|e| e.category.as_str())
            .filter(|c| !c.is_empty())
            .collect()
    }
}
