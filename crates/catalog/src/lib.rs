//! Grocery product catalog for FoodShare shopping lists.
//!
//! This crate provides:
//! - Validation of raw product records (`id`, `name`, `price`, ...)
//! - Immutable snapshots with a precomputed normalized-name index
//! - A store that caches the snapshot and swaps it atomically on reload
//! - Pluggable record sources (JSON file, in-memory)
//!
//! Catalog trouble never propagates: a missing source yields an empty
//! snapshot and malformed records are skipped with a warning.
//!
//! # Example
//!
//! ```
//! use foodshare_catalog::{CatalogStore, StaticSource};
//! use serde_json::json;
//!
//! let store = CatalogStore::new(StaticSource::new(vec![
//!     json!({"id": "1", "name": "huevos-frescos", "price": 2.10}),
//!     json!({"name": "no id"}),
//! ]));
//!
//! let snapshot = store.load(false);
//! assert_eq!(snapshot.len(), 1);
//! assert_eq!(snapshot.names()[0], "huevos frescos");
//! ```

mod entry;
mod error;
mod snapshot;
mod source;
mod store;

pub use entry::{normalize_name, CatalogEntry};
pub use error::{CatalogError, CatalogErrorCode, Result};
pub use snapshot::Snapshot;
pub use source::{CatalogSource, JsonFileSource, StaticSource};
pub use store::CatalogStore;
