//! Shopping-list product search for FoodShare.
//!
//! Turns the ingredient lines of a generated recipe into purchasable
//! catalog products: each line is normalized, fuzzy-matched against the
//! catalog snapshot and mapped to a [`ProductResult`]. Products already
//! listed are not repeated; ingredients with no acceptable match become
//! "not found" placeholders.
//!
//! # Example
//!
//! ```
//! use foodshare_catalog::{CatalogStore, StaticSource};
//! use foodshare_shopping::ProductSearch;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let store = Arc::new(CatalogStore::new(StaticSource::new(vec![
//!     json!({"id": "2", "name": "huevos frescos", "thumbnail": "t2", "price": 2.10}),
//! ])));
//! store.load(false);
//!
//! let search = ProductSearch::new(store);
//! let products = search.search(&["3 huevos", "sal al gusto"]);
//!
//! assert_eq!(products[0].name, "Huevos Frescos");
//! assert_eq!(products[1].name, "sal al gusto (no encontrado)");
//! ```

mod product;
mod search;

pub use product::{title_case, ProductResult};
pub use search::{Lookup, ProductSearch, DEFAULT_NOT_FOUND_MARKER};
