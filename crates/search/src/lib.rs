//! Ingredient normalization and fuzzy product-name matching for FoodShare.
//!
//! This crate provides:
//! - Ingredient phrase normalization with data-driven stopwords
//! - InDel, partial and token-based similarity ratios
//! - A weighted composite score with tunable weights
//! - Deterministic best-candidate selection
//!
//! # Example
//!
//! ```
//! use foodshare_search::{best_match, IngredientNormalizer, ScoringWeights};
//!
//! let names = ["aceite oliva virgen extra", "huevos frescos"];
//! let query = IngredientNormalizer::default().clean("2 cucharadas de aceite de oliva");
//! assert_eq!(query, "aceite oliva");
//!
//! let result = best_match(&query, &names, 60.0, &ScoringWeights::default());
//! assert_eq!(result.index, Some(0));
//! ```

mod error;
mod fuzzy;
mod matcher;
mod normalize;
mod weights;

#[cfg(feature = "wasm")]
mod wasm;

pub use error::{Result, SearchError, SearchErrorCode};
pub use fuzzy::{
    indel_distance, lcs_length, partial_ratio, partial_token_ratio, ratio, token_ratio,
    token_set_ratio, token_sort_ratio, weighted_ratio,
};
pub use matcher::{best_match, best_match_in_json, MatchResult};
pub use normalize::{IngredientNormalizer, Stopwords};
pub use weights::{ScoringWeights, DEFAULT_THRESHOLD};
