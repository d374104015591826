//! WASM bindings for ingredient matching.

use crate::{IngredientNormalizer, ScoringWeights};
use wasm_bindgen::prelude::*;

/// Normalize an ingredient phrase with the default Spanish stopwords.
#[wasm_bindgen]
pub fn clean_ingredient(raw: &str) -> String {
    IngredientNormalizer::default().clean(raw)
}

/// Composite fuzzy score (0-100) between two strings with default weights.
#[wasm_bindgen]
pub fn fuzzy_score(a: &str, b: &str) -> f64 {
    crate::weighted_ratio(a, b, &ScoringWeights::default())
}

/// Find the best candidate for an ingredient.
///
/// # Arguments
/// * `ingredient` - Raw ingredient phrase (normalized before matching)
/// * `names_json` - JSON array of candidate names
/// * `threshold` - Minimum accepted score
///
/// # Returns
/// JSON object `{"index": number|null, "score": number}`, or
/// `{"error": "...", "code": n}` when `names_json` is not an array of
/// strings or `threshold` is outside `[0, 100]`
#[wasm_bindgen]
pub fn best_match_json(ingredient: &str, names_json: &str, threshold: f64) -> String {
    let query = IngredientNormalizer::default().clean(ingredient);
    match crate::best_match_in_json(&query, names_json, threshold, &ScoringWeights::default()) {
        Ok(result) => serde_json::to_string(&result)
            .unwrap_or_else(|_| r#"{"index":null,"score":0}"#.to_string()),
        Err(e) => {
            serde_json::json!({ "error": e.to_string(), "code": e.code() as u32 }).to_string()
        }
    }
}
