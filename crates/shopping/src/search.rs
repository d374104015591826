//! Ingredient list to product list.

use crate::product::ProductResult;
use foodshare_catalog::{CatalogEntry, CatalogStore, Snapshot};
use foodshare_core::config::ShoppingConfig;
use foodshare_core::{Error, Result};
use foodshare_search::{
    best_match, IngredientNormalizer, ScoringWeights, Stopwords, DEFAULT_THRESHOLD,
};
use foodshare_telemetry::{metrics, Timer};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

/// Default marker for unmatched ingredients.
pub const DEFAULT_NOT_FOUND_MARKER: &str = "no encontrado";

/// The decision taken for a single ingredient.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lookup {
    /// Ingredient as received
    pub ingredient: String,
    /// Normalized query that was matched
    pub query: String,
    /// Accepted catalog entry
    pub entry: Option<CatalogEntry>,
    /// Best score seen, accepted or not
    pub score: f64,
}

impl Lookup {
    /// Returns true if a catalog entry was accepted.
    pub fn is_match(&self) -> bool {
        self.entry.is_some()
    }
}

/// Matches ingredient lines against the catalog held by a [`CatalogStore`].
///
/// Cheap to share across threads behind an `Arc`; every call works on the
/// snapshot current at the time it started.
#[derive(Debug)]
pub struct ProductSearch {
    store: Arc<CatalogStore>,
    normalizer: IngredientNormalizer,
    weights: ScoringWeights,
    threshold: f64,
    not_found_marker: String,
}

impl ProductSearch {
    /// Creates a search over `store` with default stopwords, weights and threshold.
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self {
            store,
            normalizer: IngredientNormalizer::default(),
            weights: ScoringWeights::default(),
            threshold: DEFAULT_THRESHOLD,
            not_found_marker: DEFAULT_NOT_FOUND_MARKER.to_string(),
        }
    }

    /// Build from configuration and perform the initial catalog load.
    pub fn from_config(config: &ShoppingConfig) -> Result<Self> {
        config.validate()?;

        let weights = ScoringWeights {
            token_scale: config.matching.token_scale,
            partial_scale: config.matching.partial_scale,
            long_partial_scale: config.matching.long_partial_scale,
            partial_length_ratio: config.matching.partial_length_ratio,
            long_length_ratio: config.matching.long_length_ratio,
        };
        weights
            .validate()
            .map_err(|e| Error::invalid_weights(e.to_string()).with_source(e))?;

        let mut stopwords = if config.normalizer.replace_defaults {
            Stopwords::empty()
        } else {
            Stopwords::spanish()
        };
        stopwords.extend(&config.normalizer.extra_stopwords);

        let store = Arc::new(CatalogStore::from_path(&config.catalog.path));
        store.load(config.catalog.force_reload);

        Ok(Self::new(store)
            .with_normalizer(IngredientNormalizer::new(stopwords))
            .with_weights(weights)
            .with_threshold(config.matching.threshold)
            .with_not_found_marker(config.output.not_found_marker.clone()))
    }

    /// Replace the normalizer.
    pub fn with_normalizer(mut self, normalizer: IngredientNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Replace the scoring weights.
    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Replace the minimum accepted score.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Replace the marker used in "not found" names.
    pub fn with_not_found_marker(mut self, marker: impl Into<String>) -> Self {
        self.not_found_marker = marker.into();
        self
    }

    /// The catalog store.
    pub fn store(&self) -> &Arc<CatalogStore> {
        &self.store
    }

    /// The minimum accepted score.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Force a catalog reload; in-flight searches keep their snapshot.
    pub fn reload(&self) -> Arc<Snapshot> {
        self.store.reload()
    }

    /// Match a single ingredient against the current catalog.
    pub fn lookup(&self, ingredient: &str) -> Lookup {
        let snapshot = self.store.current();
        let (query, index, score) = self.resolve(&snapshot, ingredient);

        Lookup {
            ingredient: ingredient.to_string(),
            query,
            entry: index.and_then(|i| snapshot.get(i)).cloned(),
            score,
        }
    }

    /// Map ingredient lines to products, in input order.
    ///
    /// Unmatched ingredients become "not found" placeholders. A product
    /// already emitted earlier in the same call is not repeated.
    pub fn search<S: AsRef<str>>(&self, ingredients: &[S]) -> Vec<ProductResult> {
        let _timer = Timer::start("shopping.search");
        let snapshot = self.store.current();
        let mut results = Vec::with_capacity(ingredients.len());
        let mut seen_ids: HashSet<&str> = HashSet::new();

        for ingredient in ingredients {
            let ingredient = ingredient.as_ref();
            let (_, index, _) = self.resolve(&snapshot, ingredient);

            match index.and_then(|i| snapshot.get(i)) {
                Some(entry) => {
                    if !seen_ids.insert(entry.id.as_str()) {
                        metrics().increment("shopping.duplicates");
                        tracing::debug!(ingredient, id = %entry.id, "Product already listed");
                        continue;
                    }
                    metrics().increment("shopping.matched");
                    results.push(ProductResult::from_entry(entry));
                }
                None => {
                    metrics().increment("shopping.unmatched");
                    results.push(ProductResult::not_found(ingredient, &self.not_found_marker));
                }
            }
        }

        tracing::info!(
            ingredients = ingredients.len(),
            products = results.len(),
            generation = snapshot.generation(),
            "Shopping list resolved"
        );

        results
    }

    /// Like [`search`](Self::search), taking a JSON array of strings.
    pub fn search_json(&self, json: &str) -> Result<Vec<ProductResult>> {
        let ingredients: Vec<String> = serde_json::from_str(json).map_err(|e| {
            Error::invalid_input(format!("expected a JSON array of ingredient strings: {}", e))
                .with_source(e)
        })?;
        Ok(self.search(&ingredients))
    }

    /// Normalize and match one ingredient against `snapshot`.
    fn resolve(&self, snapshot: &Snapshot, ingredient: &str) -> (String, Option<usize>, f64) {
        let query = self.normalizer.clean(ingredient);
        let result = best_match(&query, snapshot.names(), self.threshold, &self.weights);

        tracing::debug!(
            ingredient,
            query = %query,
            matched = result.index.map(|i| snapshot.names()[i].as_str()),
            score = result.score,
            "Ingredient resolved"
        );

        (query, result.index, result.score)
    }
}
