//! Configuration schema definitions
//!
//! Settings for the ingredient-to-product matching engine.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ShoppingConfig {
    /// Where products are loaded from
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Threshold and scoring weights
    #[serde(default)]
    pub matching: MatchingConfig,

    /// Stopword tuning
    #[serde(default)]
    pub normalizer: NormalizerConfig,

    /// Shopping-list presentation
    #[serde(default)]
    pub output: OutputConfig,
}

impl ShoppingConfig {
    /// Check value ranges that serde cannot express
    pub fn validate(&self) -> Result<()> {
        if self.catalog.path.trim().is_empty() {
            return Err(Error::invalid_config_value("catalog.path", "must not be empty"));
        }

        let threshold = self.matching.threshold;
        if !(0.0..=100.0).contains(&threshold) {
            return Err(Error::invalid_config_value(
                "matching.threshold",
                format!("must be between 0 and 100, got {}", threshold),
            ));
        }

        for (key, value) in [
            ("matching.token_scale", self.matching.token_scale),
            ("matching.partial_scale", self.matching.partial_scale),
            ("matching.long_partial_scale", self.matching.long_partial_scale),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(Error::invalid_config_value(
                    key,
                    format!("must be in (0, 1], got {}", value),
                ));
            }
        }

        if self.output.not_found_marker.trim().is_empty() {
            return Err(Error::invalid_config_value(
                "output.not_found_marker",
                "must not be empty",
            ));
        }

        Ok(())
    }
}

/// Catalog source configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    /// Path to the products JSON file
    #[serde(default = "default_catalog_path")]
    pub path: String,

    /// Rebuild the snapshot even when one is cached
    #[serde(default)]
    pub force_reload: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
            force_reload: false,
        }
    }
}

fn default_catalog_path() -> String {
    "data/productos.json".to_string()
}

/// Fuzzy matching configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchingConfig {
    /// Minimum composite score (0-100) for a match
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Multiplier for token-based scores
    #[serde(default = "default_token_scale")]
    pub token_scale: f64,

    /// Multiplier for partial scores
    #[serde(default = "default_partial_scale")]
    pub partial_scale: f64,

    /// Multiplier for partial scores against much longer names
    #[serde(default = "default_long_partial_scale")]
    pub long_partial_scale: f64,

    /// Length ratio above which partial scores are used
    #[serde(default = "default_partial_length_ratio")]
    pub partial_length_ratio: f64,

    /// Length ratio above which the long partial scale applies
    #[serde(default = "default_long_length_ratio")]
    pub long_length_ratio: f64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            token_scale: default_token_scale(),
            partial_scale: default_partial_scale(),
            long_partial_scale: default_long_partial_scale(),
            partial_length_ratio: default_partial_length_ratio(),
            long_length_ratio: default_long_length_ratio(),
        }
    }
}

fn default_threshold() -> f64 {
    60.0
}

fn default_token_scale() -> f64 {
    0.95
}

fn default_partial_scale() -> f64 {
    0.9
}

fn default_long_partial_scale() -> f64 {
    0.6
}

fn default_partial_length_ratio() -> f64 {
    1.5
}

fn default_long_length_ratio() -> f64 {
    8.0
}

/// Ingredient normalization configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct NormalizerConfig {
    /// Words to drop in addition to the built-in list
    #[serde(default)]
    pub extra_stopwords: Vec<String>,

    /// Use only `extra_stopwords`, ignoring the built-in list
    #[serde(default)]
    pub replace_defaults: bool,
}

/// Result formatting configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    /// Marker appended to unmatched ingredients: "<ingredient> (<marker>)"
    #[serde(default = "default_not_found_marker")]
    pub not_found_marker: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            not_found_marker: default_not_found_marker(),
        }
    }
}

fn default_not_found_marker() -> String {
    "no encontrado".to_string()
}
