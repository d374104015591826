//! Tunable weights for the composite fuzzy score.

use crate::error::{Result, SearchError};
use serde::{Deserialize, Serialize};

/// Default minimum score for a match to be accepted.
pub const DEFAULT_THRESHOLD: f64 = 60.0;

/// Weights and cut-offs used by [`weighted_ratio`](crate::weighted_ratio).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Multiplier applied to token-based scores
    pub token_scale: f64,
    /// Multiplier applied to partial scores when one string is longer
    pub partial_scale: f64,
    /// Multiplier applied to partial scores when one string is much longer
    pub long_partial_scale: f64,
    /// Length ratio at which partial scores start to count
    pub partial_length_ratio: f64,
    /// Length ratio at which `long_partial_scale` replaces `partial_scale`
    pub long_length_ratio: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            token_scale: 0.95,
            partial_scale: 0.9,
            long_partial_scale: 0.6,
            partial_length_ratio: 1.5,
            long_length_ratio: 8.0,
        }
    }
}

impl ScoringWeights {
    /// Check that every scale is in `(0, 1]` and the length ratios are ordered.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("token_scale", self.token_scale),
            ("partial_scale", self.partial_scale),
            ("long_partial_scale", self.long_partial_scale),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(SearchError::InvalidWeights(format!(
                    "{name} must be in (0, 1], got {value}"
                )));
            }
        }

        let ordered = self.partial_length_ratio >= 1.0
            && self.long_length_ratio >= self.partial_length_ratio;
        if !ordered {
            return Err(SearchError::InvalidWeights(format!(
                "length ratios must satisfy 1 <= partial ({}) <= long ({})",
                self.partial_length_ratio, self.long_length_ratio
            )));
        }

        Ok(())
    }
}
