//! Best-candidate selection.

use crate::error::{Result, SearchError};
use crate::{weighted_ratio, ScoringWeights};
use serde::{Deserialize, Serialize};

/// Outcome of matching one query against a candidate list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Index of the accepted candidate, `None` if nothing reached the threshold
    pub index: Option<usize>,
    /// Best score seen, even when below the threshold
    pub score: f64,
}

impl MatchResult {
    /// A result with no accepted candidate.
    pub fn none(score: f64) -> Self {
        Self { index: None, score }
    }

    /// Returns true if a candidate was accepted.
    #[inline]
    pub fn is_match(&self) -> bool {
        self.index.is_some()
    }
}

/// Score every candidate and pick the best one scoring at least `threshold`.
///
/// The highest score wins; on a tie the earliest candidate is kept, so the
/// result follows candidate order and is identical across calls.
///
/// # Example
/// ```
/// use foodshare_search::{best_match, ScoringWeights};
///
/// let names = ["aceite oliva virgen extra", "huevos frescos"];
/// let result = best_match("huevos", &names, 60.0, &ScoringWeights::default());
/// assert_eq!(result.index, Some(1));
///
/// let result = best_match("sal", &names, 60.0, &ScoringWeights::default());
/// assert_eq!(result.index, None);
/// ```
pub fn best_match<S>(
    query: &str,
    candidates: &[S],
    threshold: f64,
    weights: &ScoringWeights,
) -> MatchResult
where
    S: AsRef<str> + Sync,
{
    let scores = score_all(query, candidates, weights);

    let mut best: Option<(usize, f64)> = None;
    for (index, score) in scores.into_iter().enumerate() {
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((index, score)),
        }
    }

    match best {
        Some((index, score)) if score >= threshold => {
            tracing::trace!(query, index, score, "Candidate accepted");
            MatchResult { index: Some(index), score }
        }
        Some((_, score)) => MatchResult::none(score),
        None => MatchResult::none(0.0),
    }
}

/// [`best_match`] over a JSON array of candidate names.
///
/// Rejects a threshold outside `[0, 100]` and anything that is not an
/// array of strings.
pub fn best_match_in_json(
    query: &str,
    names_json: &str,
    threshold: f64,
    weights: &ScoringWeights,
) -> Result<MatchResult> {
    if !(0.0..=100.0).contains(&threshold) {
        return Err(SearchError::InvalidQuery(format!(
            "threshold must be between 0 and 100, got {threshold}"
        )));
    }
    let names: Vec<String> = serde_json::from_str(names_json)?;
    Ok(best_match(query, &names, threshold, weights))
}

/// Scores in candidate order.
fn score_all<S>(query: &str, candidates: &[S], weights: &ScoringWeights) -> Vec<f64>
where
    S: AsRef<str> + Sync,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        candidates
            .par_iter()
            .map(|candidate| weighted_ratio(query, candidate.as_ref(), weights))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        candidates
            .iter()
            .map(|candidate| weighted_ratio(query, candidate.as_ref(), weights))
            .collect()
    }
}
