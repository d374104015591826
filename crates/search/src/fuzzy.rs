//! Fuzzy string similarity.
//!
//! All scores are in `[0, 100]` and computed over Unicode scalar values.
//! The building block is the normalized InDel similarity (`ratio`); the
//! token and partial variants re-arrange or window the inputs before
//! delegating to it, and [`weighted_ratio`] combines them.

use crate::ScoringWeights;
use std::collections::BTreeSet;

/// Length of the longest common subsequence of two char slices.
pub fn lcs_length(a: &[char], b: &[char]) -> usize {
    let m = a.len();
    let n = b.len();

    if m == 0 || n == 0 {
        return 0;
    }

    // Use two rows for space optimization
    let mut prev = vec![0usize; n + 1];
    let mut curr = vec![0usize; n + 1];

    for i in 1..=m {
        for j in 1..=n {
            curr[j] = if a[i - 1] == b[j - 1] {
                prev[j - 1] + 1
            } else {
                prev[j].max(curr[j - 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Number of insertions and deletions needed to transform `a` into `b`.
///
/// # Example
/// ```
/// use foodshare_search::indel_distance;
///
/// assert_eq!(indel_distance("huevo", "huevos"), 1);
/// assert_eq!(indel_distance("sal", "sol"), 2);
/// ```
pub fn indel_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    a.len() + b.len() - 2 * lcs_length(&a, &b)
}

fn ratio_chars(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    100.0 * (2 * lcs_length(a, b)) as f64 / total as f64
}

/// Normalized InDel similarity: `100 * 2 * lcs / (|a| + |b|)`.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    ratio_chars(&a, &b)
}

/// Best `ratio` of the shorter string against any window of the longer one.
///
/// Windows are every full-length substring plus the prefixes and suffixes
/// shorter than the needle, so a needle hanging off either end still scores.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() || b.is_empty() {
        return if a.is_empty() && b.is_empty() { 100.0 } else { 0.0 };
    }

    if a.len() < b.len() {
        best_window(&a, &b)
    } else if a.len() > b.len() {
        best_window(&b, &a)
    } else {
        best_window(&a, &b).max(best_window(&b, &a))
    }
}

fn best_window(needle: &[char], haystack: &[char]) -> f64 {
    let m = needle.len();
    let n = haystack.len();
    let mut best = 0.0_f64;

    for start in 0..=(n - m) {
        best = best.max(ratio_chars(needle, &haystack[start..start + m]));
        if best >= 100.0 {
            return 100.0;
        }
    }

    for len in 1..m {
        best = best
            .max(ratio_chars(needle, &haystack[..len]))
            .max(ratio_chars(needle, &haystack[n - len..]));
    }

    best
}

fn tokens(s: &str) -> BTreeSet<&str> {
    s.split_whitespace().collect()
}

fn sorted_tokens(s: &str) -> String {
    let mut words: Vec<&str> = s.split_whitespace().collect();
    words.sort_unstable();
    words.join(" ")
}

fn join_tokens<'a, 'b: 'a>(words: impl Iterator<Item = &'a &'b str>) -> String {
    words.copied().collect::<Vec<_>>().join(" ")
}

/// `ratio` after sorting the words of both strings alphabetically.
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

/// Compares the shared words against each side's full word set.
///
/// Returns 100 when one side's words are a subset of the other's.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let ta = tokens(a);
    let tb = tokens(b);

    if ta.is_empty() || tb.is_empty() {
        return 0.0;
    }

    let sect = join_tokens(ta.intersection(&tb));
    let diff_ab = join_tokens(ta.difference(&tb));
    let diff_ba = join_tokens(tb.difference(&ta));

    if !sect.is_empty() && (diff_ab.is_empty() || diff_ba.is_empty()) {
        return 100.0;
    }

    let combine = |diff: &str| {
        if sect.is_empty() {
            diff.to_string()
        } else {
            format!("{sect} {diff}")
        }
    };
    let combined_ab = combine(&diff_ab);
    let combined_ba = combine(&diff_ba);

    let mut best = ratio(&combined_ab, &combined_ba);
    if !sect.is_empty() {
        best = best
            .max(ratio(&sect, &combined_ab))
            .max(ratio(&sect, &combined_ba));
    }
    best
}

/// Maximum of [`token_sort_ratio`] and [`token_set_ratio`].
pub fn token_ratio(a: &str, b: &str) -> f64 {
    token_sort_ratio(a, b).max(token_set_ratio(a, b))
}

/// `partial_ratio` over sorted words; 100 as soon as any word is shared.
pub fn partial_token_ratio(a: &str, b: &str) -> f64 {
    let ta = tokens(a);
    let tb = tokens(b);

    if ta.is_empty() || tb.is_empty() {
        return 0.0;
    }
    if ta.intersection(&tb).next().is_some() {
        return 100.0;
    }

    partial_ratio(&sorted_tokens(a), &sorted_tokens(b))
}

/// Composite similarity combining character, token and partial scores.
///
/// Strings of similar length are compared whole (`ratio`, token ratios);
/// once one is markedly longer the partial scores take over, scaled down
/// so a full-length match still beats a substring hit.
///
/// # Example
/// ```
/// use foodshare_search::{weighted_ratio, ScoringWeights};
///
/// let weights = ScoringWeights::default();
/// let score = weighted_ratio("aceite oliva", "aceite oliva virgen extra", &weights);
/// assert_eq!(score, 90.0);
/// assert_eq!(weighted_ratio("", "aceite", &weights), 0.0);
/// ```
pub fn weighted_ratio(a: &str, b: &str, weights: &ScoringWeights) -> f64 {
    let len_a = a.chars().count();
    let len_b = b.chars().count();

    if len_a == 0 || len_b == 0 {
        return 0.0;
    }

    let len_ratio = len_a.max(len_b) as f64 / len_a.min(len_b) as f64;
    let base = ratio(a, b);

    if len_ratio < weights.partial_length_ratio {
        return base.max(token_ratio(a, b) * weights.token_scale);
    }

    let partial_scale = if len_ratio < weights.long_length_ratio {
        weights.partial_scale
    } else {
        weights.long_partial_scale
    };

    base.max(partial_ratio(a, b) * partial_scale)
        .max(partial_token_ratio(a, b) * weights.token_scale * partial_scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indel_same() {
        assert_eq!(indel_distance("huevos", "huevos"), 0);
    }

    #[test]
    fn test_indel_substitution_counts_twice() {
        assert_eq!(indel_distance("sal", "sol"), 2);
    }

    #[test]
    fn test_indel_insert_delete() {
        assert_eq!(indel_distance("helo", "hello"), 1);
        assert_eq!(indel_distance("hello", "helo"), 1);
        assert_eq!(indel_distance("", "ajo"), 3);
    }

    #[test]
    fn test_ratio() {
        assert_eq!(ratio("ab", "ac"), 50.0);
        assert_eq!(ratio("leche", "leche"), 100.0);
        assert_eq!(ratio("", ""), 100.0);
        assert_eq!(ratio("abc", ""), 0.0);
    }

    #[test]
    fn test_ratio_counts_chars_not_bytes() {
        assert_eq!(ratio("piña", "pina"), 75.0);
    }

    #[test]
    fn test_partial_ratio_substring() {
        assert_eq!(partial_ratio("huevos", "huevos frescos"), 100.0);
        assert_eq!(partial_ratio("frescos", "huevos frescos"), 100.0);
    }

    #[test]
    fn test_partial_ratio_overhanging_prefix() {
        // "xaj" only overlaps the start of "ajo blanco" by two chars
        let score = partial_ratio("xaj", "ajo blanco");
        assert!(score >= 80.0 - 1e-9, "{score}");
    }

    #[test]
    fn test_partial_ratio_empty() {
        assert_eq!(partial_ratio("", "abc"), 0.0);
        assert_eq!(partial_ratio("", ""), 100.0);
    }

    #[test]
    fn test_token_sort_ignores_order() {
        assert_eq!(token_sort_ratio("oliva aceite", "aceite oliva"), 100.0);
    }

    #[test]
    fn test_token_set_subset() {
        assert_eq!(token_set_ratio("aceite", "aceite de oliva"), 100.0);
        assert_eq!(token_set_ratio("", "aceite"), 0.0);
    }

    #[test]
    fn test_token_set_disjoint() {
        assert_eq!(token_set_ratio("ab", "ac"), 50.0);
    }

    #[test]
    fn test_partial_token_shared_word() {
        assert_eq!(partial_token_ratio("leche entera", "entera semidesnatada"), 100.0);
    }

    #[test]
    fn test_weighted_ratio_similar_length() {
        let w = ScoringWeights::default();
        assert_eq!(weighted_ratio("ab", "ac", &w), 50.0);
        assert_eq!(weighted_ratio("leche", "leche", &w), 100.0);
        assert_eq!(weighted_ratio("oliva aceite", "aceite oliva", &w), 95.0);
    }

    #[test]
    fn test_weighted_ratio_partial() {
        let w = ScoringWeights::default();
        assert_eq!(weighted_ratio("huevos", "huevos frescos", &w), 90.0);
    }

    #[test]
    fn test_weighted_ratio_long_candidate_scaled_down() {
        let w = ScoringWeights::default();
        let score = weighted_ratio("sal", "aceite oliva virgen extra", &w);
        assert!(score < 60.0, "{score}");
    }

    #[test]
    fn test_weighted_ratio_custom_weights() {
        let w = ScoringWeights {
            partial_scale: 0.5,
            ..ScoringWeights::default()
        };
        // Partial hit now worth 50, so the plain ratio (60) wins
        assert_eq!(weighted_ratio("huevos", "huevos frescos", &w), 60.0);
    }

    #[test]
    fn test_weighted_ratio_symmetric() {
        let w = ScoringWeights::default();
        assert_eq!(
            weighted_ratio("tomate triturado", "triturado de tomate", &w),
            weighted_ratio("triturado de tomate", "tomate triturado", &w)
        );
    }
}
