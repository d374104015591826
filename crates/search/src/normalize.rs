//! Ingredient phrase normalization.
//!
//! Reduces a free-text ingredient line such as `"2 cucharadas de aceite"`
//! to the tokens worth matching against catalog names (`"aceite"`).

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Production stopword list: units, word fractions, quantifiers,
/// prepositions/articles and size/state adjectives.
const SPANISH_STOPWORDS: &[&str] = &[
    // Units
    "cucharadas", "cucharada", "cucharadita", "cucharaditas",
    "taza", "tazas", "pizca", "pizcas",
    "gramos", "gramo", "kg", "ml", "litro", "litros",
    // Written fractions
    "1/2", "1/4", "1/3", "3/4",
    // Quantifiers
    "unidad", "unidades", "un", "una", "unos", "unas",
    // Prepositions and articles ("al gusto" = to taste)
    "al", "gusto", "de", "la", "el", "los", "las", "para", "con", "sin",
    // Size and state adjectives
    "fresco", "fresca", "frescos", "frescas",
    "grande", "grandes", "pequeno", "pequena", "mediano", "mediana",
    "troceado", "troceada", "picado", "picada",
    "rallado", "rallada", "molido", "molida",
];

static SPANISH: Lazy<Stopwords> =
    Lazy::new(|| Stopwords::from_iter(SPANISH_STOPWORDS.iter().copied()));

/// A set of lowercase words dropped during normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stopwords {
    words: HashSet<String>,
}

impl Stopwords {
    /// The production Spanish stopword set.
    pub fn spanish() -> Self {
        SPANISH.clone()
    }

    /// An empty set; only numbers and fractions get stripped.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add more words to the set.
    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words.extend(
            words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty()),
        );
    }

    /// Returns true if `word` (already lowercase) is a stopword.
    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of words in the set.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if the set has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Stopwords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut stopwords = Self::empty();
        stopwords.extend(iter);
        stopwords
    }
}

/// Strips quantities, units and noise words from ingredient phrases.
#[derive(Debug, Clone)]
pub struct IngredientNormalizer {
    stopwords: Stopwords,
}

impl Default for IngredientNormalizer {
    fn default() -> Self {
        Self::new(Stopwords::spanish())
    }
}

impl IngredientNormalizer {
    /// Creates a normalizer with the given stopword set.
    pub fn new(stopwords: Stopwords) -> Self {
        Self { stopwords }
    }

    /// The stopwords in use.
    pub fn stopwords(&self) -> &Stopwords {
        &self.stopwords
    }

    /// Normalize a raw ingredient phrase.
    ///
    /// Surviving tokens keep their relative order and are joined with a
    /// single space. When every token is dropped the lowercased input is
    /// returned untouched, so the result is never empty for non-blank input.
    ///
    /// # Example
    /// ```
    /// use foodshare_search::IngredientNormalizer;
    ///
    /// let normalizer = IngredientNormalizer::default();
    /// assert_eq!(normalizer.clean("200 g Tomate maduro"), "g tomate maduro");
    /// assert_eq!(normalizer.clean("sal al gusto"), "sal");
    /// assert_eq!(normalizer.clean("1/2 taza"), "1/2 taza");
    /// ```
    pub fn clean(&self, raw: &str) -> String {
        let words: Vec<String> = raw
            .split_whitespace()
            .map(str::to_lowercase)
            .filter(|word| !is_number(word) && !is_fraction(word) && !self.stopwords.contains(word))
            .collect();

        if words.is_empty() {
            return raw.to_lowercase();
        }

        words.join(" ")
    }
}

/// Digits only, once `.` and `,` separators are removed.
fn is_number(word: &str) -> bool {
    let mut digits = word.chars().filter(|c| *c != '.' && *c != ',').peekable();
    digits.peek().is_some() && digits.all(char::is_numeric)
}

/// Digits on both sides of a single `/`.
fn is_fraction(word: &str) -> bool {
    match word.split_once('/') {
        Some((num, den)) => is_digits(num) && is_digits(den),
        None => false,
    }
}

fn is_digits(part: &str) -> bool {
    !part.is_empty() && part.chars().all(char::is_numeric)
}
