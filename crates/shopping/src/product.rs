//! Output shape handed to the transport layer.

use foodshare_catalog::CatalogEntry;
use serde::{Deserialize, Serialize};

/// A shopping-list line: a purchasable product or a "not found" placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductResult {
    /// Title-cased product name, or `"<ingredient> (<marker>)"`
    pub name: String,
    /// Product image reference, empty for placeholders
    pub img_url: String,
    /// Unit price, 0 for placeholders
    pub price: f64,
}

impl ProductResult {
    /// Result for a matched catalog entry.
    pub fn from_entry(entry: &CatalogEntry) -> Self {
        Self {
            name: title_case(&entry.display_name().replace('-', " ")),
            img_url: entry.thumbnail.clone(),
            price: entry.price,
        }
    }

    /// Placeholder for an ingredient with no acceptable match.
    pub fn not_found(ingredient: &str, marker: &str) -> Self {
        Self {
            name: format!("{ingredient} ({marker})"),
            img_url: String::new(),
            price: 0.0,
        }
    }
}

/// Uppercase the first letter of every run of letters, lowercase the rest.
///
/// Any non-letter starts a new word, so `"100g"` becomes `"100G"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;

    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }

    out
}
