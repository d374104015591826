//! Catalog entry records and their validation.

use crate::error::{CatalogError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One purchasable product usable as a match target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    /// Unique, non-empty identifier
    pub id: String,
    /// Raw catalog name (usually a slug such as `aceite-oliva-virgen-extra`)
    pub name: String,
    /// Human-readable name, falls back to `name`
    pub display_name: Option<String>,
    /// Free-text category
    pub category: String,
    /// Opaque image reference, may be empty
    pub thumbnail: String,
    /// Non-negative unit price
    pub price: f64,
}

impl CatalogEntry {
    /// Creates an entry with no display name, category, thumbnail or price.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            display_name: None,
            category: String::new(),
            thumbnail: String::new(),
            price: 0.0,
        }
    }

    /// Validate one raw source record.
    ///
    /// `id` may be a string or an integer; `price` a number or a numeric
    /// string. Blank or missing `id`/`name` and negative or non-numeric
    /// prices are rejected.
    pub fn from_record(record: &Value) -> Result<Self> {
        let raw = RawRecord::deserialize(record)
            .map_err(|e| CatalogError::MalformedEntry(e.to_string()))?;
        raw.try_into()
    }

    /// Name shown to users: `display_name` when present, otherwise `name`.
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }

    /// Name used for matching: lowercase, hyphens as spaces.
    pub fn normalized_name(&self) -> String {
        normalize_name(&self.name)
    }
}

/// Lowercase and replace hyphens with spaces.
///
/// # Example
/// ```
/// assert_eq!(foodshare_catalog::normalize_name("Aceite-Oliva"), "aceite oliva");
/// ```
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase().replace('-', " ")
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawPrice {
    Number(f64),
    Text(String),
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    id: Option<RawId>,
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    display_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    category: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    thumbnail: Option<String>,
    price: Option<RawPrice>,
}

/// Descriptive fields never reject a record; non-strings read as absent.
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}

impl TryFrom<RawRecord> for CatalogEntry {
    type Error = CatalogError;

    fn try_from(raw: RawRecord) -> Result<Self> {
        let id = match raw.id {
            Some(RawId::Text(id)) => id.trim().to_string(),
            Some(RawId::Number(id)) => id.to_string(),
            None => String::new(),
        };
        if id.is_empty() {
            return Err(CatalogError::MalformedEntry("missing id".to_string()));
        }

        let name = raw.name.map(|n| n.trim().to_string()).unwrap_or_default();
        if name.is_empty() {
            return Err(CatalogError::MalformedEntry(format!("entry {id} has no name")));
        }

        let price = match raw.price {
            Some(RawPrice::Number(price)) => price,
            Some(RawPrice::Text(text)) => text.trim().replace(',', ".").parse::<f64>().map_err(|_| {
                CatalogError::MalformedEntry(format!("entry {id} has non-numeric price {text:?}"))
            })?,
            None => 0.0,
        };
        if !price.is_finite() || price < 0.0 {
            return Err(CatalogError::MalformedEntry(format!(
                "entry {id} has invalid price {price}"
            )));
        }

        Ok(Self {
            id,
            name,
            display_name: raw.display_name.filter(|d| !d.trim().is_empty()),
            category: raw.category.unwrap_or_default(),
            thumbnail: raw.thumbnail.unwrap_or_default(),
            price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_record() {
        let entry = CatalogEntry::from_record(&json!({
            "id": "4241",
            "name": "aceite-oliva-virgen-extra",
            "display_name": "Aceite de oliva virgen extra Hacendado",
            "category": "Aceite",
            "thumbnail": "https://img/4241.jpg",
            "price": 4.5
        }))
        .unwrap();

        assert_eq!(entry.id, "4241");
        assert_eq!(entry.display_name(), "Aceite de oliva virgen extra Hacendado");
        assert_eq!(entry.normalized_name(), "aceite oliva virgen extra");
        assert_eq!(entry.price, 4.5);
    }

    #[test]
    fn test_numeric_id_and_string_price() {
        let entry = CatalogEntry::from_record(&json!({
            "id": 31053,
            "name": "huevos",
            "price": "2.10"
        }))
        .unwrap();

        assert_eq!(entry.id, "31053");
        assert_eq!(entry.price, 2.10);
        assert_eq!(entry.category, "");
        assert_eq!(entry.thumbnail, "");
    }

    #[test]
    fn test_display_name_falls_back_to_name() {
        let entry = CatalogEntry::from_record(&json!({
            "id": "1", "name": "sal-fina", "display_name": null
        }))
        .unwrap();
        assert_eq!(entry.display_name(), "sal-fina");

        let entry = CatalogEntry::from_record(&json!({
            "id": "1", "name": "sal-fina", "display_name": "  "
        }))
        .unwrap();
        assert!(entry.display_name.is_none());
    }

    #[test]
    fn test_missing_id_rejected() {
        let err = CatalogEntry::from_record(&json!({"name": "pan"})).unwrap_err();
        assert!(matches!(err, CatalogError::MalformedEntry(_)));

        assert!(CatalogEntry::from_record(&json!({"id": "", "name": "pan"})).is_err());
        assert!(CatalogEntry::from_record(&json!({"id": null, "name": "pan"})).is_err());
    }

    #[test]
    fn test_missing_name_rejected() {
        assert!(CatalogEntry::from_record(&json!({"id": "7"})).is_err());
        assert!(CatalogEntry::from_record(&json!({"id": "7", "name": " "})).is_err());
        assert!(CatalogEntry::from_record(&json!({"id": "7", "name": 12})).is_err());
    }

    #[test]
    fn test_bad_price_rejected() {
        let negative = json!({"id": "7", "name": "pan", "price": -1});
        assert!(CatalogEntry::from_record(&negative).is_err());

        let text = json!({"id": "7", "name": "pan", "price": "gratis"});
        assert!(CatalogEntry::from_record(&text).is_err());
    }

    #[test]
    fn test_non_string_descriptive_fields_read_as_empty() {
        let entry = CatalogEntry::from_record(&json!({
            "id": "9",
            "name": "arroz-redondo",
            "display_name": ["Arroz"],
            "category": 7,
            "thumbnail": {"src": "x.jpg"},
            "price": 1.25
        }))
        .unwrap();

        assert_eq!(entry.category, "");
        assert_eq!(entry.thumbnail, "");
        assert_eq!(entry.display_name(), "arroz-redondo");
        assert_eq!(entry.price, 1.25);
    }

    #[test]
    fn test_non_object_rejected() {
        assert!(CatalogEntry::from_record(&json!("pan")).is_err());
        assert!(CatalogEntry::from_record(&json!(null)).is_err());
    }
}
