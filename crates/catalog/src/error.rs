//! Error types for the catalog crate.

use thiserror::Error;

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors raised while reading a catalog source.
///
/// None of these reach callers of [`CatalogStore::load`](crate::CatalogStore::load):
/// an unavailable source yields an empty snapshot and a malformed record is skipped.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Source missing or unreadable
    #[error("Catalog source unavailable: {0}")]
    Unavailable(String),

    /// Source readable but not a list of records
    #[error("Catalog parse error: {0}")]
    Parse(String),

    /// A single record failed validation
    #[error("Malformed catalog entry: {0}")]
    MalformedEntry(String),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Error code for integration with foodshare-core error handling.
/// Range: 12xxx for catalog errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogErrorCode {
    /// Source missing or unreadable
    Unavailable = 12001,
    /// Source is not a list of records
    Parse = 12002,
    /// Record failed validation
    MalformedEntry = 12003,
    /// JSON parsing error
    JsonParsing = 12004,
}

impl CatalogError {
    /// Returns the error code for this error.
    pub fn code(&self) -> CatalogErrorCode {
        match self {
            CatalogError::Unavailable(_) => CatalogErrorCode::Unavailable,
            CatalogError::Parse(_) => CatalogErrorCode::Parse,
            CatalogError::MalformedEntry(_) => CatalogErrorCode::MalformedEntry,
            CatalogError::JsonError(_) => CatalogErrorCode::JsonParsing,
        }
    }

    /// Returns true if the whole source could not be used.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, CatalogError::Unavailable(_) | CatalogError::Parse(_))
    }
}
