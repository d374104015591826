//! Error types for the search crate.

use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur during search operations.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Invalid query
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Invalid scoring weights
    #[error("Invalid scoring weights: {0}")]
    InvalidWeights(String),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Error code for integration with foodshare-core error handling.
/// Range: 11xxx for search errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchErrorCode {
    /// Invalid query
    InvalidQuery = 11001,
    /// Invalid scoring weights
    InvalidWeights = 11002,
    /// JSON parsing error
    JsonParsing = 11003,
}

impl SearchError {
    /// Returns the error code for this error.
    pub fn code(&self) -> SearchErrorCode {
        match self {
            SearchError::InvalidQuery(_) => SearchErrorCode::InvalidQuery,
            SearchError::InvalidWeights(_) => SearchErrorCode::InvalidWeights,
            SearchError::JsonError(_) => SearchErrorCode::JsonParsing,
        }
    }
}
