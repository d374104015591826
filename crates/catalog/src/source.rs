//! Where catalog records come from.

use crate::error::{CatalogError, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// A provider of raw catalog records.
///
/// Implementations only fetch and split the data into records; validation
/// of individual records happens when the snapshot is built.
pub trait CatalogSource: Send + Sync {
    /// Human-readable location, used in logs.
    fn describe(&self) -> String;

    /// Read every raw record.
    fn fetch(&self) -> Result<Vec<Value>>;
}

/// A JSON file holding an array of product records.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    /// Creates a source for the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for JsonFileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<Vec<Value>> {
        if !self.path.exists() {
            return Err(CatalogError::Unavailable(format!(
                "{} not found",
                self.path.display()
            )));
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            CatalogError::Unavailable(format!("failed to read {}: {}", self.path.display(), e))
        })?;

        parse_records(&content)
    }
}

/// Records held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    records: Vec<Value>,
}

impl StaticSource {
    /// Creates a source serving `records`.
    pub fn new(records: Vec<Value>) -> Self {
        Self { records }
    }

    /// Parse a JSON array of records.
    pub fn from_json(json: &str) -> Result<Self> {
        parse_records(json).map(Self::new)
    }
}

impl CatalogSource for StaticSource {
    fn describe(&self) -> String {
        format!("<memory: {} records>", self.records.len())
    }

    fn fetch(&self) -> Result<Vec<Value>> {
        Ok(self.records.clone())
    }
}

/// Split a JSON document into records; the top level must be an array.
fn parse_records(json: &str) -> Result<Vec<Value>> {
    match serde_json::from_str::<Value>(json)? {
        Value::Array(records) => Ok(records),
        other => Err(CatalogError::Parse(format!(
            "expected a JSON array of products, found {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
