//! Configuration loading and schema definitions
//!
//! TOML configuration for the matching engine, with `FOODSHARE_*`
//! environment overrides.

mod loader;
mod schema;

pub use loader::{Config, ENV_CATALOG_PATH, ENV_MATCH_THRESHOLD};
pub use schema::*;
