//! Core utilities for Foodshare shopping services
//!
//! This crate provides shared functionality used by the matching engine
//! and its front-ends:
//!
//! - **Error handling**: Structured errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML-based configuration with validation and environment overrides
//!
//! # Example
//!
//! ```rust,no_run
//! use foodshare_core::config::Config;
//!
//! let config = Config::load(None).expect("invalid configuration");
//! println!("Catalog: {}", config.schema.catalog.path);
//! println!("Threshold: {}", config.schema.matching.threshold);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ShoppingConfig};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
}
