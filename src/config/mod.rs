//! Configuration module for sitemirror
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. A config file is optional; every field has a default matching the
//! behavior of running with no file at all.

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlConfig, FetchConfig};

// Re-export parser functions
pub use parser::load_config;
