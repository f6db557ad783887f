//! Sitemirror: a recursive site mirroring tool
//!
//! Given a seed URL, this crate downloads the page, extracts linked same-site
//! resources (stylesheets, scripts, images, HTML pages), follows discovered
//! HTML pages for a second discovery round, and persists everything to a local
//! directory tree mirroring the site's path structure.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod fetch;
pub mod store;
pub mod url;

use thiserror::Error;

/// Main error type for sitemirror operations
///
/// Per-resource fetch failures never become errors; they are logged and the
/// resource skipped. Only initialization problems and a failed seed fetch
/// surface here.
#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("Failed to fetch seed page {url}: {reason}")]
    SeedFetch { url: String, reason: String },

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for sitemirror operations
pub type Result<T> = std::result::Result<T, MirrorError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_mirror, Frontier};
pub use extract::{extract_references, ResourceKind};
pub use url::SiteRoot;
