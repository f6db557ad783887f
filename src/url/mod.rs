//! URL handling: seed normalization, site-root naming, reference resolution
//!
//! A crawl run is anchored by a [`SiteRoot`]: the normalized seed URL plus
//! the sanitized domain name used as the local output directory. Every
//! extracted reference is resolved through it into an absolute URL and a
//! deterministic local storage path.

mod site;

pub use site::{ResolvedReference, SiteRoot};
