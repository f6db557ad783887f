//! Crawl orchestration
//!
//! The [`Frontier`] owns all crawl state and drives the fixed two-round
//! discovery process; [`run_mirror`] is the one-call entry point used by the
//! binary and the integration tests.

mod frontier;

pub use frontier::Frontier;

use crate::config::Config;
use crate::Result;
use std::path::PathBuf;

/// Mirrors a site: initializes a frontier for the seed and drives it to completion
///
/// # Arguments
///
/// * `seed` - Raw seed URL (bare domains accepted)
/// * `config` - Crawl and fetch configuration
/// * `output_base` - Directory the sanitized site directory is created in
///
/// # Returns
///
/// * `Ok(())` - Crawl completed; partial failures were logged and skipped
/// * `Err(MirrorError)` - Initialization failed or the seed page could not be fetched
pub async fn run_mirror(seed: &str, config: Config, output_base: impl Into<PathBuf>) -> Result<()> {
    let mut frontier = Frontier::initialize(seed, config, output_base)?;
    frontier.drive().await
}
