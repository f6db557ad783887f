//! Sitemirror main entry point
//!
//! Command-line interface for the recursive site mirroring tool.

use anyhow::Context;
use clap::Parser;
use sitemirror::config::{load_config, Config};
use sitemirror::crawler::run_mirror;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Sitemirror: download a page and every same-site resource it references
///
/// Given a seed URL, sitemirror saves the page as index.html under a
/// directory named after the domain, extracts referenced stylesheets,
/// scripts, images, and HTML pages, downloads them to matching paths, and
/// runs one more discovery round over the HTML pages it picked up. Any
/// pre-existing directory of the same name is deleted first.
#[derive(Parser, Debug)]
#[command(name = "sitemirror")]
#[command(version)]
#[command(about = "Mirror a website into a local directory tree", long_about = None)]
struct Cli {
    /// Seed URL to mirror (prompted for interactively when omitted)
    #[arg(value_name = "URL")]
    url: Option<String>,

    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from {}", path.display());
            load_config(path)
                .with_context(|| format!("failed to load config {}", path.display()))?
        }
        None => Config::default(),
    };

    let seed = match cli.url {
        Some(url) => url,
        None => prompt_for_url()?,
    };

    if seed.trim().is_empty() {
        anyhow::bail!("no URL given");
    }

    run_mirror(&seed, config, ".")
        .await
        .context("mirror run failed")?;

    println!("Done.");
    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitemirror=info,warn"),
            1 => EnvFilter::new("sitemirror=debug,info"),
            2 => EnvFilter::new("sitemirror=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Reads the seed URL interactively from stdin
fn prompt_for_url() -> anyhow::Result<String> {
    print!("Enter website URL: ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("failed to read URL from stdin")?;

    Ok(line.trim().to_string())
}
