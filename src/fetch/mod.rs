//! HTTP fetching for the mirror
//!
//! Thin request/response adapters around reqwest: one client for the whole
//! crawl, text fetches decoded permissively, binary fetches streamed to disk.

mod fetcher;

pub use fetcher::{build_http_client, fetch_binary, fetch_text, BinaryFetch, TextFetch};
