//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the mirror, including:
//! - Building the HTTP client with the browser-like user agent and timeouts
//! - Text fetches with charset-aware decoding and lossy UTF-8 fallback
//! - Streaming binary fetches written straight to disk
//! - Error classification (status, timeout, connection)

use crate::config::FetchConfig;
use reqwest::Client;
use std::path::Path;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use url::Url;

/// Result of a text fetch
#[derive(Debug)]
pub enum TextFetch {
    /// Successfully fetched and decoded the body
    ///
    /// Decoding uses the Content-Type charset when present and falls back to
    /// lossy UTF-8, so malformed byte sequences yield replacement characters
    /// instead of an error.
    Success {
        /// Decoded page body
        body: String,
    },

    /// Non-success HTTP status
    HttpError {
        /// The HTTP status code
        status: u16,
    },

    /// Network error (connection refused, timeout, etc.)
    NetworkError {
        /// Error description
        error: String,
        /// Whether the failure was a timeout
        timed_out: bool,
    },
}

/// Result of a streaming binary fetch
#[derive(Debug)]
pub enum BinaryFetch {
    /// Byte stream fully written to the target path
    Success,

    /// Non-success HTTP status
    HttpError { status: u16 },

    /// Network error during the request or while streaming the body
    NetworkError { error: String, timed_out: bool },

    /// Filesystem error while writing the stream
    WriteError { error: String },
}

/// Builds the HTTP client shared by the whole crawl
///
/// The user agent and timeouts come from [`FetchConfig`]; redirects follow
/// library defaults, and compressed responses are handled transparently.
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL as text
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
///
/// # Returns
///
/// A [`TextFetch`] indicating success (with the decoded body) or the kind of
/// failure. Decode problems never surface as errors; the body is decoded
/// permissively.
pub async fn fetch_text(client: &Client, url: &Url) -> TextFetch {
    let response = match client.get(url.clone()).send().await {
        Ok(response) => response,
        Err(e) => return classify_text_error(e),
    };

    let status = response.status();
    if !status.is_success() {
        return TextFetch::HttpError {
            status: status.as_u16(),
        };
    }

    // text() decodes via the Content-Type charset with lossy fallback
    match response.text().await {
        Ok(body) => TextFetch::Success { body },
        Err(e) => classify_text_error(e),
    }
}

/// Fetches a URL as an opaque byte stream, writing chunks to `path`
///
/// The parent directory must already exist; the caller creates it before
/// claiming the path. A partial file left behind by a mid-stream failure is
/// removed so the path stays claimable on a later run.
pub async fn fetch_binary(client: &Client, url: &Url, path: &Path) -> BinaryFetch {
    let mut response = match client.get(url.clone()).send().await {
        Ok(response) => response,
        Err(e) => return classify_binary_error(e),
    };

    let status = response.status();
    if !status.is_success() {
        return BinaryFetch::HttpError {
            status: status.as_u16(),
        };
    }

    let mut file = match tokio::fs::File::create(path).await {
        Ok(file) => file,
        Err(e) => {
            return BinaryFetch::WriteError {
                error: e.to_string(),
            }
        }
    };

    loop {
        match response.chunk().await {
            Ok(Some(chunk)) => {
                if let Err(e) = file.write_all(&chunk).await {
                    drop(file);
                    let _ = tokio::fs::remove_file(path).await;
                    return BinaryFetch::WriteError {
                        error: e.to_string(),
                    };
                }
            }
            Ok(None) => break,
            Err(e) => {
                drop(file);
                let _ = tokio::fs::remove_file(path).await;
                return classify_binary_error(e);
            }
        }
    }

    if let Err(e) = file.flush().await {
        return BinaryFetch::WriteError {
            error: e.to_string(),
        };
    }

    BinaryFetch::Success
}

fn classify_text_error(e: reqwest::Error) -> TextFetch {
    TextFetch::NetworkError {
        error: describe_error(&e),
        timed_out: e.is_timeout(),
    }
}

fn classify_binary_error(e: reqwest::Error) -> BinaryFetch {
    BinaryFetch::NetworkError {
        error: describe_error(&e),
        timed_out: e.is_timeout(),
    }
}

fn describe_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "Request timeout".to_string()
    } else if e.is_connect() {
        "Connection refused".to_string()
    } else {
        e.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FetchConfig;

    #[test]
    fn test_build_http_client() {
        let config = FetchConfig::default();
        let client = build_http_client(&config);
        assert!(client.is_ok());
    }

    #[test]
    fn test_build_http_client_custom_agent() {
        let config = FetchConfig {
            user_agent: "TestAgent/1.0".to_string(),
            request_timeout_secs: 5,
            connect_timeout_secs: 2,
        };
        assert!(build_http_client(&config).is_ok());
    }

    // Request/response behavior is covered with wiremock in tests/mirror_tests.rs
}
