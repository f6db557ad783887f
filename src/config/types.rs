use serde::Deserialize;

/// Main configuration structure for sitemirror
///
/// Every section and field is optional in the TOML file; `Config::default()`
/// is the behavior you get without a config file at all.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub fetch: FetchConfig,

    #[serde(default)]
    pub crawl: CrawlConfig,
}

/// HTTP fetch behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Connection establishment timeout in seconds
    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// Maximum number of concurrent resource fetches within a pass
    #[serde(rename = "max-concurrent-fetches", default = "default_concurrency")]
    pub max_concurrent_fetches: u32,

    /// Overall crawl deadline in seconds; 0 means no deadline
    #[serde(rename = "deadline-secs", default)]
    pub deadline_secs: u64,

    /// Log each newly discovered resource reference at info level
    #[serde(rename = "print-discoveries", default = "default_true")]
    pub print_discoveries: bool,
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36".to_string()
}

fn default_request_timeout() -> u64 {
    15
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_concurrency() -> u32 {
    8
}

fn default_true() -> bool {
    true
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            request_timeout_secs: default_request_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_concurrent_fetches: default_concurrency(),
            deadline_secs: 0,
            print_discoveries: default_true(),
        }
    }
}
