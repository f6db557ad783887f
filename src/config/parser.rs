use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;

    let config: Config = toml::from_str(&content)?;

    validate(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[fetch]
user-agent = "TestAgent/1.0"
request-timeout-secs = 20
connect-timeout-secs = 5

[crawl]
max-concurrent-fetches = 4
deadline-secs = 120
print-discoveries = false
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.fetch.user_agent, "TestAgent/1.0");
        assert_eq!(config.fetch.request_timeout_secs, 20);
        assert_eq!(config.crawl.max_concurrent_fetches, 4);
        assert_eq!(config.crawl.deadline_secs, 120);
        assert!(!config.crawl.print_discoveries);
    }

    #[test]
    fn test_load_empty_config_uses_defaults() {
        let file = create_temp_config("");
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.fetch.request_timeout_secs, 15);
        assert_eq!(config.crawl.max_concurrent_fetches, 8);
        assert_eq!(config.crawl.deadline_secs, 0);
        assert!(config.crawl.print_discoveries);
    }

    #[test]
    fn test_load_partial_section() {
        let file = create_temp_config("[crawl]\nmax-concurrent-fetches = 2\n");
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawl.max_concurrent_fetches, 2);
        assert_eq!(config.fetch.request_timeout_secs, 15);
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("[fetch\nbroken =");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_rejects_invalid_values() {
        let file = create_temp_config("[crawl]\nmax-concurrent-fetches = 0\n");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}
