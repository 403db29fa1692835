//! Configuration management for the indexing service

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct IndexingConfig {
    /// Non-filing articles removed from the start of sort titles, tried in order
    pub articles: Vec<String>,
    /// Largest accepted record payload
    pub max_payload_bytes: usize,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub indexing: IndexingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (e.g. DCINDEX_SERVER__PORT=9000)
            .add_source(environment())
            .build()?;

        config.try_deserialize()
    }
}

/// Environment source; `DCINDEX_INDEXING__ARTICLES` takes a comma-separated list
fn environment() -> Environment {
    Environment::with_prefix("DCINDEX")
        .prefix_separator("_")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("indexing.articles")
        .try_parsing(true)
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            articles: vec!["the ".to_string(), "a ".to_string(), "an ".to_string()],
            max_payload_bytes: 1024 * 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.indexing.articles, vec!["the ", "a ", "an "]);
    }

    #[test]
    fn test_partial_indexing_section() {
        let config: AppConfig = Config::builder()
            .add_source(config::File::from_str(
                "[indexing]\nmax_payload_bytes = 10\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(config.indexing.max_payload_bytes, 10);
        assert_eq!(config.indexing.articles, vec!["the ", "a ", "an "]);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_articles_from_environment() {
        let vars: config::Map<String, String> = [
            ("DCINDEX_INDEXING__ARTICLES".to_string(), "der ,die ,das ".to_string()),
            ("DCINDEX_SERVER__PORT".to_string(), "9000".to_string()),
        ]
        .into_iter()
        .collect();

        let config: AppConfig = Config::builder()
            .add_source(environment().source(Some(vars)))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(config.indexing.articles, vec!["der ", "die ", "das "]);
        assert_eq!(config.indexing.max_payload_bytes, 1024 * 1024);
        assert_eq!(config.server.port, 9000);
    }
}
