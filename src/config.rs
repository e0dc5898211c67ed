use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::listsync::FetchOptions;
use crate::pages::PageOptions;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// GraphQL endpoint serving the list queries and mutations.
    pub endpoint: String,

    /// Base URL of the publisher start/stop control endpoints.
    pub control_base: String,

    /// Page size for board, play and font lists.
    pub board_page_limit: u32,

    /// Page size for the publisher list.
    pub publisher_page_limit: u32,

    /// Watchdog applied to every fetch (in seconds).
    pub fetch_timeout_secs: u64,

    /// Remaining scroll distance that triggers an append.
    pub scroll_threshold: f64,

    /// Providers offered by the font filter dropdown.
    pub font_providers: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:3000/graphql".to_string(),
            control_base: "http://localhost:3000".to_string(),
            board_page_limit: 30,
            publisher_page_limit: 50,
            fetch_timeout_secs: 15,
            scroll_threshold: 40.0,
            font_providers: vec!["custom".to_string(), "google".to_string()],
        }
    }
}

impl AppConfig {
    /// Loads the configuration file, creating it with defaults on first run.
    /// `BOARDWALK_ENDPOINT` overrides the configured endpoint.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            let default_config = Self::default();
            default_config.save()?;
            default_config
        };

        if let Ok(endpoint) = std::env::var("BOARDWALK_ENDPOINT") {
            config.endpoint = endpoint;
        }

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;

        info!(path = %config_path.display(), "configuration saved");
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("could not determine config directory"))?;
        Ok(config_dir.join("boardwalk").join("config.toml"))
    }

    pub fn board_page_options(&self) -> PageOptions {
        PageOptions {
            fetch: FetchOptions {
                page_size: self.board_page_limit,
                timeout: Duration::from_secs(self.fetch_timeout_secs),
                ..FetchOptions::default()
            },
            scroll_threshold: self.scroll_threshold,
        }
    }

    pub fn publisher_page_options(&self) -> PageOptions {
        PageOptions {
            fetch: FetchOptions {
                page_size: self.publisher_page_limit,
                timeout: Duration::from_secs(self.fetch_timeout_secs),
                ..FetchOptions::default()
            },
            scroll_threshold: self.scroll_threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_page_contracts() {
        let config = AppConfig::default();
        assert_eq!(config.board_page_options().fetch.page_size, 30);
        assert_eq!(config.publisher_page_options().fetch.page_size, 50);
        assert_eq!(
            config.board_page_options().fetch.timeout,
            Duration::from_secs(15)
        );
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = AppConfig::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.endpoint, config.endpoint);
        assert_eq!(parsed.font_providers, config.font_providers);
    }
}
