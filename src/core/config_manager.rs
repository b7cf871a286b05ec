// src/core/config_manager.rs
//! Configuration from `config.yaml` and the environment

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

const DEFAULT_CRAWLER_URL: &str = "https://api.exa.ai";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    pub environment: String,
    pub server: ServerSettings,
    pub crawler: CrawlerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    #[serde(default = "default_crawler_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct EnvironmentConfig {
    #[serde(default)]
    server: Option<ServerSettings>,
    #[serde(default)]
    crawler: Option<CrawlerConfig>,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: EnvironmentConfig,
    #[serde(default)]
    production: EnvironmentConfig,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_crawler_url() -> String {
    DEFAULT_CRAWLER_URL.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
        }
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: default_crawler_url(),
            api_key: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ConfigManager {
    /// Load configuration for the current environment from `config_path`
    /// (when it exists), then apply environment variable overrides.
    pub fn load(config_path: &Path) -> Result<Self> {
        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);

        let mut config = if config_path.exists() {
            Self::load_from_file(config_path, &environment)?
        } else {
            info!(
                "{} not found, using default configuration",
                config_path.display()
            );
            Self {
                environment,
                ..Self::default()
            }
        };

        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    fn get_environment() -> String {
        std::env::var("QUICKCV_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    pub fn load_from_file(config_path: &Path, environment: &str) -> Result<Self> {
        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        Self::from_yaml(&content, environment)
            .with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    pub fn from_yaml(content: &str, environment: &str) -> Result<Self> {
        let config_file: ConfigFile = serde_yaml::from_str(content)?;

        let env_config = match environment {
            "production" => config_file.production,
            _ => config_file.local,
        };

        Ok(Self {
            environment: environment.to_string(),
            server: env_config.server.unwrap_or_default(),
            crawler: env_config.crawler.unwrap_or_default(),
        })
    }

    /// Environment variables win over file values.
    pub fn apply_overrides<F>(&mut self, var: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = var("CRAWLER_API_URL") {
            self.crawler.base_url = url;
        }

        if let Some(key) = var("CRAWLER_API_KEY").or_else(|| var("EXASEARCH_API_KEY")) {
            self.crawler.api_key = Some(key);
        }

        if let Some(timeout) = var("CRAWLER_TIMEOUT_SECS") {
            self.crawler.timeout_seconds = timeout
                .parse()
                .context("CRAWLER_TIMEOUT_SECS must be a number of seconds")?;
        }

        if let Some(port) = var("ROCKET_PORT") {
            self.server.port = port
                .parse()
                .context("ROCKET_PORT must be a valid port number")?;
        }

        Ok(())
    }
}
