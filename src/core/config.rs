use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Name used in report headings
    #[serde(default = "default_provider_name")]
    pub provider_name: String,
    /// Root of the YYYY/MM tree
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Environment variable holding the API token
    #[serde(default = "default_token_env")]
    pub token_env: String,
    /// Exit non-zero when the fetch fails (the error is still recorded)
    #[serde(default)]
    pub fail_on_error: bool,
}

fn default_provider_name() -> String {
    "DigitalOcean".to_string()
}
fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_token_env() -> String {
    "DO_TOKEN".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            provider_name: default_provider_name(),
            output_dir: default_output_dir(),
            token_env: default_token_env(),
            fail_on_error: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Upper bound on billing history pages followed per run
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_base_url() -> String {
    "https://api.digitalocean.com".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_max_pages() -> u32 {
    10
}
fn default_per_page() -> u32 {
    200
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            max_pages: default_max_pages(),
            per_page: default_per_page(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub api: ApiConfig,
}

impl AppConfig {
    /// Get the config file path: DOCOST_CONFIG if set, else under XDG_CONFIG_HOME
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("DOCOST_CONFIG") {
            return PathBuf::from(path);
        }
        let config_dir = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("~"))
                    .join(".config")
            });
        config_dir.join("docost").join("config.toml")
    }

    /// Load config from the default path, falling back to defaults if not found
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        let config: AppConfig = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Serialize and write this config to the config file path.
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// Validate the config
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if self.settings.provider_name.trim().is_empty() {
            issues.push("provider_name must not be empty".to_string());
        }
        if self.settings.token_env.trim().is_empty() {
            issues.push("token_env must not be empty".to_string());
        }
        if crate::core::providers::fetch::validate_endpoint(&self.api.base_url).is_err() {
            issues.push(format!(
                "Invalid base_url: '{}' (must use https://)",
                self.api.base_url
            ));
        }
        if self.api.timeout_secs == 0 {
            issues.push("timeout_secs must be greater than 0".to_string());
        }
        if self.api.max_pages == 0 {
            issues.push("max_pages must be greater than 0".to_string());
        }
        if !(1..=200).contains(&self.api.per_page) {
            issues.push(format!(
                "Invalid per_page: {} (must be between 1 and 200)",
                self.api.per_page
            ));
        }
        issues
    }
}
