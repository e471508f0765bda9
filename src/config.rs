use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the conversation fetch API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token for the API.
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://slack.com/api/".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub backtrace: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            backtrace: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Messages requested per API page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Hard cap on pages per fetch; batches stay bounded.
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
}

fn default_page_size() -> u32 {
    200
}

fn default_max_pages() -> u32 {
    10
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            max_pages: default_max_pages(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from the default config file paths, falling back
    /// to built-in defaults when no file exists.
    pub fn load() -> crate::Result<Self> {
        if Path::new("config.toml").exists() {
            Self::from_file("config.toml")
        } else if Path::new("config.example.toml").exists() {
            eprintln!(
                "Warning: Using config.example.toml. Please create config.toml for production use."
            );
            Self::from_file("config.example.toml")
        } else {
            Ok(Self::default())
        }
    }
}
