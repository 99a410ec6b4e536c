//! Runtime configuration
//!
//! Ambient knobs only: logging behavior and report defaults. Everything
//! semantic (filters, top-N, the log path) stays on the CLI. Values come
//! from, in order of precedence:
//!
//! 1. Environment variables (`TRAFFIC_*`)
//! 2. An optional TOML file named by `TRAFFIC_CONFIG`
//! 3. Built-in defaults

use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::warn;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing filter when RUST_LOG is unset.
    pub level: String,
    /// "pretty" or "json".
    pub format: String,
    /// "console", "file" or "both".
    pub output: String,
    pub directory: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "pretty".to_string(),
            output: "console".to_string(),
            directory: env::temp_dir().join("traffic-analyzer"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Length of the top-URLs report section.
    pub top_urls: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { top_urls: 5 }
    }
}

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Global configuration, loaded on first access.
pub fn get_config() -> &'static Config {
    CONFIG.get_or_init(Config::load)
}

impl Config {
    fn load() -> Self {
        let mut config = Self::from_file().unwrap_or_default();
        config.apply_env_overrides();
        config
    }

    fn from_file() -> Option<Self> {
        let path = env::var("TRAFFIC_CONFIG").map(PathBuf::from).ok()?;
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not read config file");
                return None;
            }
        };
        match toml::from_str(&raw) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not parse config file");
                None
            }
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("TRAFFIC_LOG_LEVEL") {
            self.logging.level = value;
        }
        if let Ok(value) = env::var("TRAFFIC_LOG_FORMAT") {
            self.logging.format = value;
        }
        if let Ok(value) = env::var("TRAFFIC_LOG_OUTPUT") {
            self.logging.output = value;
        }
        if let Ok(value) = env::var("TRAFFIC_LOG_DIR") {
            self.logging.directory = PathBuf::from(value);
        }
        if let Ok(value) = env::var("TRAFFIC_TOP_URLS") {
            match value.parse() {
                Ok(n) => self.output.top_urls = n,
                Err(_) => warn!(%value, "ignoring non-numeric TRAFFIC_TOP_URLS"),
            }
        }
    }
}
