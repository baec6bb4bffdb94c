use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use counsel_api::{ClientConfig, DEFAULT_BASE_URL};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_retries")]
    pub retries: u32,

    /// Overrides the token file location (defaults to the user cache dir).
    #[serde(default)]
    pub token_path: Option<PathBuf>,

    /// Overrides where log files go (defaults to `<config dir>/counsel/logs`).
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

fn default_api_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_retries() -> u32 {
    0
}

/// `COUNSEL_API_URL`, `COUNSEL_TIMEOUT_SECS`, ... map onto top-level keys.
fn environment() -> Environment {
    Environment::with_prefix("COUNSEL")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

impl Settings {
    /// Reads `counsel.toml` (or `$COUNSEL_CONFIG`) and `COUNSEL_*` env vars,
    /// e.g. `COUNSEL_API_URL`.
    pub fn new() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("COUNSEL_CONFIG").unwrap_or_else(|_| "counsel.toml".to_string());

        Self::load(
            Config::builder()
                .add_source(File::with_name(&config_path).required(false))
                .add_source(environment()),
        )
    }

    fn load(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.api_url.is_empty() {
            return Err("api_url is required".to_string());
        }
        if !self.api_url.starts_with("http") {
            return Err("api_url must be a valid HTTP(S) URL".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than zero".to_string());
        }
        Ok(())
    }

    /// Directory for log files, falling back to the user config dir.
    pub fn log_dir(&self) -> Result<PathBuf, ConfigError> {
        if let Some(dir) = &self.log_dir {
            return Ok(dir.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join("counsel").join("logs"))
            .ok_or_else(|| ConfigError::Message("Could not find config directory".to_string()))
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.api_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            retries: self.retries,
        }
    }
}
