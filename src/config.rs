//! Configuration loading from TOML with environment variable resolution.
//!
//! Reads an optional `config.toml` and deserializes it into strongly-typed
//! structs. Every key has a default, so a missing file is not an error.
//! The API key is referenced by env-var name in the config and resolved
//! once at startup; a missing or blank key fails the boot.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::types::Variant;

/// Default config file path, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
const DEFAULT_API_KEY_ENV: &str = "GROQ_API_KEY";
const DEFAULT_TEMPERATURE: f32 = 0.2;
const DEFAULT_MAX_TOKENS: u32 = 350;
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Boot-time configuration failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid port in PORT environment variable: {0}")]
    InvalidPort(String),

    #[error("API key environment variable {0} is not set or empty")]
    MissingApiKey(String),
}

/// Top-level application configuration, as read from TOML.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub provider: ProviderConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    pub variant: Variant,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            variant: Variant::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,
    pub model: String,
    pub api_key_env: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file, falling back to defaults when
    /// the file does not exist.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        if !Path::new(path).exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Apply a `PORT` override, as read from the environment.
    pub fn with_port_override(mut self, port: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(raw) = port {
            self.server.port = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw.to_string()))?;
        }
        Ok(self)
    }

    /// Resolve the provider API key from the env var named in the config.
    pub fn resolve_api_key(&self) -> Result<SecretString, ConfigError> {
        let value = std::env::var(&self.provider.api_key_env).ok();
        Self::validate_api_key(&self.provider.api_key_env, value)
    }

    /// Reject absent or blank keys.
    pub fn validate_api_key(
        env_name: &str,
        value: Option<String>,
    ) -> Result<SecretString, ConfigError> {
        let key = SecretString::new(value.unwrap_or_default());
        if key.expose_secret().trim().is_empty() {
            return Err(ConfigError::MissingApiKey(env_name.to_string()));
        }
        Ok(key)
    }
}
