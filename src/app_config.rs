use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::language_utils::is_known_language;
use crate::translation::retry::BackoffPolicy;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings. Values come from a JSON
/// config file with per-field defaults; a handful of environment variables
/// override the file for deployment convenience.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// HTTP server binding
    #[serde(default)]
    pub server: ServerConfig,

    /// Source language code or name (e.g. "ar", "Arabic")
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language code or name (e.g. "en", "English")
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// HTTP server configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// Socket address string for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Completion-API translation configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Model name (e.g. "gpt-4o-mini")
    #[serde(default = "default_model")]
    pub model: String,

    /// API key for the service
    #[serde(default = "String::new")]
    pub api_key: String,

    /// API base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Maximum number of concurrent batch requests
    #[serde(default = "default_concurrent_requests")]
    pub concurrent_requests: usize,

    /// Maximum transcription characters per request
    #[serde(default = "default_max_chars_per_request")]
    pub max_chars_per_request: usize,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Sampling temperature; low values favor literal translation
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Retry backoff settings
    #[serde(default)]
    pub backoff: BackoffConfig,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_key: String::new(),
            endpoint: default_endpoint(),
            concurrent_requests: default_concurrent_requests(),
            max_chars_per_request: default_max_chars_per_request(),
            timeout_secs: default_timeout_secs(),
            temperature: default_temperature(),
            backoff: BackoffConfig::default(),
        }
    }
}

/// Exponential backoff settings for retried requests
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BackoffConfig {
    /// Delay before the first retry, in milliseconds
    #[serde(default = "default_backoff_initial_ms")]
    pub initial_interval_ms: u64,

    /// Growth factor between retries
    #[serde(default = "default_backoff_multiplier")]
    pub multiplier: f64,

    /// Cap on a single delay, in milliseconds
    #[serde(default = "default_backoff_max_interval_ms")]
    pub max_interval_ms: u64,

    /// Total retry budget, in milliseconds
    #[serde(default = "default_backoff_max_elapsed_ms")]
    pub max_elapsed_ms: u64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            initial_interval_ms: default_backoff_initial_ms(),
            multiplier: default_backoff_multiplier(),
            max_interval_ms: default_backoff_max_interval_ms(),
            max_elapsed_ms: default_backoff_max_elapsed_ms(),
        }
    }
}

impl TranslationConfig {
    /// Build the runtime backoff policy from the configured settings
    pub fn backoff_policy(&self) -> BackoffPolicy {
        BackoffPolicy {
            initial_interval: Duration::from_millis(self.backoff.initial_interval_ms),
            multiplier: self.backoff.multiplier,
            max_interval: Duration::from_millis(self.backoff.max_interval_ms),
            max_elapsed: Duration::from_millis(self.backoff.max_elapsed_ms),
            ..BackoffPolicy::default()
        }
    }

    /// Validate structural settings; warnings for soft problems
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.endpoint)
            .map_err(|e| anyhow!("Invalid API endpoint '{}': {}", self.endpoint, e))?;

        if self.max_chars_per_request == 0 {
            return Err(anyhow!("max_chars_per_request must be at least 1"));
        }

        if self.concurrent_requests == 0 {
            return Err(anyhow!("concurrent_requests must be at least 1"));
        }

        if self.api_key.is_empty() {
            warn!("API key is empty; requests to the completion API will be rejected");
        }

        Ok(())
    }
}

/// Log level for the application
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Error level
    Error,
    /// Warn level
    Warn,
    /// Info level (default)
    #[default]
    Info,
    /// Debug level
    Debug,
    /// Trace level
    Trace,
}

impl LogLevel {
    /// Convert to the log crate's level filter
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            source_language: default_source_language(),
            target_language: default_target_language(),
            translation: TranslationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).with_context(|| {
            format!("Failed to read config file: {}", path.as_ref().display())
        })?;
        let config: Self =
            serde_json::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Load configuration, writing a default config file first if none exists
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        if !path.as_ref().exists() {
            let config = Self::default();
            config.save(path.as_ref())?;
            return Ok(config);
        }
        Self::from_file(path)
    }

    /// Save configuration to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path.as_ref(), json).with_context(|| {
            format!("Failed to write config file: {}", path.as_ref().display())
        })?;
        Ok(())
    }

    /// Apply environment variable overrides on top of the file values.
    ///
    /// `OPENAI_API_KEY`, `OPENAI_MODEL_NAME`, `OPENAI_API_URL` and `PORT`
    /// take precedence over the config file when set.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(api_key) = std::env::var("OPENAI_API_KEY") {
            if !api_key.is_empty() {
                self.translation.api_key = api_key;
            }
        }
        if let Ok(model) = std::env::var("OPENAI_MODEL_NAME") {
            if !model.is_empty() {
                self.translation.model = model;
            }
        }
        if let Ok(endpoint) = std::env::var("OPENAI_API_URL") {
            if !endpoint.is_empty() {
                self.translation.endpoint = endpoint;
            }
        }
        if let Ok(port) = std::env::var("PORT") {
            match port.parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(_) => warn!("Ignoring invalid PORT value: {}", port),
            }
        }
    }

    /// Validate the full configuration
    pub fn validate(&self) -> Result<()> {
        self.translation.validate()?;

        if !is_known_language(&self.source_language) {
            warn!("Unrecognized source language '{}'; it will be used verbatim in prompts", self.source_language);
        }
        if !is_known_language(&self.target_language) {
            warn!("Unrecognized target language '{}'; it will be used verbatim in prompts", self.target_language);
        }

        Ok(())
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    9000
}

fn default_source_language() -> String {
    "ar".to_string()
}

fn default_target_language() -> String {
    "en".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_concurrent_requests() -> usize {
    4
}

// Sized for ~5 minutes of talk per transcription: ~770 words at up to two
// tokens per word is ~1540 tokens, ~6160 characters, plus ~1% overhead for
// the properties carried alongside the sentences.
fn default_max_chars_per_request() -> usize {
    6300
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_temperature() -> f32 {
    0.3
}

fn default_backoff_initial_ms() -> u64 {
    500
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_backoff_max_interval_ms() -> u64 {
    5_000
}

fn default_backoff_max_elapsed_ms() -> u64 {
    30_000
}
