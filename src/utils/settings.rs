//! Settings and configuration utilities.
//!
//! Settings come from an optional JSON file, by default
//! `$HOME/.commit-analyzer/config.json`. Environment variables always take
//! precedence over the file, and the file's `env` map is consulted as a
//! fallback for them.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

use crate::ai::augmenter::DEFAULT_TIMEOUT;
use crate::ai::openai::{
    DEFAULT_BASE_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
};
use crate::ai::{AiAugmenter, Augmenter, DisabledAugmenter, OpenAiAiClient};
use crate::analysis::cache::DEFAULT_CAPACITY;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_VAR: &str = "COMMIT_ANALYZER_CONFIG";

/// Default bind address.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8001;

/// Settings loaded from the config file.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    /// Environment variable fallbacks.
    #[serde(default)]
    pub env: HashMap<String, String>,
    /// Model used for commentary.
    #[serde(default)]
    pub openai_model: Option<String>,
    /// Base URL of the OpenAI-compatible API.
    #[serde(default)]
    pub openai_base_url: Option<String>,
    /// Response token budget.
    #[serde(default)]
    pub max_tokens: Option<u32>,
    /// Sampling temperature.
    #[serde(default)]
    pub temperature: Option<f32>,
    /// Maximum number of cached analyses.
    #[serde(default)]
    pub cache_capacity: Option<usize>,
    /// Deadline for one commentary request, in seconds.
    #[serde(default)]
    pub augmentation_timeout_secs: Option<u64>,
    /// Bind address for `serve`.
    #[serde(default)]
    pub host: Option<String>,
    /// Listen port for `serve`.
    #[serde(default)]
    pub port: Option<u16>,
    /// File the settings were read from, if any.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Settings {
    /// Loads settings from `explicit`, `$COMMIT_ANALYZER_CONFIG`, or the
    /// default location, in that order.
    ///
    /// An explicitly named file must exist; the default one may be absent.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        let named = explicit
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(CONFIG_PATH_VAR).map(PathBuf::from));

        match named {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Config file not found: {}", path.display());
                }
                Self::load_from_path(&path)
            }
            None => Self::load(),
        }
    }

    /// Loads settings from the default location.
    pub fn load() -> Result<Self> {
        let settings_path = Self::get_settings_path()?;
        Self::load_from_path(&settings_path)
    }

    /// Loads settings from a specific path.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist, return default settings
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut settings = serde_json::from_str::<Self>(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        settings.source = Some(path.to_path_buf());
        info!(path = %path.display(), "Loaded config file");
        Ok(settings)
    }

    /// Returns the default settings path.
    pub fn get_settings_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().context("Failed to determine home directory")?;

        Ok(home_dir.join(".commit-analyzer").join("config.json"))
    }

    /// Whether a config file was read.
    pub fn config_loaded(&self) -> bool {
        self.source.is_some()
    }

    /// Returns an environment variable with fallback to settings.
    pub fn get_env_var(&self, key: &str) -> Option<String> {
        match env::var(key) {
            Ok(value) => Some(value),
            Err(_) => self.env.get(key).cloned(),
        }
    }

    /// API key for the text-generation service.
    pub fn api_key(&self) -> Option<String> {
        self.get_env_var("OPENAI_API_KEY")
            .filter(|key| !key.trim().is_empty())
    }

    /// Model used for commentary.
    pub fn model(&self) -> String {
        self.get_env_var("OPENAI_MODEL")
            .or_else(|| self.openai_model.clone())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string())
    }

    /// Base URL of the OpenAI-compatible API.
    pub fn base_url(&self) -> String {
        self.get_env_var("OPENAI_BASE_URL")
            .or_else(|| self.openai_base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    /// Bind address for the server.
    pub fn host(&self) -> String {
        self.get_env_var("COMMIT_ANALYZER_HOST")
            .or_else(|| self.host.clone())
            .unwrap_or_else(|| DEFAULT_HOST.to_string())
    }

    /// Listen port for the server.
    pub fn port(&self) -> Result<u16> {
        match self.get_env_var("COMMIT_ANALYZER_PORT") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("Invalid COMMIT_ANALYZER_PORT: {raw}")),
            None => Ok(self.port.unwrap_or(DEFAULT_PORT)),
        }
    }

    /// Maximum number of cached analyses.
    pub fn cache_capacity(&self) -> usize {
        self.cache_capacity.unwrap_or(DEFAULT_CAPACITY)
    }

    /// Deadline for one commentary request.
    pub fn augmentation_timeout(&self) -> Duration {
        self.augmentation_timeout_secs
            .map_or(DEFAULT_TIMEOUT, Duration::from_secs)
    }

    /// Builds the commentary source: AI-backed when an API key is available,
    /// disabled otherwise.
    pub fn build_augmenter(&self) -> Result<Arc<dyn Augmenter>> {
        let Some(api_key) = self.api_key() else {
            info!("No OpenAI API key configured, AI insights disabled");
            return Ok(Arc::new(DisabledAugmenter));
        };

        let client = OpenAiAiClient::new(
            self.model(),
            Some(api_key),
            self.base_url(),
            self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            self.temperature.unwrap_or(DEFAULT_TEMPERATURE),
        )
        .context("Failed to create AI client")?;
        info!(model = %self.model(), "AI insights enabled");

        Ok(Arc::new(AiAugmenter::new(
            Box::new(client),
            self.augmentation_timeout(),
        )))
    }
}
