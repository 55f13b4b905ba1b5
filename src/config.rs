//! Configuration management for Hey
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from an optional YAML file with serde-supplied defaults.
//! Every field has a default so a missing or partial file is fine; a
//! malformed file is a hard error.

use crate::error::{HeyError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for Hey
///
/// Holds the completion provider settings, UI tuning knobs, and the
/// optional history file location.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Completion provider configuration
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Interactive UI configuration
    #[serde(default)]
    pub ui: UiConfig,

    /// History storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Completion provider configuration
///
/// Points at any OpenAI-compatible chat completions endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the completion API
    ///
    /// The `/chat/completions` path is appended to this base. Overriding it
    /// allows tests and local servers to stand in for the real API.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Model identifier sent with every completion request
    #[serde(default = "default_model")]
    pub model: String,

    /// Name of the environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            model: default_model(),
            api_key_env: default_api_key_env(),
        }
    }
}

/// Interactive UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Conversations shown per page in the browser
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Minutes within which a bare prompt silently continues the latest chat
    #[serde(default = "default_recent_window_minutes")]
    pub recent_window_minutes: i64,

    /// Markdown renderer binary piped through for message bodies
    #[serde(default = "default_glow_bin")]
    pub glow_bin: String,

    /// Style argument passed to the markdown renderer
    #[serde(default = "default_glow_style")]
    pub glow_style: String,
}

fn default_page_size() -> usize {
    10
}

fn default_recent_window_minutes() -> i64 {
    5
}

fn default_glow_bin() -> String {
    "glow".to_string()
}

fn default_glow_style() -> String {
    "dark".to_string()
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            recent_window_minutes: default_recent_window_minutes(),
            glow_bin: default_glow_bin(),
            glow_style: default_glow_style(),
        }
    }
}

/// History storage configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Explicit path to the history JSON document
    ///
    /// When unset the platform data directory is used. The
    /// `HEY_HISTORY_PATH` environment variable overrides both.
    #[serde(default)]
    pub history_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from an optional file path
    ///
    /// An explicit path must exist and parse; with no explicit path the
    /// default location is consulted and silently skipped when absent.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(explicit) => {
                let contents = std::fs::read_to_string(explicit).map_err(|e| {
                    HeyError::Config(format!(
                        "failed to read {}: {}",
                        explicit.display(),
                        e
                    ))
                })?;
                Self::parse(&contents)
            }
            None => match Self::default_path() {
                Some(candidate) if candidate.exists() => {
                    let contents = std::fs::read_to_string(&candidate)?;
                    Self::parse(&contents)
                }
                _ => Ok(Self::default()),
            },
        }
    }

    /// Parse a YAML configuration document
    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(contents)
            .map_err(|e| HeyError::Config(format!("invalid configuration: {}", e)))?;
        Ok(config)
    }

    /// Default configuration file location in the platform config directory
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("nz", "hey", "hey")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Validate the configuration
    ///
    /// # Returns
    ///
    /// Returns an error describing the first invalid field found.
    pub fn validate(&self) -> Result<()> {
        if self.provider.api_base.trim().is_empty() {
            return Err(HeyError::Config("provider.api_base must not be empty".into()).into());
        }
        if self.provider.model.trim().is_empty() {
            return Err(HeyError::Config("provider.model must not be empty".into()).into());
        }
        if self.ui.page_size == 0 {
            return Err(HeyError::Config("ui.page_size must be at least 1".into()).into());
        }
        if self.ui.recent_window_minutes < 0 {
            return Err(
                HeyError::Config("ui.recent_window_minutes must not be negative".into()).into(),
            );
        }
        Ok(())
    }
}
