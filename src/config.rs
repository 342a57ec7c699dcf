//! Application configuration
//!
//! Loaded from the embedded defaults, optional files and `CONCIERGE_*`
//! environment variables. API keys are never read from here.

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Embedded default configuration (compiled into binary)
pub const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// City the concierge serves
    pub city: String,
    /// City guide: a PDF or a text/markdown export
    pub guide_path: PathBuf,
    /// Passages returned per guide lookup
    pub guide_passages: usize,
    pub llm: LlmConfig,
    pub search: SearchSettings,
}

/// Reasoning engine settings
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
    pub max_iterations: usize,
    /// Unset leaves the model's default
    #[serde(default)]
    pub temperature: Option<f32>,
}

impl LlmConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Web search backend settings
#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    pub base_url: String,
    pub engine: String,
    pub timeout_secs: u64,
}

impl SearchSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Load configuration from files and environment
pub fn load_config() -> Result<AppConfig> {
    let config = Config::builder()
        // 1. Embedded defaults (always available)
        .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
        // 2. External overrides (optional)
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name("config/local").required(false))
        // 3. Environment variables (highest priority), e.g. CONCIERGE_LLM__MODEL
        .add_source(
            Environment::with_prefix("CONCIERGE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    config
        .try_deserialize()
        .context("Failed to deserialize configuration")
}
