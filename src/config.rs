//! Configuration management for the travel planner
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::PlannerError;
use ::config::{Config, Environment, File};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the travel planner
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TravelPlannerConfig {
    /// Text generation service configuration
    #[serde(default)]
    pub llm: LlmConfig,
    /// Fixture data locations
    #[serde(default)]
    pub data: DataConfig,
    /// Conversation and ranking settings
    #[serde(default)]
    pub planner: PlannerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Text generation service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Provider name (gemini or openai)
    #[serde(default = "default_llm_provider")]
    pub provider: String,
    /// Model identifier; empty means the provider default
    #[serde(default)]
    pub model: String,
    /// Base URL of the service; empty means the provider default
    #[serde(default)]
    pub base_url: String,
    /// Inline API key, takes precedence over `api_key_env`
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable holding the API key; empty means the provider default
    #[serde(default)]
    pub api_key_env: String,
    /// Request timeout in seconds
    #[serde(default = "default_llm_timeout")]
    pub timeout_seconds: u32,
    /// Maximum number of retries for transient failures
    #[serde(default = "default_llm_max_retries")]
    pub max_retries: u32,
    /// Sampling temperature
    #[serde(default = "default_llm_temperature")]
    pub temperature: f32,
}

/// Fixture data settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataConfig {
    /// JSON file with destination records; the built-in set is used when absent
    #[serde(default)]
    pub destinations_path: Option<PathBuf>,
}

/// Conversation and ranking settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Number of ranked destinations kept per turn
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// Trip length used when the traveller never states one
    #[serde(default = "default_duration_days")]
    pub default_duration_days: u32,
    /// Word that ends the interactive session
    #[serde(default = "default_exit_keyword")]
    pub exit_keyword: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

pub const PROVIDER_GEMINI: &str = "gemini";
pub const PROVIDER_OPENAI: &str = "openai";

// Default value functions
fn default_llm_provider() -> String {
    PROVIDER_GEMINI.to_string()
}

fn default_llm_timeout() -> u32 {
    60
}

fn default_llm_max_retries() -> u32 {
    2
}

fn default_llm_temperature() -> f32 {
    0.7
}

fn default_top_k() -> usize {
    5
}

fn default_duration_days() -> u32 {
    7
}

fn default_exit_keyword() -> String {
    "exit".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LlmConfig {
    fn default() -> Self {
        let mut llm = Self {
            provider: default_llm_provider(),
            model: String::new(),
            base_url: String::new(),
            api_key: None,
            api_key_env: String::new(),
            timeout_seconds: default_llm_timeout(),
            max_retries: default_llm_max_retries(),
            temperature: default_llm_temperature(),
        };
        llm.apply_provider_defaults();
        llm
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            default_duration_days: default_duration_days(),
            exit_keyword: default_exit_keyword(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LlmConfig {
    /// Fill model, base URL and key variable from the provider when left empty
    pub fn apply_provider_defaults(&mut self) {
        let (base_url, model, key_env) = match self.provider.as_str() {
            PROVIDER_OPENAI => ("https://api.openai.com", "gpt-4o-mini", "OPENAI_API_KEY"),
            _ => (
                "https://generativelanguage.googleapis.com",
                "gemini-1.5-pro",
                "GOOGLE_API_KEY",
            ),
        };
        if self.base_url.is_empty() {
            self.base_url = base_url.to_string();
        }
        if self.model.is_empty() {
            self.model = model.to_string();
        }
        if self.api_key_env.is_empty() {
            self.api_key_env = key_env.to_string();
        }
    }
}

impl TravelPlannerConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let explicit = config_path.is_some();
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if explicit && !config_file.exists() {
            return Err(PlannerError::config(format!(
                "Config file not found: {}",
                config_file.display()
            ))
            .into());
        }

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(::config::FileFormat::Toml),
            );
        }

        // Environment overrides, e.g. TRAVELPLANNER_LLM__PROVIDER=openai
        builder = builder.add_source(
            Environment::with_prefix("TRAVELPLANNER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: TravelPlannerConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        // Apply defaults for missing values
        config.apply_defaults();

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("travelplanner").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.llm.provider.is_empty() {
            self.llm.provider = default_llm_provider();
        }
        self.llm.provider = self.llm.provider.to_lowercase();
        self.llm.apply_provider_defaults();
        if self.llm.timeout_seconds == 0 {
            self.llm.timeout_seconds = default_llm_timeout();
        }
        if self.planner.top_k == 0 {
            self.planner.top_k = default_top_k();
        }
        if self.planner.default_duration_days == 0 {
            self.planner.default_duration_days = default_duration_days();
        }
        if self.planner.exit_keyword.trim().is_empty() {
            self.planner.exit_keyword = default_exit_keyword();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate inline API keys
    pub fn validate_api_keys(&self) -> Result<()> {
        if let Some(api_key) = &self.llm.api_key {
            if api_key.is_empty() {
                return Err(PlannerError::config(
                    "LLM API key cannot be empty if provided. Either remove it or provide a valid key.",
                )
                .into());
            }

            if api_key.len() < 8 {
                return Err(PlannerError::config(
                    "LLM API key appears to be invalid (too short). Please check your API key.",
                )
                .into());
            }
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.llm.timeout_seconds > 600 {
            return Err(PlannerError::config("LLM timeout cannot exceed 600 seconds").into());
        }

        if self.llm.max_retries > 10 {
            return Err(PlannerError::config("LLM max retries cannot exceed 10").into());
        }

        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(PlannerError::config("LLM temperature must be between 0.0 and 2.0").into());
        }

        if self.planner.top_k > 50 {
            return Err(PlannerError::config("Ranking size cannot exceed 50 destinations").into());
        }

        if self.planner.default_duration_days > 365 {
            return Err(PlannerError::config("Default trip duration cannot exceed 365 days").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_providers = [PROVIDER_GEMINI, PROVIDER_OPENAI];
        if !valid_providers.contains(&self.llm.provider.as_str()) {
            return Err(PlannerError::config(format!(
                "Invalid LLM provider '{}'. Must be one of: {}",
                self.llm.provider,
                valid_providers.join(", ")
            ))
            .into());
        }

        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(PlannerError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(PlannerError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.llm.base_url.starts_with("http://") && !self.llm.base_url.starts_with("https://")
        {
            return Err(
                PlannerError::config("LLM base URL must be a valid HTTP or HTTPS URL").into(),
            );
        }

        Ok(())
    }
}
