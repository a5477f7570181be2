//! Error types and handling for the travel planner

use thiserror::Error;

use crate::llm::LlmError;

/// Main error type for the travel planner
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Text generation service errors
    #[error("LLM error: {source}")]
    Llm {
        #[from]
        source: LlmError,
    },

    /// Destination or weather fixture errors
    #[error("Catalog error: {message}")]
    Catalog { message: String },

    /// Prompt template errors
    #[error("Template error: {message}")]
    Template { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl PlannerError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new catalog error
    pub fn catalog<S: Into<String>>(message: S) -> Self {
        Self::Catalog {
            message: message.into(),
        }
    }

    /// Create a new template error
    pub fn template<S: Into<String>>(message: S) -> Self {
        Self::Template {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            PlannerError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            PlannerError::Llm { source } => match source {
                LlmError::MissingApiKey { env_var } => {
                    format!("No API key found. Set the {env_var} environment variable.")
                }
                _ => "Unable to reach the planning service. Please check your internet connection."
                    .to_string(),
            },
            PlannerError::Catalog { .. } => {
                "Destination data could not be read. Built-in destinations will be used.".to_string()
            }
            PlannerError::Template { .. } => "Internal prompt error.".to_string(),
            PlannerError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            PlannerError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            PlannerError::General { message } => message.clone(),
        }
    }
}
