use thiserror::Error;

/// Failures of the text generation service
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API key not set: export {env_var} or configure llm.api_key")]
    MissingApiKey { env_var: String },

    #[error("Unknown LLM provider: '{0}'. Supported: gemini, openai")]
    UnknownProvider(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest_middleware::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// The response parsed but carried no text in any known field
    #[error("Response contained no text: {0}")]
    EmptyResponse(String),
}
