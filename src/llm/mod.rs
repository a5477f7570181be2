//! Text generation gateway
//!
//! A single narrow seam, [`TextGenerator`], separates the workflow from the
//! provider-specific request and response shapes.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, RequestBuilder};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde_json::Value;
use tracing::debug;

mod client;
mod error;
mod gemini;
mod openai;

#[cfg(test)]
pub use client::mock;
pub use client::TextGenerator;
pub use error::LlmError;
pub use gemini::GeminiClient;
pub use openai::OpenAIClient;

use crate::config::{LlmConfig, PROVIDER_GEMINI, PROVIDER_OPENAI};

/// Create a text generator for the provider named in config
pub fn create_generator(config: &LlmConfig) -> Result<Arc<dyn TextGenerator>, LlmError> {
    debug!(provider = %config.provider, model = %config.model, "create_generator: called");
    match config.provider.as_str() {
        PROVIDER_GEMINI => Ok(Arc::new(GeminiClient::from_config(config)?)),
        PROVIDER_OPENAI => Ok(Arc::new(OpenAIClient::from_config(config)?)),
        other => Err(LlmError::UnknownProvider(other.to_string())),
    }
}

/// Inline key first, then the configured environment variable
fn resolve_api_key(config: &LlmConfig) -> Result<String, LlmError> {
    config
        .api_key
        .clone()
        .or_else(|| std::env::var(&config.api_key_env).ok())
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| LlmError::MissingApiKey {
            env_var: config.api_key_env.clone(),
        })
}

/// HTTP client with timeout and transient-failure retries (408, 429, 5xx, connect errors)
fn build_http(config: &LlmConfig) -> Result<ClientWithMiddleware, LlmError> {
    let inner = reqwest::Client::builder()
        .timeout(Duration::from_secs(u64::from(config.timeout_seconds)))
        .build()?;
    let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
    Ok(ClientBuilder::new(inner)
        .with(RetryTransientMiddleware::new_with_policy(retry_policy))
        .build())
}

/// Send a JSON body and return the parsed JSON reply, mapping non-2xx to `LlmError::Api`
async fn post_json(request: RequestBuilder, body: &Value) -> Result<Value, LlmError> {
    let response = request
        .header(CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        debug!(status = status.as_u16(), "post_json: API error");
        return Err(LlmError::Api {
            status: status.as_u16(),
            message,
        });
    }

    Ok(response.json::<Value>().await?)
}

/// Short description of an unexpected response body for error messages
fn describe_body(body: &Value) -> String {
    let text = body.to_string();
    if text.chars().count() > 200 {
        format!("{}...", text.chars().take(200).collect::<String>())
    } else {
        text
    }
}
