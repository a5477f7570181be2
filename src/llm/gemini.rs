//! Google Gemini `generateContent` client

use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use serde_json::{Value, json};
use tracing::{debug, instrument};

use super::{LlmError, TextGenerator, build_http, describe_body, post_json, resolve_api_key};
use crate::config::LlmConfig;

pub struct GeminiClient {
    http: ClientWithMiddleware,
    base_url: String,
    model: String,
    api_key: String,
    temperature: f32,
}

impl GeminiClient {
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        Ok(Self {
            http: build_http(config)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: resolve_api_key(config)?,
            temperature: config.temperature,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    fn request_body(&self, prompt: &str) -> Value {
        json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": { "temperature": self.temperature }
        })
    }
}

/// Text from `candidates[0].content.parts[*].text`, else a top-level `text` field
pub(crate) fn extract_text(body: &Value) -> Result<String, LlmError> {
    let primary = body
        .pointer("/candidates/0/content/parts")
        .and_then(Value::as_array)
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part.get("text").and_then(Value::as_str))
                .collect::<String>()
        })
        .filter(|text| !text.is_empty());

    if let Some(text) = primary {
        return Ok(text);
    }

    if let Some(text) = body.get("text").and_then(Value::as_str) {
        debug!("extract_text: using fallback text field");
        return Ok(text.to_string());
    }

    if let Some(reason) = body
        .pointer("/promptFeedback/blockReason")
        .and_then(Value::as_str)
    {
        return Err(LlmError::EmptyResponse(format!("prompt blocked: {reason}")));
    }

    Err(LlmError::EmptyResponse(describe_body(body)))
}

#[async_trait]
impl TextGenerator for GeminiClient {
    #[instrument(name = "gemini_generate", level = "debug", skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let request = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key);
        let body = post_json(request, &self.request_body(prompt)).await?;
        extract_text(&body)
    }
}
