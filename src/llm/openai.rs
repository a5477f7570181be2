//! OpenAI-compatible Chat Completions client

use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use serde_json::{Value, json};
use tracing::{debug, instrument};

use super::{LlmError, TextGenerator, build_http, describe_body, post_json, resolve_api_key};
use crate::config::LlmConfig;

pub struct OpenAIClient {
    http: ClientWithMiddleware,
    base_url: String,
    model: String,
    api_key: String,
    temperature: f32,
}

impl OpenAIClient {
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        Ok(Self {
            http: build_http(config)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: resolve_api_key(config)?,
            temperature: config.temperature,
        })
    }

    fn request_body(&self, prompt: &str) -> Value {
        json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
            "temperature": self.temperature,
        })
    }
}

/// Text from `choices[0].message.content`, else the legacy `choices[0].text`
pub(crate) fn extract_text(body: &Value) -> Result<String, LlmError> {
    if let Some(text) = body
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
    {
        return Ok(text.to_string());
    }

    if let Some(text) = body.pointer("/choices/0/text").and_then(Value::as_str) {
        debug!("extract_text: using legacy completion text");
        return Ok(text.to_string());
    }

    Err(LlmError::EmptyResponse(describe_body(body)))
}

#[async_trait]
impl TextGenerator for OpenAIClient {
    #[instrument(name = "openai_generate", level = "debug", skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let request = self.http.post(url).bearer_auth(&self.api_key);
        let body = post_json(request, &self.request_body(prompt)).await?;
        extract_text(&body)
    }
}
