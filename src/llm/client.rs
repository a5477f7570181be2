//! TextGenerator trait definition

use async_trait::async_trait;

use super::LlmError;

/// Single-prompt text generation.
///
/// Each call is independent: the caller renders the whole context into the
/// prompt and gets free text back.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}
