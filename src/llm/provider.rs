use async_trait::async_trait;
use crate::errors::SonarchatError;
use super::types::LLMResponse;

#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Free-form text completion
    async fn complete(&self, prompt: &str) -> Result<LLMResponse, SonarchatError>;

    /// Provider name for logging
    fn provider_name(&self) -> &str;

    /// Model identifier
    fn model_name(&self) -> &str;
}
