use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use crate::config::credentials::redact_credentials;
use crate::errors::SonarchatError;
use super::provider::LLMProvider;
use super::types::{LLMResponse, SafetySetting};
use tracing::debug;

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

pub struct GeminiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    safety_settings: Vec<SafetySetting>,
}

impl GeminiProvider {
    pub fn new(api_key: &str, model: Option<&str>, base_url: Option<&str>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            model: model.unwrap_or(DEFAULT_MODEL).to_string(),
            base_url: base_url.unwrap_or(DEFAULT_BASE_URL).trim_end_matches('/').to_string(),
            safety_settings: SafetySetting::block_none(),
        }
    }

    fn request_body(&self, prompt: &str) -> Value {
        json!({
            "contents": [{"role": "user", "parts": [{"text": prompt}]}],
            "safetySettings": self.safety_settings,
            "generationConfig": {
                "maxOutputTokens": 8192,
            }
        })
    }
}

/// Pull the generated text out of a `generateContent` reply.
fn parse_response(data: &Value, model: &str) -> Result<LLMResponse, SonarchatError> {
    if let Some(error) = data.get("error") {
        return Err(SonarchatError::LLMApi(error["message"].as_str().unwrap_or("Unknown").to_string()));
    }

    if let Some(reason) = data["promptFeedback"]["blockReason"].as_str() {
        return Err(SonarchatError::LLMApi(format!("Prompt blocked by Gemini: {}", reason)));
    }

    let parts = data["candidates"][0]["content"]["parts"].as_array();
    let content: String = parts
        .map(|parts| parts.iter().filter_map(|p| p["text"].as_str()).collect())
        .unwrap_or_default();

    if content.is_empty() {
        let reason = data["candidates"][0]["finishReason"].as_str().unwrap_or("no candidates");
        return Err(SonarchatError::LLMApi(format!("Gemini returned no text ({})", reason)));
    }

    Ok(LLMResponse {
        content,
        input_tokens: data["usageMetadata"]["promptTokenCount"].as_u64(),
        output_tokens: data["usageMetadata"]["candidatesTokenCount"].as_u64(),
        model: model.to_string(),
    })
}

#[async_trait]
impl LLMProvider for GeminiProvider {
    async fn complete(&self, prompt: &str) -> Result<LLMResponse, SonarchatError> {
        let body = self.request_body(prompt);

        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model);

        let resp = self.client.post(&url)
            .query(&[("key", &self.api_key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| SonarchatError::Network(redact_credentials(
                &format!("Gemini request failed: {}", e),
                &[self.api_key.as_str()],
            )))?;

        match resp.status().as_u16() {
            429 => return Err(SonarchatError::RateLimit("Gemini rate limit".into())),
            401 | 403 => return Err(SonarchatError::Authentication("Invalid Gemini API key".into())),
            _ => {}
        }

        let data: Value = resp.json().await
            .map_err(|e| SonarchatError::LLMApi(format!("Parse error: {}", e)))?;

        let response = parse_response(&data, &self.model)?;
        debug!(
            model = %self.model,
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            "Gemini completion"
        );
        Ok(response)
    }

    fn provider_name(&self) -> &str { "gemini" }
    fn model_name(&self) -> &str { &self.model }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_carries_safety_settings() {
        let provider = GeminiProvider::new("k", None, None);
        let body = provider.request_body("hello");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
        let settings = body["safetySettings"].as_array().unwrap();
        assert_eq!(settings.len(), 4);
        assert!(settings.iter().all(|s| s["threshold"] == "BLOCK_NONE"));
        assert_eq!(settings[0]["category"], "HARM_CATEGORY_HARASSMENT");
    }

    #[test]
    fn test_custom_model_and_base_url() {
        let provider = GeminiProvider::new("k", Some("gemini-2.5-flash"), Some("http://localhost:9/"));
        let body = provider.request_body("q");
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 8192);
        assert_eq!(provider.base_url, "http://localhost:9");
        assert_eq!(provider.model_name(), "gemini-2.5-flash");
    }

    #[test]
    fn test_parse_response_joins_parts() {
        let data = json!({
            "candidates": [{"content": {"parts": [{"text": "## Issue\n"}, {"text": "Fix it."}]}}],
            "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 4}
        });
        let resp = parse_response(&data, "m").unwrap();
        assert_eq!(resp.content, "## Issue\nFix it.");
        assert_eq!(resp.input_tokens, Some(10));
        assert_eq!(resp.output_tokens, Some(4));
    }

    #[test]
    fn test_parse_response_error_object() {
        let data = json!({"error": {"message": "API key not valid"}});
        let err = parse_response(&data, "m").unwrap_err();
        assert_eq!(err.to_string(), "LLM API error: API key not valid");
    }

    #[test]
    fn test_parse_response_blocked_prompt() {
        let data = json!({"promptFeedback": {"blockReason": "SAFETY"}});
        let err = parse_response(&data, "m").unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }

    #[test]
    fn test_parse_response_empty_candidate() {
        let data = json!({"candidates": [{"finishReason": "MAX_TOKENS"}]});
        let err = parse_response(&data, "m").unwrap_err();
        assert!(err.to_string().contains("MAX_TOKENS"));
    }
}
