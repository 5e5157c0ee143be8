use crate::errors::SonarchatError;
use super::provider::LLMProvider;
use super::gemini::GeminiProvider;

pub fn create_provider(
    provider_name: &str,
    api_key: &str,
    model: Option<&str>,
    base_url: Option<&str>,
) -> Result<Box<dyn LLMProvider>, SonarchatError> {
    if api_key.is_empty() {
        return Err(SonarchatError::Config(format!("No API key configured for LLM provider '{}'", provider_name)));
    }

    match provider_name.to_ascii_lowercase().as_str() {
        "gemini" | "google" => Ok(Box::new(GeminiProvider::new(api_key, model, base_url))),
        _ => Err(SonarchatError::Config(format!("Unknown LLM provider: {}", provider_name))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_gemini_provider() {
        let provider = create_provider("gemini", "key", None, None).unwrap();
        assert_eq!(provider.provider_name(), "gemini");
        assert_eq!(provider.model_name(), "gemini-2.0-flash");
    }

    #[test]
    fn test_unknown_provider() {
        assert!(matches!(create_provider("nope", "key", None, None), Err(SonarchatError::Config(_))));
    }

    #[test]
    fn test_missing_key() {
        assert!(matches!(create_provider("gemini", "", None, None), Err(SonarchatError::Config(_))));
    }
}
