use std::path::Path;
use crate::errors::SonarchatError;
use crate::storage::parse_report_url;
use super::credentials::resolve_credential;
use super::types::{AppConfig, ChatMode};
use tracing::{debug, warn};

const MAX_CONFIG_BYTES: u64 = 1_048_576;

pub async fn parse_config(path: &Path) -> Result<AppConfig, SonarchatError> {
    if !path.exists() {
        return Err(SonarchatError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > MAX_CONFIG_BYTES {
        return Err(SonarchatError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    if content.trim().is_empty() {
        warn!(path = %path.display(), "Config file is empty, using defaults");
        return Ok(AppConfig::default());
    }

    let config: AppConfig = serde_yaml::from_str(&content)?;
    debug!(path = %path.display(), "Parsed config file");
    Ok(config)
}

/// Layer environment variables over the file config.
pub fn apply_env(config: &mut AppConfig) {
    apply_env_with(config, |name| std::env::var(name).ok());
}

pub fn apply_env_with(config: &mut AppConfig, lookup: impl Fn(&str) -> Option<String>) {
    let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(url) = get("SONARCHAT_REPORT_URL") {
        config.report_url = url;
    }
    if let Some(mode) = get("SONARCHAT_CHAT_MODE") {
        match mode.to_ascii_lowercase().as_str() {
            "llm" => config.chat.mode = ChatMode::Llm,
            "keyword" => config.chat.mode = ChatMode::Keyword,
            other => warn!(mode = %other, "Ignoring unknown SONARCHAT_CHAT_MODE"),
        }
    }
    if let Some(key) = get("GEMINI_API_KEY") {
        config.llm.api_key = Some(key);
    }
    if let Some(token) = get("GCS_ACCESS_TOKEN") {
        config.storage.access_token = Some(token);
    }
    if let Some(host) = get("STORAGE_EMULATOR_HOST") {
        config.storage.endpoint = Some(host);
    }
}

/// Replace `$VAR` credential references with their values.
pub fn resolve_credentials(config: &mut AppConfig) {
    config.llm.api_key = config.llm.api_key.as_deref().map(resolve_credential).filter(|k| !k.is_empty());
    config.storage.access_token = config
        .storage
        .access_token
        .as_deref()
        .map(resolve_credential)
        .filter(|t| !t.is_empty());
}

/// Semantic checks that serde cannot express.
pub fn validate_config(config: &AppConfig) -> Result<(), SonarchatError> {
    parse_report_url(&config.report_url)?;

    if config.chat.sample_rows == 0 {
        return Err(SonarchatError::Config("chat.sample_rows must be at least 1".into()));
    }

    if config.chat.mode == ChatMode::Llm && config.llm.api_key.as_deref().map_or(true, str::is_empty) {
        return Err(SonarchatError::Config(
            "chat.mode is 'llm' but no API key is set (llm.api_key or GEMINI_API_KEY)".into(),
        ));
    }

    if let Some(path) = &config.chat.prompt_file {
        if !path.exists() {
            return Err(SonarchatError::Config(format!("Prompt file not found: {}", path.display())));
        }
    }

    Ok(())
}
