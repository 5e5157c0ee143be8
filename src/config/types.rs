use std::fmt;
use std::path::PathBuf;
use serde::{Deserialize, Serialize};

pub const DEFAULT_REPORT_URL: &str =
    "https://storage.cloud.google.com/your-processed-csvs/processed/sonarqube_report.csv";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub report_url: String,
    pub chat: ChatConfig,
    pub llm: LLMConfig,
    pub storage: StorageConfig,
    pub server: ServerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            report_url: DEFAULT_REPORT_URL.to_string(),
            chat: ChatConfig::default(),
            llm: LLMConfig::default(),
            storage: StorageConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ChatMode {
    /// Forward the question and a report sample to the LLM
    #[default]
    Llm,
    /// Answer from the report with fixed keyword matching
    Keyword,
}

impl ChatMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Llm => "llm",
            Self::Keyword => "keyword",
        }
    }
}

impl fmt::Display for ChatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChatConfig {
    pub mode: ChatMode,
    /// Rows of the report included in the LLM prompt
    pub sample_rows: usize,
    pub prompt_file: Option<PathBuf>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self { mode: ChatMode::Llm, sample_rows: 5, prompt_file: None }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LLMConfig {
    pub provider: String,
    pub model: Option<String>,
    /// Literal key or `$VAR` reference
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self { provider: "gemini".to_string(), model: None, api_key: None, base_url: None }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    pub endpoint: Option<String>,
    pub access_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_string(), port: 5000 }
    }
}
