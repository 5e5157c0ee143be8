use std::sync::Arc;
use serde_json::Value;
use crate::config::{AppConfig, ChatMode};
use crate::errors::SonarchatError;
use crate::llm::{create_provider, LLMProvider};
use crate::prompts::{build_chat_prompt, load_template, sample_rows};
use crate::report::{load_report, ReportTable};
use crate::storage::{parse_report_url, store_for, ObjectLocation, ReportStore};
use crate::utils::markdown_to_html;
use crate::utils::truncation::truncate_for_log;
use crate::chat::keyword;
use crate::chat::ChatReply;
use tracing::{debug, info};

/// Report access and chat answering. Built once at startup and shared
/// read-only between requests; nothing is cached, every call re-fetches.
pub struct ReportService {
    pub mode: ChatMode,
    pub store: Arc<dyn ReportStore>,
    pub location: ObjectLocation,
    pub llm: Option<Arc<dyn LLMProvider>>,
    pub template: String,
    pub sample_rows: usize,
}

impl ReportService {
    /// Wire up storage, the LLM provider and the prompt template from a
    /// validated config.
    pub fn from_config(config: &AppConfig) -> Result<Self, SonarchatError> {
        let location = parse_report_url(&config.report_url)?;
        let store = store_for(&location, &config.storage);

        let llm: Option<Arc<dyn LLMProvider>> = match (config.chat.mode, config.llm.api_key.as_deref()) {
            (ChatMode::Llm, key) => Some(Arc::from(create_provider(
                &config.llm.provider,
                key.unwrap_or(""),
                config.llm.model.as_deref(),
                config.llm.base_url.as_deref(),
            )?)),
            (ChatMode::Keyword, _) => None,
        };

        info!(
            %location,
            store = store.store_name(),
            mode = %config.chat.mode,
            model = llm.as_ref().map(|p| p.model_name()).unwrap_or("-"),
            "Report service configured"
        );

        Ok(Self {
            mode: config.chat.mode,
            store,
            location,
            llm,
            template: load_template(config.chat.prompt_file.as_deref())?,
            sample_rows: config.chat.sample_rows,
        })
    }

    /// Fetch and parse the report.
    pub async fn load(&self) -> Result<ReportTable, SonarchatError> {
        load_report(self.store.as_ref(), &self.location).await
    }

    /// Answer `message`. `records` is the report the client already holds;
    /// keyword mode re-fetches the report when it is empty.
    pub async fn answer(&self, message: &str, records: &[Value]) -> Result<ChatReply, SonarchatError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(SonarchatError::InvalidRequest("Empty message".into()));
        }

        info!(mode = %self.mode, rows = records.len(), question = %truncate_for_log(message), "Answering chat message");

        let markdown = match self.mode {
            ChatMode::Llm => self.answer_with_llm(message, records).await?,
            ChatMode::Keyword => {
                let table = if records.is_empty() {
                    self.load().await?
                } else {
                    ReportTable::from_records(records)?
                };
                keyword::answer(&table, message)?
            }
        };

        Ok(ChatReply {
            response: markdown_to_html(&markdown),
            original_markdown: markdown,
        })
    }

    async fn answer_with_llm(&self, message: &str, records: &[Value]) -> Result<String, SonarchatError> {
        let provider = self.llm.as_ref().ok_or_else(|| {
            SonarchatError::Config("LLM chat mode selected but no provider is configured".into())
        })?;

        let sample = sample_rows(records, self.sample_rows);
        let prompt = build_chat_prompt(&self.template, sample, message)?;
        debug!(
            provider = provider.provider_name(),
            model = provider.model_name(),
            sample_rows = sample.len(),
            prompt_chars = prompt.len(),
            "Sending prompt"
        );

        let response = provider.complete(&prompt).await?;
        Ok(response.content)
    }
}
