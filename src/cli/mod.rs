pub mod commands;
pub mod serve;
pub mod ask;
pub mod fetch;

pub use commands::{Cli, Commands};

use std::path::Path;
use crate::config::{self, AppConfig};
use crate::errors::SonarchatError;
use commands::SourceArgs;

/// Build the effective config: file and environment, then CLI flags on top,
/// then validation.
pub async fn resolve_config(source: &SourceArgs) -> Result<AppConfig, SonarchatError> {
    let mut cfg = config::load_config(source.config.as_deref().map(Path::new)).await?;
    apply_overrides(&mut cfg, source);
    config::validate_config(&cfg)?;
    Ok(cfg)
}

pub fn apply_overrides(cfg: &mut AppConfig, source: &SourceArgs) {
    if let Some(url) = &source.report_url {
        cfg.report_url = url.clone();
    }
    if let Some(mode) = source.mode {
        cfg.chat.mode = mode;
    }
}
