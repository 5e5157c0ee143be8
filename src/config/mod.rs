pub mod credentials;
pub mod parser;
pub mod types;

pub use types::*;
pub use parser::{apply_env, parse_config, resolve_credentials, validate_config};

use std::path::Path;
use crate::errors::SonarchatError;

/// Load the effective configuration: file (if any), then environment,
/// then `$VAR` credential resolution. CLI overrides are applied by the
/// caller before `validate_config`.
pub async fn load_config(path: Option<&Path>) -> Result<AppConfig, SonarchatError> {
    let mut config = match path {
        Some(path) => parse_config(path).await?,
        None => AppConfig::default(),
    };
    apply_env(&mut config);
    resolve_credentials(&mut config);
    Ok(config)
}
