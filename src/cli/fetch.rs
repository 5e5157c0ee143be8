use crate::cli::commands::FetchArgs;
use crate::cli::resolve_config;
use crate::config::ChatMode;
use crate::errors::SonarchatError;
use crate::service::ReportService;

pub async fn handle_fetch(args: FetchArgs) -> Result<(), SonarchatError> {
    let mut source = args.source.clone();
    // Printing records never talks to the LLM.
    source.mode = Some(ChatMode::Keyword);
    let config = resolve_config(&source).await?;
    let service = ReportService::from_config(&config)?;

    let records = service.load().await?.records();
    let out = if args.pretty {
        serde_json::to_string_pretty(&records)?
    } else {
        serde_json::to_string(&records)?
    };
    println!("{}", out);
    Ok(())
}
