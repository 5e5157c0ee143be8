use crate::cli::commands::AskArgs;
use crate::cli::resolve_config;
use crate::errors::SonarchatError;
use crate::service::ReportService;
use tracing::info;

/// Run one chat turn against the configured report and print the answer.
pub async fn handle_ask(args: AskArgs) -> Result<(), SonarchatError> {
    let config = resolve_config(&args.source).await?;
    let service = ReportService::from_config(&config)?;

    let table = service.load().await?;
    info!(rows = table.len(), "Report loaded for question");

    let reply = service.answer(&args.question, &table.records()).await?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&reply)?);
    } else {
        println!("{}", reply.original_markdown);
    }
    Ok(())
}
