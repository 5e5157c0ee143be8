use crate::api;
use crate::cli::commands::ServeArgs;
use crate::cli::resolve_config;
use crate::errors::SonarchatError;
use tracing::info;

pub async fn handle_serve(args: ServeArgs) -> Result<(), SonarchatError> {
    let mut config = resolve_config(&args.source).await?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let state = api::create_app_state(&config)?;
    let app = api::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!(report = %config.report_url, mode = %config.chat.mode, "Starting web server");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| SonarchatError::Internal(format!("Server error: {}", e)))?;

    Ok(())
}
