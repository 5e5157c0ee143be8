use clap::Parser;
use sonarchat::{cli, config, errors};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // Pick up GEMINI_API_KEY and friends from a local .env
    let dotenv = dotenvy::dotenv();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    if cli.json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_ansi(!cli.no_color)
            .init();
    }

    if let Ok(path) = dotenv {
        tracing::debug!(path = %path.display(), "Loaded environment file");
    }

    let result = match cli.command {
        cli::Commands::Serve(args) => cli::serve::handle_serve(args).await,
        cli::Commands::Ask(args) => cli::ask::handle_ask(args).await,
        cli::Commands::Fetch(args) => cli::fetch::handle_fetch(args).await,
        cli::Commands::Validate(args) => handle_validate(args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn handle_validate(args: cli::commands::ValidateArgs) -> Result<(), errors::SonarchatError> {
    let path = std::path::PathBuf::from(&args.config);
    let mut cfg = config::parse_config(&path).await?;
    config::apply_env(&mut cfg);
    config::resolve_credentials(&mut cfg);
    config::validate_config(&cfg)?;
    println!("Configuration is valid: {}", args.config);
    Ok(())
}
