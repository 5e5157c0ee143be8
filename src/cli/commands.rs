use clap::{Args, Parser, Subcommand};
use crate::config::ChatMode;

#[derive(Parser)]
#[command(name = "sonarchat", version, about = "Code-quality report viewer and chat assistant")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve(ServeArgs),
    /// Answer one question about the report from the terminal
    Ask(AskArgs),
    /// Print the report records as JSON
    Fetch(FetchArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Options shared by every command that touches the report.
#[derive(Args, Clone, Debug, Default)]
pub struct SourceArgs {
    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Report location (https://storage.cloud.google.com/..., gs://..., file://...)
    #[arg(long)]
    pub report_url: Option<String>,

    /// How chat questions are answered
    #[arg(long, value_enum)]
    pub mode: Option<ChatMode>,
}

#[derive(Args, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Listen address
    #[arg(long)]
    pub host: Option<String>,

    /// Listen port
    #[arg(long)]
    pub port: Option<u16>,
}

#[derive(Args, Clone)]
pub struct AskArgs {
    /// The question to ask
    pub question: String,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Print the raw reply as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct FetchArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Pretty-print the output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Config file to validate
    pub config: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_args() {
        let cli = Cli::parse_from(["sonarchat", "-vv", "serve", "--port", "8080", "--mode", "keyword"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.port, Some(8080));
                assert_eq!(args.source.mode, Some(ChatMode::Keyword));
                assert!(args.host.is_none());
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_parse_ask_args() {
        let cli = Cli::parse_from(["sonarchat", "ask", "how many bugs?", "--report-url", "file:///tmp/r.csv", "--json"]);
        match cli.command {
            Commands::Ask(args) => {
                assert_eq!(args.question, "how many bugs?");
                assert_eq!(args.source.report_url.as_deref(), Some("file:///tmp/r.csv"));
                assert!(args.json);
            }
            _ => panic!("expected ask"),
        }
    }

    #[test]
    fn test_rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["sonarchat", "serve", "--mode", "psychic"]).is_err());
    }
}
