mod display;
mod flows;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use lawzy_gateway::{GatewayConfig, HttpGateway, config::DEFAULT_TIMEOUT_SECS};
use lawzy_session::Session;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lawzy", version, about = "Understand your legal situation under IPC and BNS")]
struct Cli {
    /// Backend base URL.
    #[arg(long, env = "LAWZY_BACKEND_URL")]
    backend_url: String,

    /// Per-request timeout in seconds.
    #[arg(long, env = "LAWZY_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Log at debug level (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check that the backend is reachable.
    Health,
    /// Analyse a situation and print the statutory breakdown.
    Analyze {
        /// Describe what happened, in any language.
        query: String,
    },
    /// Analyse, pick a suggested document, draft it, and export it.
    Docs {
        query: String,
        /// Suggestion number to draft (prompts when omitted).
        #[arg(long)]
        select: Option<usize>,
        /// Directory the draft is exported into.
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Analyse, then rehearse questions an officer or cross-examiner may ask.
    Practice { query: String },
}

/// Filter used when `RUST_LOG` is unset.
fn default_level(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    tracing::debug!("lawzy v{}", env!("CARGO_PKG_VERSION"));

    let config = GatewayConfig::new(&cli.backend_url, cli.timeout_secs)?;
    let gateway = Arc::new(HttpGateway::new(&config)?);

    match cli.command {
        Command::Health => {
            let health = gateway.health().await?;
            println!("{} ({}) at {}", health.status, health.service, gateway.base_url());
        }
        Command::Analyze { query } => {
            let mut session = Session::new(gateway);
            let analysis = flows::analyze(&mut session, &query).await?;
            display::print_analysis_card(&analysis);
        }
        Command::Docs { query, select, out } => {
            let mut session = Session::new(gateway);
            flows::analyze(&mut session, &query).await?;
            flows::documents(&mut session, select, &out).await?;
        }
        Command::Practice { query } => {
            let mut session = Session::new(gateway);
            flows::analyze(&mut session, &query).await?;
            flows::practice(&mut session).await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_unless_verbose() {
        assert_eq!(default_level(false), "warn");
        assert_eq!(default_level(true), "debug");
    }

    #[test]
    fn timeout_defaults_when_not_given() {
        let cli = Cli::try_parse_from([
            "lawzy",
            "--backend-url",
            "http://localhost:8000",
            "analyze",
            "threatened over land",
        ])
        .unwrap();
        assert_eq!(cli.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(matches!(cli.command, Command::Analyze { .. }));
    }

    #[test]
    fn bad_timeout_is_rejected() {
        let parsed = Cli::try_parse_from([
            "lawzy",
            "--backend-url",
            "http://localhost:8000",
            "--timeout-secs",
            "soon",
            "health",
        ]);
        assert!(parsed.is_err());
    }
}
