//! # cpost CLI entry point
//!
//! Parses command-line arguments and dispatches to the tracking handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cpost_cli::track::{run_delivered, run_history, run_status, DeliveredArgs, TrackArgs};
use cpost_client::{ConfigOverrides, CzechPostClient, CzechPostConfig, Language};

/// Czech Post parcel tracking.
///
/// Configuration is read from `CPOST_*` environment variables; flags
/// override them.
#[derive(Parser, Debug)]
#[command(name = "cpost", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Language of state descriptions (cz or en).
    #[arg(long, global = true)]
    language: Option<Language>,

    /// Base URL of the Czech Post services host.
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the full tracking history of a parcel.
    History(TrackArgs),

    /// Print the newest state of a parcel.
    Status(TrackArgs),

    /// Print whether a parcel was delivered (exit code 0 if it was).
    Delivered(DeliveredArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<u8> {
    let config = build_config(&cli)?;
    tracing::debug!(base_url = %config.base_url, language = %config.language, "cpost starting");

    let client = CzechPostClient::new(config)?;
    let requestor = client.parcel_history();
    let mut out = std::io::stdout().lock();

    match &cli.command {
        Commands::History(args) => run_history(args, requestor, &mut out).await,
        Commands::Status(args) => run_status(args, requestor, &mut out).await,
        Commands::Delivered(args) => run_delivered(args, requestor, &mut out).await,
    }
}

fn build_config(cli: &Cli) -> anyhow::Result<CzechPostConfig> {
    let overrides = ConfigOverrides {
        base_url: cli.base_url.clone(),
        language: cli.language,
    };
    Ok(CzechPostConfig::from_env_with(overrides)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parse_history() {
        let cli = Cli::try_parse_from(["cpost", "history", "RR123456789CZ"]).unwrap();
        match cli.command {
            Commands::History(args) => {
                assert_eq!(args.tracking_number, "RR123456789CZ");
                assert!(!args.json);
            }
            other => panic!("expected History, got: {other:?}"),
        }
    }

    #[test]
    fn cli_parse_status_json() {
        let cli = Cli::try_parse_from(["cpost", "status", "RR123456789CZ", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Status(ref args) if args.json));
    }

    #[test]
    fn cli_parse_delivered_with_globals() {
        let cli = Cli::try_parse_from([
            "cpost",
            "-vv",
            "delivered",
            "RR123456789CZ",
            "--language",
            "en",
            "--base-url",
            "http://127.0.0.1:8080",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.language, Some(Language::English));
        assert_eq!(cli.base_url.as_deref(), Some("http://127.0.0.1:8080"));
        assert!(matches!(cli.command, Commands::Delivered(_)));
    }

    #[test]
    fn cli_rejects_unknown_language() {
        assert!(Cli::try_parse_from(["cpost", "--language", "de", "status", "X"]).is_err());
    }

    #[test]
    fn cli_requires_tracking_number() {
        assert!(Cli::try_parse_from(["cpost", "status"]).is_err());
    }

    #[test]
    fn build_config_applies_overrides() {
        let cli = Cli::try_parse_from([
            "cpost",
            "--language",
            "en",
            "--base-url",
            "http://127.0.0.1:8080",
            "status",
            "RR123456789CZ",
        ])
        .unwrap();
        let config = build_config(&cli).unwrap();
        assert_eq!(config.base_url.as_str(), "http://127.0.0.1:8080/");
        assert_eq!(config.language, Language::English);
    }

    #[test]
    fn build_config_rejects_bad_base_url_flag() {
        let cli = Cli::try_parse_from(["cpost", "--base-url", "not a url", "status", "X"]).unwrap();
        assert!(build_config(&cli).is_err());
    }
}
