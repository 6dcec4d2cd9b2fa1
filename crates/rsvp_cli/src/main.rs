//! rsvpdb CLI
//!
//! Command-line access to an RSVP collection kept in a directory.
//!
//! # Commands
//!
//! - `submit` - Add a response
//! - `delete` - Remove a response by id
//! - `list` - Show all responses, newest first
//! - `stats` - Show attendance counts

mod commands;

use clap::{Parser, Subcommand};
use commands::{CliError, Format, SubmitArgs};
use rsvp_core::DEFAULT_KEY;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// rsvpdb command-line tools.
#[derive(Parser)]
#[command(name = "rsvp")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the collection
    #[arg(global = true, short, long, env = "RSVP_DATA_DIR", default_value = "rsvp-data")]
    data_dir: PathBuf,

    /// Key of the collection document
    #[arg(global = true, short, long, env = "RSVP_KEY", default_value = DEFAULT_KEY)]
    key: String,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a response
    Submit(SubmitArgs),

    /// Remove a response by id
    Delete {
        /// Id of the response to remove
        id: String,
    },

    /// Show all responses, newest first
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Show attendance counts
    Stats {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Show version information
    Version,
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Submit(args) => commands::submit::run(&cli.data_dir, &cli.key, args),
        Commands::Delete { id } => commands::delete::run(&cli.data_dir, &cli.key, &id),
        Commands::List { format } => commands::list::run(&cli.data_dir, &cli.key, format),
        Commands::Stats { format } => commands::stats::run(&cli.data_dir, &cli.key, format),
        Commands::Version => {
            println!("rsvp CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("rsvpdb core v{}", rsvp_core::VERSION);
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            if e.is_retryable() {
                eprintln!("the collection is busy, try again later");
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_submit() {
        let cli = Cli::try_parse_from([
            "rsvp",
            "--data-dir",
            "/tmp/x",
            "submit",
            "--attending",
            "--party-size",
            "2",
            "--name",
            "Ada",
            "--name",
            "Grace",
        ])
        .unwrap();

        assert_eq!(cli.data_dir, PathBuf::from("/tmp/x"));
        match cli.command {
            Commands::Submit(args) => {
                assert!(args.attending);
                assert_eq!(args.party_size, 2);
                assert_eq!(args.names, vec!["Ada", "Grace"]);
            }
            _ => panic!("expected submit"),
        }
    }

    #[test]
    fn attending_and_not_attending_conflict() {
        let result = Cli::try_parse_from(["rsvp", "submit", "--attending", "--not-attending"]);
        assert!(result.is_err());
    }

    #[test]
    fn list_format_json() {
        let cli = Cli::try_parse_from(["rsvp", "list", "--format", "json"]).unwrap();
        assert!(matches!(cli.command, Commands::List { format: Format::Json }));
    }
}
