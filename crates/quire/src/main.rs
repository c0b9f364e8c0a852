//! quire CLI - static site build tool.
//!
//! Provides commands for:
//! - `processors`: List the available processors
//! - `process`: Run a page through its commands and write the result

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::ProcessArgs;
use output::Output;

/// quire - static site build tool.
#[derive(Parser)]
#[command(name = "quire", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available processors.
    Processors,
    /// Run a page through its commands.
    Process(ProcessArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = matches!(&cli.command, Commands::Process(args) if args.verbose);
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose))
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Processors => commands::processors::execute(),
        Commands::Process(args) => args.execute(&output),
    };

    if let Err(err) = result {
        output.failed(&err);
        std::process::exit(1);
    }
}

/// `--verbose` forces INFO. Otherwise `RUST_LOG` applies, falling back to WARN
/// when it is unset or unparsable.
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new("info");
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}
