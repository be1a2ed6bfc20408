//! Pixhide - Hide a file or directory in an image
//!
//! A CLI tool for LSB steganography with compression, directory archiving
//! and metadata preservation.

mod commands;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use commands::{CapacityCommand, CommandExecutor, EmbedCommand, ExtractCommand, InspectCommand};

/// Pixhide - Hide a file or directory in an image
///
/// Data goes into the least significant bit of every R, G and B channel.
/// Always keep the output in a lossless format (PNG, BMP).
#[derive(Parser)]
#[command(name = "pixhide")]
#[command(version)]
#[command(about = "Hide any file or directory in the least significant bits of an image")]
#[command(after_help = "Examples:
  pixhide embed secret.txt carrier.png output.png
  pixhide embed my_folder/ carrier.png output.png
  pixhide embed large.pdf carrier.png output.png --no-compress
  pixhide extract output.png recovered_file.pdf
  pixhide capacity my_file.zip
  pixhide capacity 5MB --carrier carrier.png")]
struct Cli {
    /// Verbose output (-v for progress, -vv for details)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Embed a file or directory in an image
    Embed(EmbedCommand),

    /// Extract a hidden file or directory from an image
    Extract(ExtractCommand),

    /// Calculate the image size needed for a file or size
    Capacity(CapacityCommand),

    /// Show the metadata hidden in an image
    Inspect(InspectCommand),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Embed(cmd) => cmd.execute(),
        Commands::Extract(cmd) => cmd.execute(),
        Commands::Capacity(cmd) => cmd.execute(),
        Commands::Inspect(cmd) => cmd.execute(),
    }
}

/// Logs go to stderr. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Stderr)
        .format_timestamp(None)
        .init();
}
