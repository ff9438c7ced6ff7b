//! Manifex CLI
//!
//! Command-line interface for Manifex

use clap::{Parser, Subcommand, ValueEnum};
use manifex_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "manifex")]
#[command(about = "Manifex - Package manifest publish pipeline", long_about = None)]
struct Cli {
    /// Log output format
    #[arg(long, value_enum, default_value = "pretty", global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    /// Human-readable logs
    Pretty,
    /// JSON line logs
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Rewrite package.json into its publish shape (with backup and proof)
    Build(commands::build::BuildArgs),
    /// Build plus packing the package into a release archive
    Deploy(commands::deploy::DeployArgs),
    /// Commit and push the working tree to the backup branch
    Backup(commands::backup::BackupArgs),
}

fn main() {
    let cli = Cli::parse();

    init(match cli.log_format {
        LogFormat::Pretty => Profile::Development,
        LogFormat::Json => Profile::Production,
    });

    let result = match cli.command {
        Commands::Build(args) => commands::build::execute(args),
        Commands::Deploy(args) => commands::deploy::execute(args),
        Commands::Backup(args) => commands::backup::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
