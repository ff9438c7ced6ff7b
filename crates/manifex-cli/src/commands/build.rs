//! Build command
//!
//! Usage: manifex build [--dir <DIR>] [--repo-url <URL>] [--dry-run]

use std::path::PathBuf;

use clap::Args;
use manifex_release::{run_publish, PublishOptions};

#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Package directory containing package.json
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,

    /// Repository URL to set on the publish manifest
    #[arg(long)]
    pub repo_url: Option<String>,

    /// Compute the publish manifest and digest without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Execute build command
pub fn execute(args: BuildArgs) -> Result<(), Box<dyn std::error::Error>> {
    let options = PublishOptions {
        dry_run: args.dry_run,
        repo_url: args.repo_url,
        ..PublishOptions::default()
    };

    let outcome = run_publish(&args.dir, options)?;

    if outcome.dry_run {
        println!("Dry run (nothing written):");
        println!("  manifest_digest: {}", outcome.manifest_digest);
    } else {
        println!("Publish manifest written:");
        println!("  manifest_digest: {}", outcome.manifest_digest);
        if let Some(backup) = &outcome.backup {
            println!("  backup: {}", backup.path.display());
        }
        if let Some(proof) = &outcome.proof {
            println!("  proof: {}", proof.path.display());
        }
        if let Some(at) = outcome.published_at {
            println!(
                "  last_publish: {}",
                at.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
            );
        }
    }

    Ok(())
}
