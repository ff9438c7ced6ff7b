//! Deploy command
//!
//! Usage: manifex deploy [--dir <DIR>] [--out <DIR>] [--repo-url <URL>] [--dry-run]

use std::path::PathBuf;

use clap::Args;
use manifex_release::{run_deploy, PublishOptions, TarCli};

#[derive(Debug, Args)]
pub struct DeployArgs {
    /// Package directory containing package.json
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,

    /// Directory that receives the release archive
    #[arg(long, default_value = "./releases")]
    pub out: PathBuf,

    /// Repository URL to set on the publish manifest
    #[arg(long)]
    pub repo_url: Option<String>,

    /// Compute the publish manifest and digest without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Execute deploy command
pub fn execute(args: DeployArgs) -> Result<(), Box<dyn std::error::Error>> {
    let options = PublishOptions {
        dry_run: args.dry_run,
        repo_url: args.repo_url,
        ..PublishOptions::default()
    };

    let outcome = run_deploy(&args.dir, options, &TarCli, &args.out)?;

    if outcome.publish.dry_run {
        println!("Dry run (nothing written):");
        println!("  manifest_digest: {}", outcome.publish.manifest_digest);
        return Ok(());
    }

    println!("Release packed:");
    println!("  manifest_digest: {}", outcome.publish.manifest_digest);
    if let Some(archive) = &outcome.archive {
        println!("  archive: {}", archive.display());
    }
    if let Some(proof) = &outcome.publish.proof {
        println!("  proof: {}", proof.path.display());
    }

    Ok(())
}
