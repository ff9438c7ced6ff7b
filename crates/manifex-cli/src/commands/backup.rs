//! Backup command
//!
//! Usage: manifex backup [--dir <DIR>] [--auto | --message <MSG>] [--main]

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use chrono::Utc;
use clap::Args;
use manifex_release::{
    auto_backup_message, run_backup_flow, BackupOptions, CommitOutcome, GitCli, BACKUP_BRANCH,
    RELEASE_BRANCH,
};

#[derive(Debug, Args)]
pub struct BackupArgs {
    /// Repository directory
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,

    /// Use a timestamped message instead of prompting
    #[arg(long)]
    pub auto: bool,

    /// Commit message for the backup commit
    #[arg(long, conflicts_with = "auto")]
    pub message: Option<String>,

    /// Merge the backup branch into main and push it too
    #[arg(long = "main")]
    pub promote_main: bool,
}

/// Execute backup command
pub fn execute(args: BackupArgs) -> Result<(), Box<dyn std::error::Error>> {
    let message = if args.auto {
        auto_backup_message(Utc::now())
    } else if let Some(message) = args.message {
        message
    } else {
        prompt_for_message()?
    };

    let vcs = GitCli::new(&args.dir);
    let outcome = run_backup_flow(
        &vcs,
        BackupOptions {
            message,
            promote: args.promote_main,
        },
    )?;

    match outcome.commit {
        CommitOutcome::Committed => {
            println!("Backup committed and pushed to {}.", BACKUP_BRANCH);
        }
        CommitOutcome::NothingToCommit => {
            println!("Nothing to commit; pushed {} as it stands.", BACKUP_BRANCH);
        }
    }
    if outcome.promoted {
        println!("Promoted {} into {} and pushed it.", BACKUP_BRANCH, RELEASE_BRANCH);
    }

    Ok(())
}

fn prompt_for_message() -> Result<String, Box<dyn std::error::Error>> {
    print!("Backup message: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;

    let message = line.trim().to_string();
    if message.is_empty() {
        return Err("backup message must not be empty".into());
    }
    Ok(message)
}
