//! Version control operations behind a trait seam.
//!
//! The backup flow talks to a [`VersionControl`] implementation rather than
//! to git directly, so tests can record calls without a repository. The
//! production implementation, [`GitCli`], shells out to the git binary with
//! prompts disabled; a failed command surfaces its stderr in the error.

use std::path::PathBuf;
use std::process::{Command, Output};

use manifex_core::errors::{MxError, MxErrorKind};
use thiserror::Error;

/// Errors from version control operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VcsError {
    /// The git binary could not be spawned.
    #[error("failed to spawn git for {op}: {reason}")]
    Spawn {
        /// Operation being attempted.
        op: String,
        /// Why the spawn failed.
        reason: String,
    },

    /// A git command exited unsuccessfully.
    #[error("git {op} failed: {detail}")]
    CommandFailed {
        /// Operation being attempted.
        op: String,
        /// Captured stderr (or stdout when stderr was empty).
        detail: String,
    },
}

impl VcsError {
    fn op(&self) -> &str {
        match self {
            VcsError::Spawn { op, .. } => op,
            VcsError::CommandFailed { op, .. } => op,
        }
    }
}

impl From<VcsError> for MxError {
    fn from(err: VcsError) -> Self {
        MxError::new(MxErrorKind::ExternalService)
            .with_op(err.op().to_string())
            .with_message(err.to_string())
    }
}

/// Outcome of an add-and-commit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// A new commit was created
    Committed,
    /// The working tree was already clean
    NothingToCommit,
}

/// Version control operations used by the backup flow.
pub trait VersionControl {
    /// Switch the working tree to an existing branch.
    fn switch_branch(&self, branch: &str) -> Result<(), VcsError>;

    /// Stage every change and commit it with the given message.
    ///
    /// A clean working tree is not an error; it reports
    /// [`CommitOutcome::NothingToCommit`].
    fn add_and_commit(&self, message: &str) -> Result<CommitOutcome, VcsError>;

    /// Merge the named branch into the current one.
    fn merge(&self, branch: &str) -> Result<(), VcsError>;

    /// Push the named branch to every configured remote.
    fn push_to_all_remotes(&self, branch: &str) -> Result<(), VcsError>;
}

/// Git implementation that shells out to the git binary.
pub struct GitCli {
    workdir: PathBuf,
}

impl GitCli {
    /// Create a git handle rooted at the given working directory.
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    fn run(&self, op: &str, args: &[&str]) -> Result<Output, VcsError> {
        Command::new("git")
            .arg("-C")
            .arg(&self.workdir)
            .args(args)
            .env("GIT_TERMINAL_PROMPT", "0")
            .env("LC_ALL", "C")
            .output()
            .map_err(|e| VcsError::Spawn {
                op: op.to_string(),
                reason: e.to_string(),
            })
    }

    fn run_checked(&self, op: &str, args: &[&str]) -> Result<String, VcsError> {
        let output = self.run(op, args)?;
        if !output.status.success() {
            return Err(VcsError::CommandFailed {
                op: op.to_string(),
                detail: failure_detail(&output),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    fn list_remotes(&self) -> Result<Vec<String>, VcsError> {
        let stdout = self.run_checked("remote", &["remote"])?;
        Ok(stdout
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect())
    }
}

impl VersionControl for GitCli {
    fn switch_branch(&self, branch: &str) -> Result<(), VcsError> {
        self.run_checked("checkout", &["checkout", branch])?;
        Ok(())
    }

    fn add_and_commit(&self, message: &str) -> Result<CommitOutcome, VcsError> {
        self.run_checked("add", &["add", "-A"])?;

        // Empty porcelain status means a clean tree: a no-op, not a failure
        let status = self.run_checked("status", &["status", "--porcelain"])?;
        if status.trim().is_empty() {
            return Ok(CommitOutcome::NothingToCommit);
        }

        self.run_checked("commit", &["commit", "-m", message])?;
        Ok(CommitOutcome::Committed)
    }

    fn merge(&self, branch: &str) -> Result<(), VcsError> {
        self.run_checked("merge", &["merge", branch])?;
        Ok(())
    }

    fn push_to_all_remotes(&self, branch: &str) -> Result<(), VcsError> {
        for remote in self.list_remotes()? {
            self.run_checked("push", &["push", &remote, branch])?;
        }
        Ok(())
    }
}

fn failure_detail(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if !stderr.is_empty() {
        return stderr;
    }
    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if !stdout.is_empty() {
        return stdout;
    }
    "command failed with no output".to_string()
}
