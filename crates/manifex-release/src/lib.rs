//! Manifex Release - publish pipeline orchestration
//!
//! Provides high-level flows that coordinate manifest transforms, snapshot
//! persistence, and external collaborators (git, tar):
//! - `run_publish`: rewrite `package.json` into its publish shape
//! - `run_deploy`: publish plus release archive packing
//! - `run_backup_flow`: commit and push the working tree to the backup branch

pub mod archive;
pub mod pipeline;
pub mod vcs;

pub use archive::{PackError, ReleasePacker, TarCli};
pub use pipeline::{
    auto_backup_message, run_backup_flow, run_deploy, run_publish, BackupOptions, BackupOutcome,
    DeployOutcome, PublishOptions, PublishOutcome, SnapshotRecord, BACKUP_BRANCH, RELEASE_BRANCH,
};
pub use vcs::{CommitOutcome, GitCli, VcsError, VersionControl};
