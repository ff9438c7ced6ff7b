//! Publish, deploy, and backup flows.
//!
//! Each flow generates a run id, logs start and end events through the
//! canonical logging macros, and walks its collaborators in a fixed order.
//! Publish runs leave three files behind: a backup snapshot of the manifest
//! as it stood before the run, a proof snapshot of the exact published
//! content, and `package.json` restored with a fresh `lastPublish` stamp.
//! Dry runs compute the publish manifest and its digest without writing
//! anything.

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

use manifex_core::errors::{MxError, MxErrorKind, Result};
use manifex_core::ops::{
    apply_publish, mark_published, prune_for_publish, set_repo, structural_copy,
};
use manifex_core::Manifest;
use manifex_core::{log_op_end, log_op_error, log_op_start};
use manifex_core_types::RunId;
use manifex_store::{
    compute_digest, load_manifest, write_backup, write_manifest, write_proof, BACKUP_FILE_NAME,
    PROOF_FILE_NAME,
};

use crate::archive::ReleasePacker;
use crate::vcs::{CommitOutcome, VcsError, VersionControl};

/// Branch that receives working-tree backups
pub const BACKUP_BRANCH: &str = "dev";

/// Branch that backups are promoted to for release
pub const RELEASE_BRANCH: &str = "main";

/// Options for a publish or deploy run.
#[derive(Debug, Clone, Default)]
pub struct PublishOptions {
    /// Compute the publish manifest and digest without writing anything
    pub dry_run: bool,
    /// Repository URL to set on the publish manifest
    pub repo_url: Option<String>,
    /// Backup snapshot destination, `<dir>/package.backup.json` when unset
    pub backup_path: Option<PathBuf>,
    /// Proof snapshot destination, `<dir>/package.proof.json` when unset
    pub proof_path: Option<PathBuf>,
}

/// A snapshot file written during a publish run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotRecord {
    /// Where the snapshot was written
    pub path: PathBuf,
    /// SHA256 digest of the written bytes
    pub digest: String,
}

/// Result of a publish run.
#[derive(Debug, Clone)]
pub struct PublishOutcome {
    /// Correlation id for the run
    pub run_id: RunId,
    /// Digest of the publish manifest bytes
    pub manifest_digest: String,
    /// Backup snapshot, absent on dry runs
    pub backup: Option<SnapshotRecord>,
    /// Proof snapshot, absent on dry runs
    pub proof: Option<SnapshotRecord>,
    /// Timestamp stamped into `lastPublish`, absent on dry runs
    pub published_at: Option<DateTime<Utc>>,
    /// Whether this was a dry run
    pub dry_run: bool,
}

/// Result of a deploy run.
#[derive(Debug, Clone)]
pub struct DeployOutcome {
    /// The publish portion of the run
    pub publish: PublishOutcome,
    /// Release archive path, absent on dry runs
    pub archive: Option<PathBuf>,
}

/// Options for a backup flow run.
#[derive(Debug, Clone)]
pub struct BackupOptions {
    /// Commit message for the backup commit
    pub message: String,
    /// Merge the backup branch into the release branch and push it
    pub promote: bool,
}

/// Result of a backup flow run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupOutcome {
    /// Correlation id for the run
    pub run_id: RunId,
    /// Whether a backup commit was created or the tree was already clean
    pub commit: CommitOutcome,
    /// Whether the release branch was updated
    pub promoted: bool,
}

/// Standard message for backups taken without an explicit message.
pub fn auto_backup_message(at: DateTime<Utc>) -> String {
    format!(
        "Auto backup: {}",
        at.to_rfc3339_opts(SecondsFormat::Millis, true)
    )
}

/// Run the publish pipeline against a package directory.
///
/// # Arguments
///
/// * `dir` - Package directory containing `package.json`
/// * `options` - Publish options
///
/// # Returns
///
/// The outcome, including the publish manifest digest and the snapshot
/// records for the files that were written
///
/// # Errors
///
/// - `MxErrorKind::NotFound`: The directory has no `package.json`
/// - `MxErrorKind::InvalidManifest`: The manifest did not parse as a JSON
///   object
/// - `MxErrorKind::Io` / `MxErrorKind::Serialization`: A snapshot or
///   manifest write failed
pub fn run_publish(dir: &Path, options: PublishOptions) -> Result<PublishOutcome> {
    let run_id = RunId::new();
    let started = Instant::now();

    log_op_start!(
        "run_publish",
        run_id = %run_id,
        dir = %dir.display(),
        dry_run = options.dry_run
    );

    match execute_publish(dir, &options, &run_id, None) {
        Ok((outcome, _)) => {
            log_op_end!(
                "run_publish",
                duration_ms = started.elapsed().as_millis() as u64,
                run_id = %run_id,
                digest = %outcome.manifest_digest,
                dry_run = outcome.dry_run
            );
            Ok(outcome)
        }
        Err(err) => {
            log_op_error!(
                "run_publish",
                err,
                duration_ms = started.elapsed().as_millis() as u64,
                run_id = %run_id
            );
            Err(err)
        }
    }
}

/// Run the publish pipeline and pack the directory into a release archive.
///
/// Packing happens while the publish manifest is the one on disk, so the
/// archive carries the published shape of `package.json`. Dry runs skip
/// packing along with every write.
///
/// # Arguments
///
/// * `dir` - Package directory containing `package.json`
/// * `options` - Publish options
/// * `packer` - Release packer implementation
/// * `output_dir` - Directory that receives the archive
///
/// # Errors
///
/// Everything `run_publish` returns, plus `MxErrorKind::ExternalService`
/// when packing fails
pub fn run_deploy(
    dir: &Path,
    options: PublishOptions,
    packer: &dyn ReleasePacker,
    output_dir: &Path,
) -> Result<DeployOutcome> {
    let run_id = RunId::new();
    let started = Instant::now();

    log_op_start!(
        "run_deploy",
        run_id = %run_id,
        dir = %dir.display(),
        dry_run = options.dry_run
    );

    match execute_publish(dir, &options, &run_id, Some((packer, output_dir))) {
        Ok((publish, archive)) => {
            log_op_end!(
                "run_deploy",
                duration_ms = started.elapsed().as_millis() as u64,
                run_id = %run_id,
                digest = %publish.manifest_digest,
                dry_run = publish.dry_run
            );
            Ok(DeployOutcome { publish, archive })
        }
        Err(err) => {
            log_op_error!(
                "run_deploy",
                err,
                duration_ms = started.elapsed().as_millis() as u64,
                run_id = %run_id
            );
            Err(err)
        }
    }
}

fn execute_publish(
    dir: &Path,
    options: &PublishOptions,
    run_id: &RunId,
    pack: Option<(&dyn ReleasePacker, &Path)>,
) -> Result<(PublishOutcome, Option<PathBuf>)> {
    let with_run = |e: MxError| e.with_run_id(run_id.clone());

    // Step 1: load the manifest as it stands.
    let original = load_manifest(dir).map_err(with_run)?;
    let original_value = original.to_value();

    // Step 2: derive the publish manifest. Transforms work on a structural
    // copy and never touch `original`.
    let publish_manifest = build_publish_manifest(&original_value, options).map_err(with_run)?;
    let publish_value = publish_manifest.to_value();

    // Step 3: digest the exact bytes a write would produce. A dry run ends
    // here, reporting the digest a real run would have written.
    let publish_json = pretty_json(&publish_value).map_err(with_run)?;
    let manifest_digest = compute_digest(publish_json.as_bytes());
    if options.dry_run {
        let outcome = PublishOutcome {
            run_id: run_id.clone(),
            manifest_digest,
            backup: None,
            proof: None,
            published_at: None,
            dry_run: true,
        };
        return Ok((outcome, None));
    }

    // Step 4: write the backup snapshot of the pre-publish manifest.
    let backup_path = options
        .backup_path
        .clone()
        .unwrap_or_else(|| dir.join(BACKUP_FILE_NAME));
    let backup_digest = write_backup(&original_value, &backup_path).map_err(with_run)?;

    // Step 5: write the proof snapshot of the publish content.
    let proof_path = options
        .proof_path
        .clone()
        .unwrap_or_else(|| dir.join(PROOF_FILE_NAME));
    let proof_digest = write_proof(&publish_value, &proof_path).map_err(with_run)?;

    // Step 6: put the publish manifest on disk.
    write_manifest(dir, &publish_manifest).map_err(with_run)?;

    // Step 7: pack the directory while the publish manifest is in place.
    let archive = match pack {
        Some((packer, output_dir)) => {
            let path = packer
                .pack_to(dir, output_dir)
                .map_err(|e| MxError::from(e).with_run_id(run_id.clone()))?;
            Some(path)
        }
        None => None,
    };

    // Step 8: restore the original manifest with a fresh publish stamp.
    let published_at = Utc::now();
    let stamped = mark_published(&original, published_at);
    write_manifest(dir, &stamped).map_err(with_run)?;

    let outcome = PublishOutcome {
        run_id: run_id.clone(),
        manifest_digest,
        backup: Some(SnapshotRecord {
            path: backup_path,
            digest: backup_digest,
        }),
        proof: Some(SnapshotRecord {
            path: proof_path,
            digest: proof_digest,
        }),
        published_at: Some(published_at),
        dry_run: false,
    };
    Ok((outcome, archive))
}

fn build_publish_manifest(original: &Value, options: &PublishOptions) -> Result<Manifest> {
    let draft = structural_copy(original);
    let pruned = prune_for_publish(&draft);
    let applied = apply_publish(pruned)?;
    let mut manifest = Manifest::try_from(applied)?;
    if let Some(url) = &options.repo_url {
        manifest = set_repo(&manifest, url);
    }
    Ok(manifest)
}

fn pretty_json(value: &Value) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| {
        MxError::new(MxErrorKind::Serialization)
            .with_op("run_publish")
            .with_message(format!("failed to serialize publish manifest: {}", e))
    })
}

/// Run the backup flow: commit the working tree to the backup branch and
/// push it, optionally promoting the result to the release branch.
///
/// # Arguments
///
/// * `vcs` - Version control implementation
/// * `options` - Backup options
///
/// # Errors
///
/// - `MxErrorKind::ExternalService`: A version control command failed
pub fn run_backup_flow(
    vcs: &dyn VersionControl,
    options: BackupOptions,
) -> Result<BackupOutcome> {
    let run_id = RunId::new();
    let started = Instant::now();

    log_op_start!(
        "run_backup_flow",
        run_id = %run_id,
        branch = BACKUP_BRANCH,
        promote = options.promote
    );

    match execute_backup_flow(vcs, &options, &run_id) {
        Ok(outcome) => {
            let committed = outcome.commit == CommitOutcome::Committed;
            log_op_end!(
                "run_backup_flow",
                duration_ms = started.elapsed().as_millis() as u64,
                run_id = %run_id,
                committed = committed,
                promoted = outcome.promoted
            );
            Ok(outcome)
        }
        Err(err) => {
            log_op_error!(
                "run_backup_flow",
                err,
                duration_ms = started.elapsed().as_millis() as u64,
                run_id = %run_id
            );
            Err(err)
        }
    }
}

fn execute_backup_flow(
    vcs: &dyn VersionControl,
    options: &BackupOptions,
    run_id: &RunId,
) -> Result<BackupOutcome> {
    let to_mx = |e: VcsError| MxError::from(e).with_run_id(run_id.clone());

    // Step 1: make sure the backup branch is checked out.
    vcs.switch_branch(BACKUP_BRANCH).map_err(to_mx)?;

    // Step 2: stage and commit everything. A clean tree is not an error.
    let commit = vcs.add_and_commit(&options.message).map_err(to_mx)?;

    // Step 3: push the backup branch even when the tree was clean, so
    // remotes catch up on commits from earlier runs.
    vcs.push_to_all_remotes(BACKUP_BRANCH).map_err(to_mx)?;

    // Step 4: optionally fold the backup branch into the release branch,
    // push it, and return to the backup branch.
    if options.promote {
        vcs.switch_branch(RELEASE_BRANCH).map_err(to_mx)?;
        vcs.merge(BACKUP_BRANCH).map_err(to_mx)?;
        vcs.push_to_all_remotes(RELEASE_BRANCH).map_err(to_mx)?;
        vcs.switch_branch(BACKUP_BRANCH).map_err(to_mx)?;
    }

    Ok(BackupOutcome {
        run_id: run_id.clone(),
        commit,
        promoted: options.promote,
    })
}
