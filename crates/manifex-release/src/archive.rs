//! Release archive packing behind a trait seam.
//!
//! Deploy runs pack the package directory while the publish manifest is the
//! one on disk, so the archive carries exactly what was published. The
//! production implementation, [`TarCli`], shells out to the tar binary.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use manifex_core::errors::{MxError, MxErrorKind};
use manifex_store::load_manifest;
use thiserror::Error;

/// Errors from release packing.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PackError {
    /// The output directory could not be created.
    #[error("failed to create output directory {path}: {reason}")]
    OutputDir {
        /// Directory that was to be created.
        path: String,
        /// Why creation failed.
        reason: String,
    },

    /// The manifest used to name the archive could not be read.
    #[error("failed to read manifest for archive naming: {reason}")]
    ManifestUnavailable {
        /// Underlying load failure.
        reason: String,
    },

    /// The tar binary could not be spawned.
    #[error("failed to spawn tar: {reason}")]
    Spawn {
        /// Why the spawn failed.
        reason: String,
    },

    /// The tar command exited unsuccessfully.
    #[error("tar failed for {archive}: {stderr}")]
    CommandFailed {
        /// Archive that was being written.
        archive: String,
        /// Captured stderr.
        stderr: String,
    },
}

impl From<PackError> for MxError {
    fn from(err: PackError) -> Self {
        MxError::new(MxErrorKind::ExternalService)
            .with_op("pack_to")
            .with_message(err.to_string())
    }
}

/// Packs a package directory into a release archive.
pub trait ReleasePacker {
    /// Pack `package_dir` into an archive under `output_dir`.
    ///
    /// Returns the path of the archive that was written.
    fn pack_to(&self, package_dir: &Path, output_dir: &Path) -> Result<PathBuf, PackError>;
}

/// Tar implementation that shells out to the tar binary.
///
/// Archives are gzip-compressed and named `<name>-<version>.tgz` after the
/// manifest currently in the package directory. Scoped names such as
/// `@acme/widget` flatten to `acme-widget`. The `.git` directory and the
/// output directory itself (when it sits inside the package) are excluded.
pub struct TarCli;

impl ReleasePacker for TarCli {
    fn pack_to(&self, package_dir: &Path, output_dir: &Path) -> Result<PathBuf, PackError> {
        fs::create_dir_all(output_dir).map_err(|e| PackError::OutputDir {
            path: output_dir.display().to_string(),
            reason: e.to_string(),
        })?;

        let manifest = load_manifest(package_dir).map_err(|e| PackError::ManifestUnavailable {
            reason: e.to_string(),
        })?;
        let stem = archive_stem(manifest.name().unwrap_or("package"));
        let version = manifest.version().unwrap_or("0.0.0");
        let archive = output_dir.join(format!("{}-{}.tgz", stem, version));

        let mut cmd = Command::new("tar");
        cmd.arg("-czf").arg(&archive);
        cmd.arg("--exclude=./.git");
        if let Some(rel) = relative_to(output_dir, package_dir) {
            cmd.arg(format!("--exclude=./{}", rel.display()));
        }
        cmd.arg("-C").arg(package_dir).arg(".");

        let output = cmd.output().map_err(|e| PackError::Spawn {
            reason: e.to_string(),
        })?;
        if !output.status.success() {
            return Err(PackError::CommandFailed {
                archive: archive.display().to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(archive)
    }
}

/// Where `dir` sits inside `base`, if it does.
///
/// Both paths are canonicalized first so that spellings like `.` and
/// `./releases` compare correctly.
fn relative_to(dir: &Path, base: &Path) -> Option<PathBuf> {
    let dir = fs::canonicalize(dir).ok()?;
    let base = fs::canonicalize(base).ok()?;
    dir.strip_prefix(&base).ok().map(Path::to_path_buf)
}

/// Flatten a package name into an archive file stem.
fn archive_stem(name: &str) -> String {
    name.trim_start_matches('@').replace('/', "-")
}
