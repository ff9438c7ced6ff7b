//! Snapshot persistence for publish runs.
//!
//! Two snapshot files accompany every publish: a backup of the manifest as
//! it stood before the run, and a proof of the exact content that was
//! published. Both are written next to the manifest by default and carry a
//! SHA256 digest so a run's output can be verified later.

#![allow(clippy::result_large_err)]

use std::fs;
use std::path::Path;

use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::errors::{io_error, serialization_error, Result};

/// Default file name for the pre-publish backup snapshot
pub const BACKUP_FILE_NAME: &str = "package.backup.json";

/// Default file name for the published-content proof snapshot
pub const PROOF_FILE_NAME: &str = "package.proof.json";

/// Compute the SHA256 digest of content, hex-encoded
pub fn compute_digest(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}

/// Write a backup snapshot of pre-publish manifest data.
///
/// ## Arguments
///
/// - `value`: Manifest data as it stood before the publish transforms
/// - `path`: Destination file
///
/// ## Returns
///
/// SHA256 digest of the written bytes (hex-encoded, 64 characters)
///
/// ## Errors
///
/// - `MxErrorKind::Serialization`: JSON serialization failed
/// - `MxErrorKind::Io`: The file could not be written
pub fn write_backup(value: &Value, path: &Path) -> Result<String> {
    write_snapshot("write_backup", value, path)
}

/// Write a proof snapshot of the published manifest data.
///
/// ## Arguments
///
/// - `value`: Manifest data exactly as it was published
/// - `path`: Destination file
///
/// ## Returns
///
/// SHA256 digest of the written bytes (hex-encoded, 64 characters)
///
/// ## Errors
///
/// - `MxErrorKind::Serialization`: JSON serialization failed
/// - `MxErrorKind::Io`: The file could not be written
pub fn write_proof(value: &Value, path: &Path) -> Result<String> {
    write_snapshot("write_proof", value, path)
}

fn write_snapshot(operation: &str, value: &Value, path: &Path) -> Result<String> {
    let json =
        serde_json::to_string_pretty(value).map_err(|e| serialization_error(operation, e))?;

    fs::write(path, json.as_bytes()).map_err(|e| io_error(operation, path, e))?;

    let digest = compute_digest(json.as_bytes());

    tracing::debug!(
        path = %path.display(),
        digest = %digest,
        size_bytes = json.len(),
        "Wrote snapshot"
    );

    Ok(digest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_digest_is_hex_sha256() {
        let digest = compute_digest(b"hello");

        assert_eq!(digest.len(), 64);
        assert_eq!(
            digest,
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn test_backup_digest_matches_file_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(BACKUP_FILE_NAME);
        let value = json!({"name": "demo", "scripts": {"test": "jest"}});

        let digest = write_backup(&value, &path).unwrap();
        let written = fs::read(&path).unwrap();

        assert_eq!(digest, compute_digest(&written));

        let parsed: Value = serde_json::from_slice(&written).unwrap();
        assert_eq!(parsed, value);
    }

    #[test]
    fn test_proof_write_is_deterministic() {
        let temp = TempDir::new().unwrap();
        let value = json!({"name": "demo", "version": "1.0.0"});

        let first = write_proof(&value, &temp.path().join("a.json")).unwrap();
        let second = write_proof(&value, &temp.path().join("b.json")).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_write_into_missing_directory_is_io_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("absent").join(PROOF_FILE_NAME);

        let err = write_proof(&json!({}), &path).unwrap_err();

        assert_eq!(err.kind(), manifex_core::errors::MxErrorKind::Io);
        assert_eq!(err.path(), Some(path.as_path()));
    }
}
