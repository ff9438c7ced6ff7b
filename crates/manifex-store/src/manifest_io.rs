//! Manifest file access for a package directory.
//!
//! The manifest lives at `<dir>/package.json`. Loading parses it into the
//! ordered [`Manifest`] model; writing serializes with two-space pretty
//! formatting, the layout package tooling expects.

#![allow(clippy::result_large_err)]

use std::fs;
use std::path::{Path, PathBuf};

use manifex_core::Manifest;

use crate::errors::{io_error, manifest_missing, parse_error, serialization_error, Result};

/// File name of the package manifest inside a package directory
pub const MANIFEST_FILE_NAME: &str = "package.json";

/// Path of the manifest file for a package directory
pub fn manifest_path(dir: &Path) -> PathBuf {
    dir.join(MANIFEST_FILE_NAME)
}

/// Load the manifest from a package directory.
///
/// ## Arguments
///
/// - `dir`: Package directory containing `package.json`
///
/// ## Returns
///
/// The parsed manifest with its key order intact
///
/// ## Errors
///
/// - `MxErrorKind::NotFound`: No `package.json` in the directory
/// - `MxErrorKind::Io`: The file exists but could not be read
/// - `MxErrorKind::InvalidManifest`: Content is not JSON, or its root is
///   not an object
pub fn load_manifest(dir: &Path) -> Result<Manifest> {
    let path = manifest_path(dir);

    let bytes = fs::read(&path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            manifest_missing(dir)
        } else {
            io_error("load_manifest", &path, e)
        }
    })?;

    let manifest: Manifest =
        serde_json::from_slice(&bytes).map_err(|e| parse_error(dir, e))?;

    Ok(manifest)
}

/// Write the manifest into a package directory.
///
/// Overwrites `<dir>/package.json` in place with pretty-printed JSON.
///
/// ## Arguments
///
/// - `dir`: Package directory
/// - `manifest`: Manifest to persist
///
/// ## Errors
///
/// - `MxErrorKind::Serialization`: JSON serialization failed
/// - `MxErrorKind::Io`: The file could not be written
pub fn write_manifest(dir: &Path, manifest: &Manifest) -> Result<()> {
    let path = manifest_path(dir);

    let json = serde_json::to_string_pretty(manifest)
        .map_err(|e| serialization_error("write_manifest", e))?;

    fs::write(&path, json.as_bytes()).map_err(|e| io_error("write_manifest", &path, e))?;

    tracing::debug!(
        path = %path.display(),
        size_bytes = json.len(),
        "Wrote package manifest"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use manifex_core::errors::MxErrorKind;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_manifest_is_not_found() {
        let temp = TempDir::new().unwrap();

        let err = load_manifest(temp.path()).unwrap_err();

        assert_eq!(err.kind(), MxErrorKind::NotFound);
        assert_eq!(err.dir(), Some(temp.path()));
    }

    #[test]
    fn test_load_invalid_json_is_invalid_manifest() {
        let temp = TempDir::new().unwrap();
        fs::write(manifest_path(temp.path()), b"{not json").unwrap();

        let err = load_manifest(temp.path()).unwrap_err();

        assert_eq!(err.kind(), MxErrorKind::InvalidManifest);
    }

    #[test]
    fn test_load_non_object_root_is_invalid_manifest() {
        let temp = TempDir::new().unwrap();
        fs::write(manifest_path(temp.path()), b"[1, 2, 3]").unwrap();

        let err = load_manifest(temp.path()).unwrap_err();

        assert_eq!(err.kind(), MxErrorKind::InvalidManifest);
    }

    #[test]
    fn test_write_then_load_round_trips() {
        let temp = TempDir::new().unwrap();
        let manifest: Manifest = serde_json::from_value(json!({
            "name": "demo",
            "version": "1.0.0",
            "dependencies": {"lodash": "^4.0.0"}
        }))
        .unwrap();

        write_manifest(temp.path(), &manifest).unwrap();
        let loaded = load_manifest(temp.path()).unwrap();

        assert_eq!(loaded, manifest);
    }

    #[test]
    fn test_write_uses_two_space_pretty_layout() {
        let temp = TempDir::new().unwrap();
        let manifest: Manifest = serde_json::from_value(json!({"name": "demo"})).unwrap();

        write_manifest(temp.path(), &manifest).unwrap();
        let written = fs::read_to_string(manifest_path(temp.path())).unwrap();

        assert_eq!(written, "{\n  \"name\": \"demo\"\n}");
    }
}
