//! Error handling for manifex-store
//!
//! Wraps manifex-core MxError with store-specific helpers

use std::path::Path;

use manifex_core::errors::{MxError, MxErrorKind};

/// Result type alias using MxError
pub type Result<T> = std::result::Result<T, MxError>;

/// Create a missing-manifest error
pub fn manifest_missing(dir: &Path) -> MxError {
    MxError::new(MxErrorKind::NotFound)
        .with_op("load_manifest")
        .with_dir(dir)
        .with_message("no package.json in directory")
}

/// Create an IO error
pub fn io_error(operation: &str, path: &Path, err: std::io::Error) -> MxError {
    MxError::new(MxErrorKind::Io)
        .with_op(operation.to_string())
        .with_path(path)
        .with_message(err.to_string())
}

/// Create a manifest parse error
pub fn parse_error(dir: &Path, err: serde_json::Error) -> MxError {
    MxError::new(MxErrorKind::InvalidManifest)
        .with_op("load_manifest")
        .with_dir(dir)
        .with_message(format!("manifest did not parse as a JSON object: {}", err))
}

/// Create a serialization error
pub fn serialization_error(operation: &str, err: serde_json::Error) -> MxError {
    MxError::new(MxErrorKind::Serialization)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}
