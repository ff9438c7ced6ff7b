use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Value};

use crate::model::Manifest;

/// Manifest key holding the timestamp of the most recent publication
pub const LAST_PUBLISH_KEY: &str = "lastPublish";

/// Produce a structurally independent copy of manifest data
///
/// The returned value shares no storage with the input: mutating one can
/// never be observed through the other. JSON values carry no functions or
/// cyclic references, so the copy is lossless.
///
/// # Arguments
/// * `value` - Any JSON value
///
/// # Returns
/// An independent deep copy
pub fn structural_copy(value: &Value) -> Value {
    value.clone()
}

/// Rewrite the manifest's repository field to a git URL
///
/// Sets `repository` to `{"type": "git", "url": url}`, replacing any
/// existing repository entry in place. The input manifest is not modified.
///
/// # Arguments
/// * `manifest` - The manifest to rewrite
/// * `url` - Git repository URL
///
/// # Returns
/// A new manifest with the repository field set
pub fn set_repo(manifest: &Manifest, url: &str) -> Manifest {
    let mut updated = manifest.clone();
    updated.set(
        "repository".to_string(),
        json!({"type": "git", "url": url}),
    );
    updated
}

/// Stamp the manifest with a publication timestamp
///
/// Sets `lastPublish` to the given instant rendered as UTC with millisecond
/// precision and a `Z` suffix (e.g. `2024-03-01T12:00:00.000Z`). The input
/// manifest is not modified.
///
/// # Arguments
/// * `manifest` - The manifest to stamp
/// * `at` - The publication instant
///
/// # Returns
/// A new manifest with the timestamp recorded
pub fn mark_published(manifest: &Manifest, at: DateTime<Utc>) -> Manifest {
    let mut updated = manifest.clone();
    updated.set(
        LAST_PUBLISH_KEY.to_string(),
        Value::String(at.to_rfc3339_opts(SecondsFormat::Millis, true)),
    );
    updated
}
