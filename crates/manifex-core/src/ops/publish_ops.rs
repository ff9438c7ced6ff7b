use serde_json::Value;

use crate::errors::{MxError, MxErrorKind, Result};

/// Development-tooling fields removed from a manifest before publication.
///
/// These keys configure local workflows (test runners, linters, bundlers,
/// workspace layout) and carry no meaning for consumers of the published
/// package.
pub const PRUNE_DENYLIST: &[&str] = &[
    "scripts",
    "devDependencies",
    "lint-staged",
    "husky",
    "jest",
    "mocha",
    "ava",
    "vitest",
    "nodemonConfig",
    "babel",
    "eslintConfig",
    "prettier",
    "stylelint",
    "workspaces",
    "tsconfig",
    "rollup",
    "webpack",
    "_moduleAliases",
    "pnpm",
];

/// Remove development-tooling fields from manifest data
///
/// Produces a new value with every [`PRUNE_DENYLIST`] key dropped from the
/// top level. The input is never modified, and the relative order of the
/// surviving fields is preserved. Nested objects are not descended into.
///
/// A non-object value is returned unchanged; shape enforcement lives in
/// [`apply_publish`], which is the strict half of the transform pair.
///
/// # Arguments
/// * `value` - Manifest data, normally a JSON object
///
/// # Returns
/// A pruned copy of the input
pub fn prune_for_publish(value: &Value) -> Value {
    match value.as_object() {
        Some(fields) => {
            let mut pruned = fields.clone();
            for key in PRUNE_DENYLIST {
                pruned.shift_remove(*key);
            }
            Value::Object(pruned)
        }
        None => value.clone(),
    }
}

/// Fold `publish` overrides into the top level of manifest data
///
/// If the manifest carries a `publish` object, each of its entries is
/// written over the corresponding top-level field (existing fields keep
/// their position, new fields are appended) and the `publish` key itself
/// is removed, even when the overrides try to reintroduce one. A manifest
/// without a `publish` object is returned as-is, and a `publish` value of
/// any other JSON type is left in place untouched.
///
/// # Arguments
/// * `value` - Manifest data, which must be a JSON object
///
/// # Returns
/// The manifest with overrides applied
///
/// # Errors
/// * `InvalidInput` - If `value` is not a JSON object
pub fn apply_publish(value: Value) -> Result<Value> {
    let Value::Object(mut fields) = value else {
        return Err(MxError::new(MxErrorKind::InvalidInput)
            .with_op("apply_publish")
            .with_key("publish")
            .with_message("manifest data must be a JSON object"));
    };

    let has_override_map = matches!(fields.get("publish"), Some(Value::Object(_)));
    if has_override_map {
        if let Some(Value::Object(overrides)) = fields.shift_remove("publish") {
            for (key, value) in overrides {
                fields.insert(key, value);
            }
            // Merge first, remove second: an override entry named
            // "publish" is consumed along with the original key.
            fields.shift_remove("publish");
        }
    }

    Ok(Value::Object(fields))
}
