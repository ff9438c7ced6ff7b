//! Manifex Store - manifest filesystem layer
//!
//! Provides:
//! - Loading and writing `package.json` for a package directory
//! - Backup and proof snapshot files with content digests
//! - SHA256 digest computation over serialized manifest bytes
//!
//! Writes are plain overwrite-in-place, matching the way package tooling
//! treats `package.json`: the file is small, rewritten wholesale, and the
//! backup snapshot is the recovery mechanism.

pub mod errors;
pub mod manifest_io;
pub mod snapshot;

// Re-export key types
pub use errors::Result;
pub use manifest_io::{load_manifest, manifest_path, write_manifest, MANIFEST_FILE_NAME};
pub use snapshot::{
    compute_digest, write_backup, write_proof, BACKUP_FILE_NAME, PROOF_FILE_NAME,
};
