//! Manifex Core - package manifest model and publish transforms
//!
//! This crate provides the foundational data structures and operations for
//! Manifex, including:
//! - The Manifest model: an order-preserving view of a package manifest
//! - Publish transforms: prune development-tooling fields, fold `publish`
//!   overrides into the top level
//! - Manifest edits: repository rewrite, publish timestamp stamping,
//!   structural copies
//! - The structured error facility (MxError) shared by every crate
//! - The structured logging facility with test capture support
//!
//! Transforms are pure: they take manifest data in, produce manifest data
//! out, and never touch the filesystem. Persistence lives in manifex-store.

pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod ops;

// Re-export commonly used types
pub use errors::{MxError, MxErrorKind, Result};
pub use model::Manifest;
pub use ops::{
    apply_publish, mark_published, prune_for_publish, set_repo, structural_copy, PRUNE_DENYLIST,
};
