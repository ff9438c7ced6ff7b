pub mod manifest_ops;
pub mod publish_ops;

pub use manifest_ops::{mark_published, set_repo, structural_copy, LAST_PUBLISH_KEY};
pub use publish_ops::{apply_publish, prune_for_publish, PRUNE_DENYLIST};
