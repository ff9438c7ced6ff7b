pub mod backup;
pub mod build;
pub mod deploy;
