//! Artifact storage adapters

pub mod filesystem;
pub mod signing;

pub use filesystem::FilesystemArtifactStore;
pub use signing::UrlSigner;
