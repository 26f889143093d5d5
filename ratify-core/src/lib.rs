//! # ratify-core
//!
//! Hashing primitive and proposal-manifest handling.
//!
//! Public API surface:
//! - [`hash`] — SHA-256 file digests
//! - [`manifest`] — parse / verify / regenerate `MANIFEST.sha256`
//! - [`error`] — [`ManifestError`]

pub mod error;
pub mod hash;
pub mod manifest;

pub use error::ManifestError;
pub use hash::sha256_file;
pub use manifest::{
    markdown_files, verify_folder, write_manifest, ManifestEntry, VerifyIssue, VerifyReport,
    MANIFEST_FILE_NAME,
};
