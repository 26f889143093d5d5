//! Error types for ratify-apply.

use std::path::PathBuf;

use thiserror::Error;

use ratify_core::manifest::VerifyIssue;
use ratify_core::ManifestError;

/// All errors that can arise while applying a proposal folder.
#[derive(Debug, Error)]
pub enum ApplyError {
    /// Hashing / manifest I/O failure from ratify-core.
    #[error("manifest error: {0}")]
    Manifest(#[from] ManifestError),

    /// The proposal manifest did not verify. Issues are batch-collected over
    /// the whole scan; the pipeline stops before mutating anything.
    #[error("proposal manifest verification failed ({} issue(s))", .issues.len())]
    Verification { issues: Vec<VerifyIssue> },

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The external patch command exited non-zero or could not be spawned.
    /// Fail-fast: patches are order-dependent, so nothing after the failing
    /// one is attempted.
    #[error("patch application failed for {patch}: {detail}")]
    Patch { patch: PathBuf, detail: String },
}

/// Convenience constructor for [`ApplyError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ApplyError {
    ApplyError::Io {
        path: path.into(),
        source,
    }
}
