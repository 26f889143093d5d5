//! Sequential verify → apply → re-manifest pipeline.

use std::path::{Path, PathBuf};

use ratify_core::manifest::{self, VerifyReport};
use ratify_core::ManifestEntry;

use crate::copy::{self, CopiedDoc};
use crate::error::ApplyError;
use crate::patches::{self, PatchRunner};

/// Directory preferred as the copy/manifest destination when present under
/// the working directory.
pub const DOCS_DIR: &str = "docs";

/// Which branch of the pipeline mutated the tree. The branches are mutually
/// exclusive: patches found means no documents are copied.
#[derive(Debug)]
pub enum RunAction {
    /// `patches/*.diff` were applied, in order.
    PatchesApplied { patches: Vec<PathBuf> },
    /// No patches found; proposal documents were copied instead.
    DocsCopied { docs: Vec<CopiedDoc> },
}

/// Summary of one pipeline run, for CLI reporting.
#[derive(Debug)]
pub struct RunReport {
    pub verification: VerifyReport,
    pub action: RunAction,
    pub manifest_path: PathBuf,
    pub manifest_entries: Vec<ManifestEntry>,
}

/// Destination for copied documents and manifest regeneration: `docs/` under
/// `workdir` when it exists, else `workdir` itself.
///
/// Decided once per run and threaded through both the copy and the
/// manifest-write steps, so the two can never disagree when `docs/` appears
/// or vanishes mid-run.
pub fn destination_dir(workdir: &Path) -> PathBuf {
    let docs = workdir.join(DOCS_DIR);
    if docs.is_dir() {
        docs
    } else {
        workdir.to_path_buf()
    }
}

/// Run the full pipeline for one proposal folder.
///
/// Steps, in order:
/// 1. verify `<folder>/MANIFEST.sha256` — any accumulated issue aborts with
///    [`ApplyError::Verification`] before the tree is touched;
/// 2. apply `patches/*.diff` in lexicographic order, or copy the proposal
///    documents when there are none;
/// 3. regenerate `<workdir>/MANIFEST.sha256` over the destination's markdown
///    files.
pub fn run(
    folder: &Path,
    workdir: &Path,
    runner: &dyn PatchRunner,
) -> Result<RunReport, ApplyError> {
    let verification = manifest::verify_folder(folder)?;
    if !verification.is_clean() {
        return Err(ApplyError::Verification {
            issues: verification.issues,
        });
    }
    if verification.manifest_found {
        tracing::info!("proposal manifest verified ({} file(s))", verification.checked);
    } else {
        tracing::warn!("no {} in {}", manifest::MANIFEST_FILE_NAME, folder.display());
    }

    // One destination decision for both the copy and the manifest-write steps.
    let dest = destination_dir(workdir);

    let found = patches::collect_patches(folder)?;
    let action = if found.is_empty() {
        tracing::info!("no patches in {}; copying proposal documents", folder.display());
        let docs = copy::copy_proposals(folder, &dest, workdir)?;
        RunAction::DocsCopied { docs }
    } else {
        patches::apply_patches(&found, runner)?;
        RunAction::PatchesApplied { patches: found }
    };

    let manifest_entries = manifest::write_manifest(workdir, &dest)?;

    Ok(RunReport {
        verification,
        action,
        manifest_path: workdir.join(manifest::MANIFEST_FILE_NAME),
        manifest_entries,
    })
}
