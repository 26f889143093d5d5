//! Proposal-document copying — the fallback when a folder ships no patches.

use std::path::{Path, PathBuf};

use filetime::FileTime;

use crate::error::{io_err, ApplyError};

/// Marker stripped from proposal document names at copy time
/// (`a-proposal.md` lands as `a.md`).
pub const PROPOSAL_MARKER: &str = "-proposal";

/// Top-level project documents copied verbatim into the working directory,
/// never into the docs destination.
pub const AUX_DOCUMENTS: [&str; 2] = ["release_notes.md", "CHANGELOG.md"];

/// A completed copy, for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopiedDoc {
    pub source: PathBuf,
    pub destination: PathBuf,
}

/// Copy `*-proposal.md` documents from `folder` into `dest` with the marker
/// stripped from the destination name, then the fixed auxiliary documents
/// into `workdir`. Modification times are preserved on every copy.
///
/// Zero proposal documents is a legitimate empty case, not an error.
pub fn copy_proposals(
    folder: &Path,
    dest: &Path,
    workdir: &Path,
) -> Result<Vec<CopiedDoc>, ApplyError> {
    let mut copied = Vec::new();

    for source in proposal_documents(folder)? {
        let Some(name) = source.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let target = dest.join(name.replace(PROPOSAL_MARKER, ""));
        copy_preserving_mtime(&source, &target)?;
        tracing::info!(
            "copied proposal document: {} -> {}",
            source.display(),
            target.display()
        );
        copied.push(CopiedDoc {
            source,
            destination: target,
        });
    }

    for aux in AUX_DOCUMENTS {
        let source = folder.join(aux);
        if !source.exists() {
            continue;
        }
        let target = workdir.join(aux);
        copy_preserving_mtime(&source, &target)?;
        tracing::info!("copied project document: {aux}");
        copied.push(CopiedDoc {
            source,
            destination: target,
        });
    }

    Ok(copied)
}

/// `*-proposal.md` files directly in `folder`, sorted by name so reports and
/// logs are deterministic.
fn proposal_documents(folder: &Path) -> Result<Vec<PathBuf>, ApplyError> {
    let suffix = format!("{PROPOSAL_MARKER}.md");
    let mut docs: Vec<PathBuf> = std::fs::read_dir(folder)
        .map_err(|e| io_err(folder, e))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.is_file()
                && p.file_name()
                    .and_then(|n| n.to_str())
                    .map(|n| n.ends_with(&suffix))
                    .unwrap_or(false)
        })
        .collect();
    docs.sort();
    Ok(docs)
}

fn copy_preserving_mtime(source: &Path, target: &Path) -> Result<(), ApplyError> {
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    std::fs::copy(source, target).map_err(|e| io_err(target, e))?;
    let meta = std::fs::metadata(source).map_err(|e| io_err(source, e))?;
    filetime::set_file_mtime(target, FileTime::from_last_modification_time(&meta))
        .map_err(|e| io_err(target, e))?;
    Ok(())
}
