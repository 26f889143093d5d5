//! Patch discovery and ordered application.
//!
//! Patches are stateful: `patches/*.diff` must apply in lexicographic
//! filename order, and the first failure aborts the run.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{io_err, ApplyError};

/// Subdirectory of the proposal folder holding patch files.
pub const PATCHES_DIR: &str = "patches";

/// Patch file extension.
pub const PATCH_EXTENSION: &str = "diff";

/// Applies a single patch file to the working tree.
///
/// Narrow seam over the external version-control tool so tests can substitute
/// a fake that simulates clean application or hard failure.
pub trait PatchRunner {
    fn apply(&self, patch: &Path) -> Result<(), ApplyError>;
}

/// Real runner: `git apply --index --reject <patch>` executed in `workdir`.
///
/// `--index` stages applied changes; `--reject` writes rejected hunks to
/// `.rej` sidecar files instead of refusing the whole patch.
#[derive(Debug, Clone)]
pub struct GitApply {
    workdir: PathBuf,
}

impl GitApply {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }
}

impl PatchRunner for GitApply {
    fn apply(&self, patch: &Path) -> Result<(), ApplyError> {
        let output = Command::new("git")
            .args(["apply", "--index", "--reject"])
            .arg(patch)
            .current_dir(&self.workdir)
            .output()
            .map_err(|e| io_err("git apply", e))?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        Err(ApplyError::Patch {
            patch: patch.to_path_buf(),
            detail: format!("git apply exited with {}: {stderr}", output.status),
        })
    }
}

/// Collect `patches/*.diff` under `folder`, sorted lexicographically by file
/// name.
///
/// A missing subdirectory or zero matching files yields an empty vec — the
/// pipeline then falls back to document copying.
pub fn collect_patches(folder: &Path) -> Result<Vec<PathBuf>, ApplyError> {
    let dir = folder.join(PATCHES_DIR);
    if !dir.exists() {
        return Ok(vec![]);
    }
    let mut patches: Vec<PathBuf> = std::fs::read_dir(&dir)
        .map_err(|e| io_err(&dir, e))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.is_file() && p.extension().map(|ext| ext == PATCH_EXTENSION).unwrap_or(false)
        })
        .collect();
    patches.sort();
    Ok(patches)
}

/// Apply every patch in order. Fail-fast: each patch must apply cleanly
/// before the next is attempted.
pub fn apply_patches(patches: &[PathBuf], runner: &dyn PatchRunner) -> Result<(), ApplyError> {
    for patch in patches {
        tracing::info!("applying patch: {}", patch.display());
        runner.apply(patch)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::fs;
    use tempfile::TempDir;

    struct RecordingRunner {
        applied: RefCell<Vec<PathBuf>>,
    }

    impl RecordingRunner {
        fn new() -> Self {
            Self {
                applied: RefCell::new(vec![]),
            }
        }
    }

    impl PatchRunner for RecordingRunner {
        fn apply(&self, patch: &Path) -> Result<(), ApplyError> {
            self.applied.borrow_mut().push(patch.to_path_buf());
            Ok(())
        }
    }

    struct FailingRunner {
        fail_on: String,
        applied: RefCell<Vec<PathBuf>>,
    }

    impl PatchRunner for FailingRunner {
        fn apply(&self, patch: &Path) -> Result<(), ApplyError> {
            if patch.file_name().map(|n| n == self.fail_on.as_str()).unwrap_or(false) {
                return Err(ApplyError::Patch {
                    patch: patch.to_path_buf(),
                    detail: "simulated hard failure".to_string(),
                });
            }
            self.applied.borrow_mut().push(patch.to_path_buf());
            Ok(())
        }
    }

    #[test]
    fn missing_patches_dir_collects_nothing() {
        let folder = TempDir::new().unwrap();
        assert!(collect_patches(folder.path()).unwrap().is_empty());
    }

    #[test]
    fn empty_patches_dir_collects_nothing() {
        let folder = TempDir::new().unwrap();
        fs::create_dir(folder.path().join(PATCHES_DIR)).unwrap();
        assert!(collect_patches(folder.path()).unwrap().is_empty());
    }

    #[test]
    fn non_diff_files_are_ignored() {
        let folder = TempDir::new().unwrap();
        let dir = folder.path().join(PATCHES_DIR);
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("readme.txt"), "not a patch").unwrap();
        fs::write(dir.join("0001.diff"), "patch body").unwrap();

        let patches = collect_patches(folder.path()).unwrap();
        assert_eq!(patches.len(), 1);
        assert_eq!(patches[0].file_name().unwrap(), "0001.diff");
    }

    #[test]
    fn patches_apply_in_sorted_not_creation_order() {
        let folder = TempDir::new().unwrap();
        let dir = folder.path().join(PATCHES_DIR);
        fs::create_dir(&dir).unwrap();
        // Created out of lexicographic order on purpose.
        fs::write(dir.join("0002-second.diff"), "b").unwrap();
        fs::write(dir.join("0003-third.diff"), "c").unwrap();
        fs::write(dir.join("0001-first.diff"), "a").unwrap();

        let patches = collect_patches(folder.path()).unwrap();
        let runner = RecordingRunner::new();
        apply_patches(&patches, &runner).unwrap();

        let names: Vec<_> = runner
            .applied
            .borrow()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec!["0001-first.diff", "0002-second.diff", "0003-third.diff"]
        );
    }

    #[test]
    fn failure_stops_before_later_patches() {
        let folder = TempDir::new().unwrap();
        let dir = folder.path().join(PATCHES_DIR);
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("0001.diff"), "a").unwrap();
        fs::write(dir.join("0002.diff"), "b").unwrap();
        fs::write(dir.join("0003.diff"), "c").unwrap();

        let patches = collect_patches(folder.path()).unwrap();
        let runner = FailingRunner {
            fail_on: "0002.diff".to_string(),
            applied: RefCell::new(vec![]),
        };
        let err = apply_patches(&patches, &runner).expect_err("0002 must fail");
        assert!(matches!(err, ApplyError::Patch { .. }));
        assert_eq!(runner.applied.borrow().len(), 1, "only 0001 before the failure");
    }
}
