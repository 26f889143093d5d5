//! Self-consistency: a manifest produced by `write_manifest` must verify
//! clean against the very directory it describes.

use std::fs;

use ratify_core::{sha256_file, verify_folder, write_manifest, VerifyIssue};
use tempfile::TempDir;

#[test]
fn write_then_verify_is_clean() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("alpha.md"), "alpha body\n").unwrap();
    fs::write(dir.path().join("beta.md"), "beta body\n").unwrap();
    fs::write(dir.path().join("gamma.md"), "gamma body\n").unwrap();

    let entries = write_manifest(dir.path(), dir.path()).unwrap();
    assert_eq!(entries.len(), 3);

    let report = verify_folder(dir.path()).unwrap();
    assert!(report.manifest_found);
    assert!(report.is_clean(), "issues: {:?}", report.issues);
    assert_eq!(report.checked, 3);
}

#[test]
fn mutating_a_file_after_write_surfaces_a_mismatch() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("doc.md"), "original\n").unwrap();
    write_manifest(dir.path(), dir.path()).unwrap();

    fs::write(dir.path().join("doc.md"), "tampered\n").unwrap();

    let report = verify_folder(dir.path()).unwrap();
    assert_eq!(report.issues.len(), 1);
    match &report.issues[0] {
        VerifyIssue::DigestMismatch { path, expected, actual } => {
            assert_eq!(path.to_string_lossy(), "doc.md");
            assert_ne!(expected, actual);
            assert_eq!(*actual, sha256_file(&dir.path().join("doc.md")).unwrap());
        }
        other => panic!("expected a digest mismatch, got {other:?}"),
    }
}
