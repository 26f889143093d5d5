//! Proposal manifest parsing, verification, and regeneration.
//!
//! # Format
//!
//! One entry per line, `"<hex-digest>  <path>"` — exactly two ASCII spaces as
//! the separator, UTF-8, every line newline-terminated. Relative paths resolve
//! against the folder the manifest lives in; absolute paths are used as-is.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::error::{io_err, ManifestError};
use crate::hash::{sha256_file, DIGEST_HEX_LEN};

/// File name of the manifest, both as pipeline input and output.
pub const MANIFEST_FILE_NAME: &str = "MANIFEST.sha256";

/// Separator between digest and path. The split happens on the first
/// occurrence, so paths containing two spaces stay intact.
const SEPARATOR: &str = "  ";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A single digest/path pair from a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub digest: String,
    pub path: PathBuf,
}

/// One problem found while verifying a manifest.
///
/// Issues are accumulated across the whole scan rather than aborting on the
/// first, so one run reports everything that is wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyIssue {
    /// Line did not split into digest + path, or the digest field is not a
    /// 64-char hex string.
    #[error("malformed manifest line {line_number}: {raw:?}")]
    MalformedLine { line_number: usize, raw: String },

    /// A listed file does not exist in the folder.
    #[error("file listed in manifest is missing: {path}")]
    MissingFile { path: PathBuf },

    /// A listed file exists but its content digest differs.
    #[error("digest mismatch for {path}: manifest has {expected}, file hashes to {actual}")]
    DigestMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },
}

/// Outcome of verifying a proposal folder's manifest.
#[derive(Debug)]
pub struct VerifyReport {
    /// False when the folder carries no manifest; verification soft-skips
    /// with zero issues and the caller may warn.
    pub manifest_found: bool,
    /// Number of well-formed entries that were recomputed.
    pub checked: usize,
    pub issues: Vec<VerifyIssue>,
}

impl VerifyReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

fn parse_line(line: &str) -> Option<ManifestEntry> {
    let (digest, path) = line.split_once(SEPARATOR)?;
    if digest.len() != DIGEST_HEX_LEN || !digest.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    Some(ManifestEntry {
        digest: digest.to_string(),
        path: PathBuf::from(path),
    })
}

/// Verify `<folder>/MANIFEST.sha256` against the files it lists.
///
/// A missing manifest is not an error — the report comes back clean with
/// `manifest_found: false`. Malformed lines, missing files, and digest
/// mismatches are all accumulated; the scan never stops early.
pub fn verify_folder(folder: &Path) -> Result<VerifyReport, ManifestError> {
    let manifest_path = folder.join(MANIFEST_FILE_NAME);
    if !manifest_path.exists() {
        return Ok(VerifyReport {
            manifest_found: false,
            checked: 0,
            issues: vec![],
        });
    }

    let contents =
        std::fs::read_to_string(&manifest_path).map_err(|e| io_err(&manifest_path, e))?;

    let mut issues = Vec::new();
    let mut checked = 0;
    for (idx, raw) in contents.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let Some(entry) = parse_line(line) else {
            issues.push(VerifyIssue::MalformedLine {
                line_number: idx + 1,
                raw: raw.to_string(),
            });
            continue;
        };
        checked += 1;

        let resolved = if entry.path.is_absolute() {
            entry.path.clone()
        } else {
            folder.join(&entry.path)
        };
        if !resolved.exists() {
            issues.push(VerifyIssue::MissingFile { path: entry.path });
            continue;
        }
        let actual = sha256_file(&resolved)?;
        if actual != entry.digest {
            issues.push(VerifyIssue::DigestMismatch {
                path: entry.path,
                expected: entry.digest,
                actual,
            });
        }
    }

    Ok(VerifyReport {
        manifest_found: true,
        checked,
        issues,
    })
}

// ---------------------------------------------------------------------------
// Regeneration
// ---------------------------------------------------------------------------

/// Markdown files directly under `dir`, sorted by path. Non-recursive.
pub fn markdown_files(dir: &Path) -> Result<Vec<PathBuf>, ManifestError> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(|e| io_err(dir, e))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().map(|ext| ext == "md").unwrap_or(false))
        .collect();
    files.sort();
    Ok(files)
}

/// Overwrite `<workdir>/MANIFEST.sha256` with one sorted digest line per
/// markdown file directly under `dest`.
///
/// Paths are recorded relative to `workdir` where possible, so the manifest
/// reads correctly from the invocation root (`docs/a.md` rather than an
/// absolute path). Returns the entries written, in file order.
pub fn write_manifest(workdir: &Path, dest: &Path) -> Result<Vec<ManifestEntry>, ManifestError> {
    let mut entries = Vec::new();
    let mut out = String::new();
    for file in markdown_files(dest)? {
        let digest = sha256_file(&file)?;
        let rel = file
            .strip_prefix(workdir)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| file.clone());
        out.push_str(&format!("{digest}{SEPARATOR}{}\n", rel.display()));
        entries.push(ManifestEntry { digest, path: rel });
    }

    let manifest_path = workdir.join(MANIFEST_FILE_NAME);
    std::fs::write(&manifest_path, out).map_err(|e| io_err(&manifest_path, e))?;
    Ok(entries)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
