//! SHA-256 hashing primitive shared by manifest verification and rewriting.

use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::{io_err, ManifestError};

/// Length of a SHA-256 digest rendered as lowercase hex.
pub const DIGEST_HEX_LEN: usize = 64;

/// Compute the lowercase hex SHA-256 digest of a file's full contents.
///
/// Deterministic, no side effects besides reading. Whether an unreadable file
/// is fatal is the caller's call.
pub fn sha256_file(path: &Path) -> Result<String, ManifestError> {
    let bytes = std::fs::read(path).map_err(|e| io_err(path, e))?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // FIPS 180-2 test vectors.
    const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
    const ABC_SHA256: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

    #[test]
    fn empty_file_hashes_to_known_digest() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("empty");
        std::fs::write(&path, "").unwrap();
        assert_eq!(sha256_file(&path).unwrap(), EMPTY_SHA256);
    }

    #[test]
    fn abc_hashes_to_known_digest() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("abc.txt");
        std::fs::write(&path, "abc").unwrap();
        let digest = sha256_file(&path).unwrap();
        assert_eq!(digest, ABC_SHA256);
        assert_eq!(digest.len(), DIGEST_HEX_LEN);
    }

    #[test]
    fn missing_file_is_an_io_error_with_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nope");
        let err = sha256_file(&path).expect_err("missing file must fail");
        let ManifestError::Io { path: reported, .. } = err;
        assert_eq!(reported, path);
    }
}
