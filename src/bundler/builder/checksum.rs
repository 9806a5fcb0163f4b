//! Artifact checksum calculation.
//!
//! SHA-256 of each signed installer, also written next to it as a
//! `sha256sum`-compatible sidecar file.

use crate::bundler::{Result, error::ErrorExt};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;

/// Calculates the SHA-256 of a file, reading it in 8KB chunks.
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash (64 characters)
/// * `Err` - If the file cannot be read
pub async fn calculate_sha256(path: &Path) -> Result<String> {
    let mut file = tokio::fs::File::open(path)
        .await
        .fs_context("opening file for hashing", path)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 8192];

    loop {
        let n = file
            .read(&mut buffer)
            .await
            .fs_context("reading file for hash calculation", path)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Writes `<file>.sha256` containing `<hash>  <file name>`.
pub async fn write_checksum_file(path: &Path, hash: &str) -> Result<PathBuf> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut sidecar = path.as_os_str().to_os_string();
    sidecar.push(".sha256");
    let sidecar = PathBuf::from(sidecar);

    tokio::fs::write(&sidecar, format!("{hash}  {file_name}\n"))
        .await
        .fs_context("writing checksum file", &sidecar)?;
    Ok(sidecar)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hashes_file_contents() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("app-x64.msi");
        std::fs::write(&path, b"hello world").unwrap();

        let hash = calculate_sha256(&path).await.unwrap();

        assert_eq!(
            hash,
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[tokio::test]
    async fn hashes_across_chunk_boundary() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("big.msi");
        let data = vec![7u8; 8192 * 3 + 17];
        std::fs::write(&path, &data).unwrap();

        let hash = calculate_sha256(&path).await.unwrap();

        assert_eq!(hash, hex::encode(Sha256::digest(&data)));
    }

    #[tokio::test]
    async fn sidecar_uses_sha256sum_format() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("app-x64.msi");
        std::fs::write(&path, b"").unwrap();

        let sidecar = write_checksum_file(&path, "abc").await.unwrap();

        assert_eq!(sidecar, tmp.path().join("app-x64.msi.sha256"));
        assert_eq!(
            std::fs::read_to_string(sidecar).unwrap(),
            "abc  app-x64.msi\n"
        );
    }

    #[tokio::test]
    async fn missing_file_is_fs_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = calculate_sha256(&tmp.path().join("nope.msi"))
            .await
            .unwrap_err();
        assert!(matches!(err, crate::bundler::Error::Fs { .. }));
    }
}
