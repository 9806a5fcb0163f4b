//! WiX toolset acquisition and caching.
//!
//! The toolset is a pinned ZIP of WiX binaries. It is downloaded at most once
//! per cache directory: after a verified download is fully unpacked, an empty
//! marker file is written, and only the marker's presence makes the cache
//! entry usable. An interrupted extraction therefore looks like a miss and is
//! redone from scratch on the next run.

use crate::bundler::{
    error::{Context, Error, ErrorExt, Result},
    settings::Arch,
    utils::{
        fs::write_extracted_file,
        http::{DigestBuffer, Fetch, HttpFetcher},
    },
};
use std::{
    collections::HashMap,
    io::{Cursor, Read},
    path::{Path, PathBuf},
};

/// Marker written inside a cache directory once extraction is complete.
pub const INSTALLED_MARKER: &str = "__build_wix_installed";

/// A pinned toolset archive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WixRelease {
    /// Cache directory name under `build/`.
    pub name: String,
    /// Where the ZIP is served from.
    pub binary_url: String,
    /// Lowercase hex SHA-256 of the exact bytes at `binary_url`.
    pub sha256: String,
}

impl WixRelease {
    /// WiX v3.11 binaries.
    ///
    /// See <https://github.com/golang/build/blob/master/internal/installer/windowsmsi/windowsmsi.go>
    pub fn wix311() -> Self {
        Self {
            name: "wix311".into(),
            binary_url: "https://storage.googleapis.com/go-builder-data/wix311-binaries.zip".into(),
            sha256: "da034c489bd1dd6d8e1623675bf5e899f32d74d6d8312f8dd125a084543193de".into(),
        }
    }
}

/// Releases known out of the box.
///
/// `arm64` has no entry: building it needs a newer WiX than the one pinned
/// here, and asking for it fails with [`Error::ArchError`].
pub fn default_releases() -> HashMap<Arch, WixRelease> {
    HashMap::from([
        (Arch::X64, WixRelease::wix311()),
        (Arch::X86, WixRelease::wix311()),
    ])
}

/// Provides extracted, checksum-verified WiX toolsets from a local cache.
///
/// # Examples
///
/// ```no_run
/// use wix_msi_builder::bundler::{Arch, WixToolset};
///
/// # async fn example() -> wix_msi_builder::bundler::Result<()> {
/// let toolset = WixToolset::new("build");
/// let wix_dir = toolset.provide(Arch::X64).await?;
/// println!("candle at {}", wix_dir.join("candle.exe").display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct WixToolset<F = HttpFetcher> {
    build_dir: PathBuf,
    releases: HashMap<Arch, WixRelease>,
    fetcher: F,
}

impl WixToolset<HttpFetcher> {
    /// Cache under `build_dir`, downloading over HTTP.
    pub fn new(build_dir: impl Into<PathBuf>) -> Self {
        Self::with_fetcher(build_dir, HttpFetcher::new())
    }
}

impl<F: Fetch> WixToolset<F> {
    /// Cache under `build_dir`, downloading through `fetcher`.
    pub fn with_fetcher(build_dir: impl Into<PathBuf>, fetcher: F) -> Self {
        Self {
            build_dir: build_dir.into(),
            releases: default_releases(),
            fetcher,
        }
    }

    /// Replaces the release pinned for `arch`.
    pub fn with_release(mut self, arch: Arch, release: WixRelease) -> Self {
        self.releases.insert(arch, release);
        self
    }

    /// Returns the release configured for `arch`.
    pub fn release(&self, arch: Arch) -> Result<&WixRelease> {
        self.releases
            .get(&arch)
            .ok_or_else(|| Error::ArchError(format!("no WiX release configured for {arch}")))
    }

    /// Cache directory used for `release`.
    pub fn cache_dir(&self, release: &WixRelease) -> PathBuf {
        self.build_dir.join(&release.name)
    }

    /// Returns the directory holding the WiX toolset for `arch`, downloading,
    /// verifying and unpacking it first if the cache has no complete entry.
    ///
    /// No retries: transport failures, non-200 responses, checksum
    /// mismatches and filesystem errors are returned as-is, and the marker is
    /// never written on failure.
    pub async fn provide(&self, arch: Arch) -> Result<PathBuf> {
        let release = self.release(arch)?;
        let path = self.cache_dir(release);
        let marker = path.join(INSTALLED_MARKER);

        if tokio::fs::try_exists(&marker)
            .await
            .fs_context("checking install marker", &marker)?
        {
            log::info!("Cached {} at {}", release.binary_url, path.display());
            return Ok(path);
        }

        log::info!("Downloading {} to {}", release.binary_url, path.display());
        let mut buffer = DigestBuffer::new();
        self.fetcher.fetch(&release.binary_url, &mut buffer).await?;

        let (body, digest) = buffer.finish();
        if digest != release.sha256 {
            return Err(Error::HashMismatch {
                expected: release.sha256.clone(),
                actual: digest,
            });
        }
        log::debug!("Verified {} ({} bytes)", release.binary_url, body.len());

        let unpacked = extract_archive(body, path.clone()).await?;
        log::debug!("Unpacked {} files into {}", unpacked, path.display());

        tokio::fs::write(&marker, b"")
            .await
            .fs_context("writing install marker", &marker)?;

        Ok(path)
    }
}

/// Unpacks a ZIP held in memory into `dest` on the blocking pool.
async fn extract_archive(body: Vec<u8>, dest: PathBuf) -> Result<usize> {
    tokio::task::spawn_blocking(move || unpack_zip(&body, &dest))
        .await
        .map_err(|e| Error::GenericError(format!("Toolset extraction task panicked: {}", e)))?
}

/// Writes every entry of the archive below `dest`, overwriting existing
/// files. Returns the number of files written.
fn unpack_zip(body: &[u8], dest: &Path) -> Result<usize> {
    let mut archive = zip::ZipArchive::new(Cursor::new(body))?;

    std::fs::create_dir_all(dest).fs_context("creating toolset directory", dest)?;

    let mut written = 0;
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        let relative = entry
            .enclosed_name()
            .with_context(|| format!("archive entry {:?} has an unsafe path", entry.name()))?;
        let target = dest.join(relative);

        if entry.is_dir() {
            std::fs::create_dir_all(&target).fs_context("creating directory", &target)?;
            continue;
        }

        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).fs_context("creating directory", parent)?;
        }

        let mut contents = Vec::with_capacity(usize::try_from(entry.size()).unwrap_or_default());
        entry
            .read_to_end(&mut contents)
            .fs_context("reading archive entry for", &target)?;
        write_extracted_file(&target, &contents)?;
        written += 1;
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sha2::{Digest, Sha256};
    use std::{
        future::Future,
        io::Write,
        sync::atomic::{AtomicUsize, Ordering},
    };

    /// Serves a fixed body (or status) and counts requests.
    struct StubFetcher {
        body: Vec<u8>,
        status: u16,
        calls: AtomicUsize,
    }

    impl StubFetcher {
        fn ok(body: Vec<u8>) -> Self {
            Self {
                body,
                status: 200,
                calls: AtomicUsize::new(0),
            }
        }

        fn status(status: u16) -> Self {
            Self {
                body: Vec::new(),
                status,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Fetch for StubFetcher {
        fn fetch(
            &self,
            url: &str,
            sink: &mut DigestBuffer,
        ) -> impl Future<Output = Result<()>> + Send {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let result = if self.status == 200 {
                sink.update(&self.body);
                Ok(())
            } else {
                Err(Error::HttpStatus {
                    url: url.to_string(),
                    status: self.status,
                })
            };
            std::future::ready(result)
        }
    }

    fn zip_of(files: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);
        for (name, contents) in files {
            writer.start_file(*name, options).unwrap();
            writer.write_all(contents).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    fn release_for(body: &[u8]) -> WixRelease {
        WixRelease {
            name: "wix-test".into(),
            binary_url: "http://stub.invalid/wix.zip".into(),
            sha256: hex::encode(Sha256::digest(body)),
        }
    }

    fn toolset(build_dir: &Path, fetcher: StubFetcher, release: WixRelease) -> WixToolset<StubFetcher> {
        WixToolset::with_fetcher(build_dir, fetcher).with_release(Arch::X64, release)
    }

    const FILES: &[(&str, &[u8])] = &[
        ("candle.exe", b"candle"),
        ("light.exe", b"light"),
        ("doc/readme.txt", b"read me"),
    ];

    #[tokio::test]
    async fn second_provide_is_a_cache_hit() {
        let tmp = tempfile::tempdir().unwrap();
        let body = zip_of(FILES);
        let release = release_for(&body);
        let toolset = toolset(tmp.path(), StubFetcher::ok(body), release);

        let first = toolset.provide(Arch::X64).await.unwrap();
        let second = toolset.provide(Arch::X64).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(toolset.fetcher.calls(), 1);
    }

    #[tokio::test]
    async fn extracted_files_match_archive() {
        let tmp = tempfile::tempdir().unwrap();
        let body = zip_of(FILES);
        let release = release_for(&body);
        let toolset = toolset(tmp.path(), StubFetcher::ok(body), release);

        let dir = toolset.provide(Arch::X64).await.unwrap();

        assert_eq!(dir, tmp.path().join("wix-test"));
        for (name, contents) in FILES {
            assert_eq!(std::fs::read(dir.join(name)).unwrap(), *contents);
        }
        let marker = std::fs::metadata(dir.join(INSTALLED_MARKER)).unwrap();
        assert_eq!(marker.len(), 0);
    }

    #[tokio::test]
    async fn digest_mismatch_leaves_no_marker_and_retries() {
        let tmp = tempfile::tempdir().unwrap();
        let body = zip_of(FILES);
        let mut release = release_for(&body);
        release.sha256 = "0".repeat(64);
        let toolset = toolset(tmp.path(), StubFetcher::ok(body), release);

        let err = toolset.provide(Arch::X64).await.unwrap_err();
        assert!(err.is_integrity());
        assert!(err.to_string().contains(&"0".repeat(64)));

        let dir = tmp.path().join("wix-test");
        assert!(!dir.join(INSTALLED_MARKER).exists());
        assert!(!dir.join("candle.exe").exists());

        toolset.provide(Arch::X64).await.unwrap_err();
        assert_eq!(toolset.fetcher.calls(), 2);
    }

    #[tokio::test]
    async fn missing_marker_triggers_full_reinstall() {
        let tmp = tempfile::tempdir().unwrap();
        let body = zip_of(FILES);
        let release = release_for(&body);
        let toolset = toolset(tmp.path(), StubFetcher::ok(body), release);

        let dir = toolset.provide(Arch::X64).await.unwrap();
        // Simulate an interrupted run: files present, marker never written.
        std::fs::remove_file(dir.join(INSTALLED_MARKER)).unwrap();
        std::fs::write(dir.join("candle.exe"), b"half written").unwrap();

        toolset.provide(Arch::X64).await.unwrap();

        assert_eq!(toolset.fetcher.calls(), 2);
        assert_eq!(std::fs::read(dir.join("candle.exe")).unwrap(), b"candle");
        assert!(dir.join(INSTALLED_MARKER).exists());
    }

    #[tokio::test]
    async fn bad_status_is_transport_error() {
        let tmp = tempfile::tempdir().unwrap();
        let release = release_for(b"");
        let toolset = toolset(tmp.path(), StubFetcher::status(404), release);

        let err = toolset.provide(Arch::X64).await.unwrap_err();

        assert!(err.is_transport());
        assert!(err.to_string().contains("404"));
        assert!(!tmp.path().join("wix-test").join(INSTALLED_MARKER).exists());
    }

    #[tokio::test]
    async fn unconfigured_arch_is_rejected_without_fetching() {
        let tmp = tempfile::tempdir().unwrap();
        let toolset = WixToolset::with_fetcher(tmp.path(), StubFetcher::ok(Vec::new()));

        let err = toolset.provide(Arch::Arm64).await.unwrap_err();

        assert!(matches!(err, Error::ArchError(_)));
        assert_eq!(toolset.fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn corrupt_archive_with_matching_digest_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let body = b"not a zip".to_vec();
        let release = release_for(&body);
        let toolset = toolset(tmp.path(), StubFetcher::ok(body), release);

        let err = toolset.provide(Arch::X64).await.unwrap_err();

        assert!(matches!(err, Error::Zip(_)));
        assert!(!tmp.path().join("wix-test").join(INSTALLED_MARKER).exists());
    }

    #[test]
    fn x64_and_x86_share_the_pinned_release() {
        let releases = default_releases();
        assert_eq!(releases[&Arch::X64], WixRelease::wix311());
        assert_eq!(releases[&Arch::X86].name, "wix311");
        assert!(!releases.contains_key(&Arch::Arm64));
        assert_eq!(WixRelease::wix311().sha256.len(), 64);
    }
}
