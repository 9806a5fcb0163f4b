//! Main bundler orchestration and coordination.
//!
//! This module provides the [`Bundler`] orchestrator that runs the MSI
//! pipeline for every configured architecture, strictly one after another.

use crate::bundler::{
    BuiltArtifact, Result, Settings,
    error::{Context, ErrorExt},
    platform::windows::{
        sign::SignTool,
        wix::{self, WixToolset},
    },
    utils::{
        fs,
        http::{Fetch, HttpFetcher},
    },
};

use super::{
    checksum::{calculate_sha256, write_checksum_file},
    tool_detection::find_signtool,
};

/// Main bundler orchestrator.
///
/// Holds everything resolved once per run: the settings (including the
/// build version), the toolset cache and the located signtool.
///
/// # Examples
///
/// ```no_run
/// use wix_msi_builder::bundler::{Bundler, Settings};
///
/// # async fn example(settings: Settings) -> wix_msi_builder::bundler::Result<()> {
/// let bundler = Bundler::new(settings)?;
/// for artifact in bundler.bundle().await? {
///     println!("{} {}", artifact.sha256, artifact.path.display());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Bundler<F = HttpFetcher> {
    settings: Settings,
    toolset: WixToolset<F>,
    signtool: SignTool,
}

impl Bundler<HttpFetcher> {
    /// Creates a bundler that downloads the toolset over HTTP into
    /// `build/` and signs with the signtool found for `settings`.
    ///
    /// # Errors
    ///
    /// Fails if signtool cannot be located.
    pub fn new(settings: Settings) -> Result<Self> {
        let toolset = WixToolset::new(settings.build_dir());
        Self::with_toolset(settings, toolset)
    }
}

impl<F: Fetch> Bundler<F> {
    /// Creates a bundler around an existing toolset cache.
    pub fn with_toolset(settings: Settings, toolset: WixToolset<F>) -> Result<Self> {
        let path = find_signtool(settings.windows())?;
        log::info!("signtool path: {}", path.display());
        let signtool = SignTool::new(path, settings.windows());

        Ok(Self {
            settings,
            toolset,
            signtool,
        })
    }

    /// Builds, signs and checksums one MSI per configured architecture.
    ///
    /// The first failure aborts the run; artifacts already produced for
    /// earlier architectures stay on disk.
    pub async fn bundle(&self) -> Result<Vec<BuiltArtifact>> {
        let output_dir = self.settings.output_dir();
        fs::create_dir_all(&output_dir, false).await?;

        let mut artifacts = Vec::with_capacity(self.settings.arches().len());
        for &arch in self.settings.arches() {
            let path = wix::bundle_project(&self.settings, arch, &self.toolset, &self.signtool)
                .await
                .with_context(|| format!("building {arch} installer"))?;

            let size = tokio::fs::metadata(&path)
                .await
                .fs_context("reading artifact metadata", &path)?
                .len();
            let sha256 = calculate_sha256(&path).await?;
            write_checksum_file(&path, &sha256).await?;

            artifacts.push(BuiltArtifact {
                arch,
                path,
                size,
                sha256,
            });
        }

        Ok(artifacts)
    }

    /// Returns a reference to the bundler settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the signtool this bundler signs with.
    pub fn signtool(&self) -> &SignTool {
        &self.signtool
    }
}
