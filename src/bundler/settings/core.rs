//! Core Settings struct and implementations.

use super::{Arch, PackageSettings, WindowsSettings, WixSettings};
use std::path::{Path, PathBuf};

/// Main settings for a build run.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder). Every
/// on-disk location is derived from the working directory:
///
/// | Path | Purpose |
/// |------|---------|
/// | `private/` | scratch copy of the decoded certificate |
/// | `build/<toolset>/` | cached WiX toolset |
/// | `build/tmp/` | intermediate objects, wiped per architecture |
/// | `output/` | signed installers |
#[derive(Clone, Debug)]
pub struct Settings {
    /// Package metadata.
    package: PackageSettings,

    /// Architectures to build, in order.
    arches: Vec<Arch>,

    /// Root for all relative paths.
    working_dir: PathBuf,

    /// Signing and WiX configuration.
    windows: WindowsSettings,
}

impl Settings {
    /// Returns the product name.
    pub fn product_name(&self) -> &str {
        &self.package.product_name
    }

    /// Returns the version string.
    pub fn version_string(&self) -> &str {
        &self.package.version
    }

    /// Returns the package metadata.
    pub fn package(&self) -> &PackageSettings {
        &self.package
    }

    /// Returns the architectures to build.
    pub fn arches(&self) -> &[Arch] {
        &self.arches
    }

    /// Returns the working directory.
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Directory for the decoded signing certificate.
    pub fn private_dir(&self) -> PathBuf {
        self.working_dir.join("private")
    }

    /// Root of the toolset cache.
    pub fn build_dir(&self) -> PathBuf {
        self.working_dir.join("build")
    }

    /// Scratch directory for intermediate WiX objects.
    pub fn tmp_dir(&self) -> PathBuf {
        self.build_dir().join("tmp")
    }

    /// Directory receiving the signed installers.
    pub fn output_dir(&self) -> PathBuf {
        self.working_dir.join("output")
    }

    /// Returns the Windows settings.
    pub fn windows(&self) -> &WindowsSettings {
        &self.windows
    }

    /// Returns the WiX settings.
    pub fn wix(&self) -> &WixSettings {
        &self.windows.wix
    }

    pub(super) fn new(
        package: PackageSettings,
        arches: Vec<Arch>,
        working_dir: PathBuf,
        windows: WindowsSettings,
    ) -> Self {
        Self {
            package,
            arches,
            working_dir,
            windows,
        }
    }
}
