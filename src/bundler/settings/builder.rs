//! Builder for constructing Settings.

use super::{Arch, PackageSettings, Settings, WindowsSettings};
use crate::bundler::error::{Context, Result};
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// # Examples
///
/// ```
/// use wix_msi_builder::bundler::{Arch, PackageSettings, SettingsBuilder};
///
/// # fn example() -> wix_msi_builder::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .working_dir(".")
///     .package_settings(PackageSettings {
///         product_name: "MyApp".into(),
///         version: "1.20.10292.754".into(),
///     })
///     .arches(vec![Arch::X64])
///     .build()?;
/// assert_eq!(settings.arches(), &[Arch::X64]);
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    working_dir: Option<PathBuf>,
    package_settings: Option<PackageSettings>,
    arches: Vec<Arch>,
    windows_settings: WindowsSettings,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the directory all relative build paths hang off.
    ///
    /// Default: `.`
    pub fn working_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.working_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets package metadata.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn package_settings(mut self, settings: PackageSettings) -> Self {
        self.package_settings = Some(settings);
        self
    }

    /// Sets the architectures to build. Duplicates are dropped, order kept.
    pub fn arches(mut self, arches: Vec<Arch>) -> Self {
        self.arches = arches;
        self
    }

    /// Sets signing and WiX configuration.
    ///
    /// Default: [`WindowsSettings::default`]
    pub fn windows_settings(mut self, settings: WindowsSettings) -> Self {
        self.windows_settings = settings;
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// - `package_settings` missing
    /// - empty product name, version or certificate name
    /// - no architectures
    pub fn build(self) -> Result<Settings> {
        let package = self
            .package_settings
            .context("package_settings is required")?;

        if package.product_name.trim().is_empty() {
            crate::bail!("product name cannot be empty");
        }
        if package.version.trim().is_empty() {
            crate::bail!("version cannot be empty");
        }
        if self.windows_settings.cert_name.trim().is_empty() {
            crate::bail!("certificate name cannot be empty");
        }

        let mut arches = Vec::with_capacity(self.arches.len());
        for arch in self.arches {
            if !arches.contains(&arch) {
                arches.push(arch);
            }
        }
        if arches.is_empty() {
            crate::bail!("at least one architecture is required");
        }

        Ok(Settings::new(
            package,
            arches,
            self.working_dir.unwrap_or_else(|| PathBuf::from(".")),
            self.windows_settings,
        ))
    }
}
