//! Package metadata and configuration.

/// Package metadata shared by every architecture built in one run.
///
/// # Examples
///
/// ```
/// use wix_msi_builder::bundler::PackageSettings;
///
/// let settings = PackageSettings {
///     product_name: "litermc-certificate-installer".into(),
///     version: "1.20.10292.754".into(),
/// };
/// assert_eq!(settings.artifact_stem(wix_msi_builder::bundler::Arch::X64),
///            "litermc-certificate-installer-x64");
/// ```
#[derive(Debug, Clone, Default)]
pub struct PackageSettings {
    /// Product name; prefix of every produced MSI file name.
    pub product_name: String,

    /// Four-part MSI version passed to `candle.exe` as `BuildVersion`.
    pub version: String,
}

impl PackageSettings {
    /// File stem for the installer built for `arch`.
    pub fn artifact_stem(&self, arch: super::Arch) -> String {
        format!("{}-{}", self.product_name, arch)
    }
}
