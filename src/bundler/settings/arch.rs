//! CPU architecture types and utilities.

use std::fmt;

/// Target architecture of an MSI package.
///
/// The set is closed: each variant maps to a WiX `-arch` value, and the
/// toolset release used to build it is looked up per variant.
///
/// # Examples
///
/// ```
/// use wix_msi_builder::bundler::Arch;
///
/// assert_eq!(Arch::X64.as_str(), "x64");
/// assert_eq!(Arch::X64.to_string(), "x64");
/// ```
#[derive(
    Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    /// x86_64 / AMD64 (64-bit)
    X64,
    /// x86 / i686 (32-bit)
    X86,
    /// ARM64 (64-bit)
    Arm64,
}

impl Arch {
    /// Architecture string understood by `candle.exe -arch`.
    pub fn as_str(self) -> &'static str {
        match self {
            Arch::X64 => "x64",
            Arch::X86 => "x86",
            Arch::Arm64 => "arm64",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
