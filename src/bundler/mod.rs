//! Windows MSI bundler.
//!
//! Builds an MSI per architecture with a cached WiX toolset, signs it with
//! signtool and reports its SHA-256.
//!
//! # Pipeline
//!
//! 1. Import the signing certificate ([`import_certificate`])
//! 2. Derive the build version from the start time ([`build_version`])
//! 3. Locate signtool ([`find_signtool`])
//! 4. Per architecture: provide WiX, candle, light, sign
//!
//! Every step aborts the run on the first error.

mod builder;
pub mod error;
pub mod platform;
mod settings;
pub mod utils;

pub use builder::{
    Bundler,
    checksum::{calculate_sha256, write_checksum_file},
    signing::{CertificateSecret, PFX_ENV, PFX_PASSWORD_ENV, import_certificate},
    tool_detection::{SdkCandidate, find_signtool, scan_sdk_bin_dir, select_sdk_version},
};
pub use error::{Error, Result};
pub use platform::windows::{
    sign::SignTool,
    wix::{INSTALLED_MARKER, WixRelease, WixToolset, build_version},
};
pub use settings::{
    Arch, DEFAULT_CERT_NAME, DEFAULT_SDK_BIN_DIR, PackageSettings, Settings, SettingsBuilder,
    WindowsSettings, WixSettings,
};
pub use utils::http::{DigestBuffer, Fetch, HttpFetcher};

use std::path::PathBuf;

/// A signed installer produced by [`Bundler::bundle`].
#[derive(Clone, Debug)]
pub struct BuiltArtifact {
    /// Architecture it was built for.
    pub arch: Arch,
    /// Location under `output/`.
    pub path: PathBuf,
    /// Size in bytes.
    pub size: u64,
    /// Hex-encoded SHA-256.
    pub sha256: String,
}
