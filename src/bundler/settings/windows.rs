//! Windows platform-specific settings.

use std::path::PathBuf;

/// Default base directory scanned for Windows SDK versions.
pub const DEFAULT_SDK_BIN_DIR: &str = r"C:\Program Files (x86)\Windows Kits\10\bin";

/// Default certificate subject name used by signtool `/n`.
pub const DEFAULT_CERT_NAME: &str = "LiterMC-CodeSign";

/// Windows signing configuration.
///
/// Signing always uses a certificate already present in the machine store
/// (`signtool sign /sm /n <cert_name>`); the certificate is imported from
/// the `CODE_SIGN_PFX` secret at the start of a run.
#[derive(Clone, Debug)]
pub struct WindowsSettings {
    /// Subject name of the code signing certificate.
    ///
    /// Also used as the file stem of the scratch `.pfx` under `private/`.
    pub cert_name: String,

    /// RFC 3161 timestamp server.
    ///
    /// Default: None (signatures are not timestamped)
    pub timestamp_url: Option<String>,

    /// Explicit signtool path, skipping discovery.
    pub signtool_path: Option<PathBuf>,

    /// Directory holding versioned SDK `bin` folders.
    pub sdk_bin_dir: PathBuf,

    /// WiX MSI installer settings.
    pub wix: WixSettings,
}

impl Default for WindowsSettings {
    fn default() -> Self {
        Self {
            cert_name: DEFAULT_CERT_NAME.to_string(),
            timestamp_url: None,
            signtool_path: None,
            sdk_bin_dir: PathBuf::from(DEFAULT_SDK_BIN_DIR),
            wix: WixSettings::default(),
        }
    }
}

/// WiX MSI installer configuration.
///
/// Paths are relative to the working directory the tool runs in.
///
/// # Configuration
///
/// ```toml
/// [wix]
/// source = "installer/windows/Product.wxs"
/// localization = "installer/windows/Product.Loc-en.wxl"
/// candle_extensions = ["WixIIsExtension"]
/// light_extensions = ["WixUIExtension", "WixUtilExtension", "WixIIsExtension"]
/// ```
#[derive(Clone, Debug)]
pub struct WixSettings {
    /// Installer definition compiled by `candle.exe`.
    pub source: PathBuf,

    /// Localization file passed to `light.exe -loc`.
    pub localization: PathBuf,

    /// Extensions loaded by `candle.exe`.
    pub candle_extensions: Vec<String>,

    /// Extensions loaded by `light.exe`.
    pub light_extensions: Vec<String>,
}

impl Default for WixSettings {
    fn default() -> Self {
        let installer_dir = PathBuf::from("installer").join("windows");
        Self {
            source: installer_dir.join("Product.wxs"),
            localization: installer_dir.join("Product.Loc-en.wxl"),
            candle_extensions: vec!["WixIIsExtension".to_string()],
            light_extensions: vec![
                "WixUIExtension".to_string(),
                "WixUtilExtension".to_string(),
                "WixIIsExtension".to_string(),
            ],
        }
    }
}
