//! Build configuration file.
//!
//! An optional TOML file supplies project-specific defaults so the CLI
//! invocation in a release pipeline stays short. Every value is optional;
//! command line flags override it.
//!
//! ```toml
//! product_name = "litermc-certificate-installer"
//! arches = ["x64"]
//!
//! [wix]
//! source = "installer/windows/Product.wxs"
//! localization = "installer/windows/Product.Loc-en.wxl"
//! candle_extensions = ["WixIIsExtension"]
//! light_extensions = ["WixUIExtension", "WixUtilExtension", "WixIIsExtension"]
//!
//! [signing]
//! cert_name = "LiterMC-CodeSign"
//! timestamp_url = "http://timestamp.digicert.com"
//! ```

use crate::bundler::Arch;
use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Parsed build configuration file.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Product name used in artifact file names.
    pub product_name: Option<String>,

    /// Architectures to build.
    pub arches: Option<Vec<Arch>>,

    /// `[wix]` table.
    pub wix: WixConfig,

    /// `[signing]` table.
    pub signing: SigningConfig,
}

/// `[wix]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WixConfig {
    pub source: Option<PathBuf>,
    pub localization: Option<PathBuf>,
    pub candle_extensions: Option<Vec<String>>,
    pub light_extensions: Option<Vec<String>>,
}

/// `[signing]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SigningConfig {
    pub cert_name: Option<String>,
    pub timestamp_url: Option<String>,
    pub signtool: Option<PathBuf>,
    pub sdk_bin_dir: Option<PathBuf>,
}

/// Parses configuration from TOML text.
pub fn parse_config(text: &str) -> Result<BuildConfig> {
    Ok(toml::from_str(text)?)
}

/// Reads and parses the configuration file at `path`.
pub fn load_config(path: &Path) -> Result<BuildConfig> {
    let text = std::fs::read_to_string(path).map_err(|e| CliError::InvalidArguments {
        reason: format!("Failed to read {}: {}", path.display(), e),
    })?;
    log::debug!("Loaded build configuration from {}", path.display());
    parse_config(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        let config = parse_config("").unwrap();
        assert!(config.product_name.is_none());
        assert!(config.arches.is_none());
        assert!(config.wix.source.is_none());
    }

    #[test]
    fn parses_full_file() {
        let config = parse_config(
            r#"
            product_name = "demo"
            arches = ["x64", "x86"]

            [wix]
            source = "wix/Main.wxs"
            light_extensions = ["WixUIExtension"]

            [signing]
            cert_name = "Demo-CodeSign"
            timestamp_url = "http://ts.example"
            "#,
        )
        .unwrap();

        assert_eq!(config.product_name.as_deref(), Some("demo"));
        assert_eq!(config.arches, Some(vec![Arch::X64, Arch::X86]));
        assert_eq!(config.wix.source, Some(PathBuf::from("wix/Main.wxs")));
        assert_eq!(
            config.wix.light_extensions,
            Some(vec!["WixUIExtension".to_string()])
        );
        assert_eq!(config.signing.cert_name.as_deref(), Some("Demo-CodeSign"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(parse_config("prodcut_name = \"typo\"").is_err());
    }

    #[test]
    fn unknown_arch_is_rejected() {
        assert!(parse_config("arches = [\"sparc\"]").is_err());
    }

    #[test]
    fn missing_file_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let err = load_config(&tmp.path().join("wix-msi.toml")).unwrap_err();
        assert!(err.to_string().contains("wix-msi.toml"));
    }
}
