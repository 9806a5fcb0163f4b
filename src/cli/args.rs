//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap. Signing secrets are
//! read from the environment through clap's `env` support and never echoed.

use crate::bundler::{Arch, CertificateSecret, PFX_ENV, PFX_PASSWORD_ENV};
use crate::error::CliError;
use clap::Parser;
use std::path::PathBuf;

/// Product name used when neither the CLI nor the config file sets one.
pub const DEFAULT_PRODUCT_NAME: &str = "litermc-certificate-installer";

/// Windows MSI release builder
#[derive(Parser, Debug)]
#[command(
    name = "wix_msi_builder",
    version,
    about = "Builds and signs Windows MSI installers with WiX",
    long_about = "Builds one signed MSI per architecture.

Imports the code signing certificate from CODE_SIGN_PFX / CODE_SIGN_PFX_PASSWORD,
downloads and verifies the WiX toolset into build/ (once), compiles and links
installer/windows/Product.wxs, and signs the result into output/.

Usage:
  wix_msi_builder
  wix_msi_builder --arch x64 --timestamp-url http://timestamp.digicert.com
  wix_msi_builder --config wix-msi.toml --skip-cert-import

Exit code 0 = every installer was built and signed."
)]
pub struct Args {
    /// Architecture to build (repeatable). Default: x64
    #[arg(short, long = "arch", value_enum, value_name = "ARCH")]
    pub arches: Vec<Arch>,

    /// Product name, prefix of the produced MSI files
    #[arg(short, long, value_name = "NAME")]
    pub product_name: Option<String>,

    /// Subject name of the code signing certificate
    #[arg(long, value_name = "NAME")]
    pub cert_name: Option<String>,

    /// Explicit signtool.exe path (skips SDK discovery)
    #[arg(long, value_name = "PATH")]
    pub signtool: Option<PathBuf>,

    /// Windows SDK bin directory scanned for signtool
    #[arg(long, value_name = "DIR")]
    pub sdk_bin_dir: Option<PathBuf>,

    /// RFC 3161 timestamp server for signatures
    #[arg(long, value_name = "URL")]
    pub timestamp_url: Option<String>,

    /// Build configuration file (TOML)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory containing installer/, build/ and output/
    #[arg(short = 'C', long, value_name = "DIR", default_value = ".")]
    pub working_dir: PathBuf,

    /// Do not import a certificate; it must already be in the store
    #[arg(long)]
    pub skip_cert_import: bool,

    /// Base64-encoded PKCS#12 signing certificate
    #[arg(long, env = PFX_ENV, hide_env_values = true, hide = true)]
    pub pfx: Option<String>,

    /// Password of the PKCS#12 certificate
    #[arg(long, env = PFX_PASSWORD_ENV, hide_env_values = true, hide = true)]
    pub pfx_password: Option<String>,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), CliError> {
        if self
            .product_name
            .as_deref()
            .is_some_and(|name| name.trim().is_empty())
        {
            return Err(CliError::InvalidArguments {
                reason: "Product name cannot be empty".to_string(),
            });
        }

        if self.skip_cert_import {
            return Ok(());
        }
        self.certificate_secret().map(|_| ())
    }

    /// The signing certificate from the environment.
    ///
    /// Returns `Ok(None)` when certificate import is skipped.
    pub fn certificate_secret(&self) -> Result<Option<CertificateSecret>, CliError> {
        if self.skip_cert_import {
            return Ok(None);
        }
        let pfx = self.pfx.clone().unwrap_or_default();
        let password = self.pfx_password.clone().unwrap_or_default();
        CertificateSecret::new(pfx, password)
            .map(Some)
            .ok_or(CliError::MissingSigningSecrets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("wix_msi_builder").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn arches_are_repeatable() {
        let args = parse(&["--arch", "x64", "-a", "x86", "--pfx", "A", "--pfx-password", "p"]);
        assert_eq!(args.arches, vec![Arch::X64, Arch::X86]);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn unknown_arch_is_a_parse_error() {
        let res = Args::try_parse_from(["wix_msi_builder", "--arch", "sparc"]);
        assert!(res.is_err());
    }

    #[test]
    fn missing_password_is_rejected() {
        let args = parse(&["--pfx", "AAAA", "--pfx-password", ""]);
        let err = args.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Either CODE_SIGN_PFX or CODE_SIGN_PFX_PASSWORD was empty"
        );
    }

    #[test]
    fn skip_cert_import_needs_no_secrets() {
        let args = parse(&["--skip-cert-import"]);
        assert!(args.validate().is_ok());
        assert!(args.certificate_secret().unwrap().is_none());
    }

    #[test]
    fn empty_product_name_is_rejected() {
        let args = parse(&["--skip-cert-import", "--product-name", " "]);
        assert!(args.validate().is_err());
    }
}
