//! Authenticode signing with signtool.
//!
//! The certificate is looked up by subject name in the machine store
//! (`/sm /n`), so it must have been imported before signing.

use crate::bundler::{
    error::Result,
    settings::WindowsSettings,
    utils::{fs, process},
};
use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

/// A located signtool together with the identity it signs with.
#[derive(Clone, Debug)]
pub struct SignTool {
    path: PathBuf,
    cert_name: String,
    timestamp_url: Option<String>,
}

impl SignTool {
    /// Signs with the certificate and timestamp server from `settings`.
    pub fn new(path: PathBuf, settings: &WindowsSettings) -> Self {
        Self {
            path,
            cert_name: settings.cert_name.clone(),
            timestamp_url: settings.timestamp_url.clone(),
        }
    }

    /// Location of `signtool.exe`.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Arguments for signing `file` in place.
    pub fn sign_args(&self, file: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "sign".into(),
            "/sm".into(),
            "/n".into(),
            (&self.cert_name).into(),
        ];
        if let Some(url) = &self.timestamp_url {
            args.push("/tr".into());
            args.push(url.into());
            args.push("/td".into());
            args.push("SHA256".into());
        }
        args.push("/fd".into());
        args.push("SHA256".into());
        args.push(file.as_os_str().to_os_string());
        args
    }

    /// Copies `input` to `output` (unless they are the same path) and signs
    /// `output`.
    pub async fn sign_file(&self, input: &Path, output: &Path) -> Result<()> {
        log::info!("Signing {} ...", output.display());

        if input != output {
            fs::copy_file(input, output).await?;
        }

        process::run(&self.path, &self.sign_args(output)).await
    }
}
