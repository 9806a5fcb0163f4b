//! Code signing setup and certificate management.
//!
//! CI provides the signing certificate as a base64 PKCS#12 blob plus its
//! password. It is decoded to `private/<cert name>.pfx` and imported into
//! the machine store with certutil so signtool can find it by name.

use crate::bundler::{
    Result, Settings,
    error::{Context, ErrorExt},
    utils::{fs, process},
};
use base64::Engine;
use std::{
    ffi::OsString,
    fmt,
    path::{Path, PathBuf},
};

/// Environment variable holding the base64 PKCS#12 certificate.
pub const PFX_ENV: &str = "CODE_SIGN_PFX";

/// Environment variable holding the certificate password.
pub const PFX_PASSWORD_ENV: &str = "CODE_SIGN_PFX_PASSWORD";

/// Signing certificate as delivered by CI.
#[derive(Clone)]
pub struct CertificateSecret {
    pfx_base64: String,
    password: String,
}

impl CertificateSecret {
    /// Returns `None` if either value is empty.
    pub fn new(pfx_base64: impl Into<String>, password: impl Into<String>) -> Option<Self> {
        let pfx_base64 = pfx_base64.into();
        let password = password.into();
        if pfx_base64.is_empty() || password.is_empty() {
            return None;
        }
        Some(Self {
            pfx_base64,
            password,
        })
    }

    /// Decodes the PKCS#12 bytes.
    pub fn decode(&self) -> Result<Vec<u8>> {
        base64::engine::general_purpose::STANDARD
            .decode(self.pfx_base64.trim())
            .map_err(crate::bundler::Error::from)
            .context(format!("Cannot parse {PFX_ENV}"))
    }
}

impl fmt::Debug for CertificateSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CertificateSecret")
            .field("pfx_base64", &format_args!("<{} chars>", self.pfx_base64.len()))
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Scratch location of the decoded certificate.
pub fn pfx_path(settings: &Settings) -> PathBuf {
    settings
        .private_dir()
        .join(format!("{}.pfx", settings.windows().cert_name))
}

/// Arguments for `certutil` importing `pfx` into the machine store.
pub fn certutil_args(password: &str, pfx: &Path) -> Vec<OsString> {
    vec![
        "-f".into(),
        "-p".into(),
        password.into(),
        "-importpfx".into(),
        pfx.as_os_str().to_os_string(),
    ]
}

/// Writes the certificate to disk and imports it with certutil.
///
/// Returns the path the `.pfx` was written to.
pub async fn import_certificate(settings: &Settings, secret: &CertificateSecret) -> Result<PathBuf> {
    let data = secret.decode()?;

    let private_dir = settings.private_dir();
    fs::create_dir_all(&private_dir, false).await?;

    let pfx = pfx_path(settings);
    tokio::fs::write(&pfx, &data)
        .await
        .fs_context("writing certificate", &pfx)
        .context(format!("Cannot save {PFX_ENV}"))?;
    log::debug!("Wrote {} byte certificate to {}", data.len(), pfx.display());

    log::info!("Importing certificate from {} environment variable", PFX_ENV);
    process::run_redacted(
        Path::new("certutil"),
        &certutil_args(&secret.password, &pfx),
        &[&secret.password],
    )
    .await
    .context("Error when loading cert")?;

    log::info!("✓ Certificate imported");
    Ok(pfx)
}
