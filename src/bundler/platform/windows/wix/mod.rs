//! Windows MSI installer creation with the WiX v3 toolset.
//!
//! # Module Organization
//!
//! - `toolset` - cached, checksum-verified WiX download
//! - `build` - candle/light execution
//! - `utils` - timestamp-derived product version

mod build;
mod toolset;
mod utils;

pub use build::{candle_args, light_args, unsigned_msi_path, wixobj_path};
pub use toolset::{INSTALLED_MARKER, WixRelease, WixToolset, default_releases};
pub use utils::build_version;

use super::sign::SignTool;
use crate::bundler::{
    error::{Context, Result},
    settings::{Arch, Settings},
    utils::{fs, http::Fetch},
};
use std::path::PathBuf;

/// Build and sign the MSI for one architecture.
///
/// # Process
///
/// 1. Provide the WiX toolset (cache hit or verified download)
/// 2. Wipe and recreate `build/tmp/`
/// 3. Compile with candle
/// 4. Link with light into `<product>-<arch>.unsigned.msi`
/// 5. Copy to `output/<product>-<arch>.msi` and sign it there
///
/// # Returns
///
/// Path of the signed installer.
pub async fn bundle_project<F: Fetch>(
    settings: &Settings,
    arch: Arch,
    toolset: &WixToolset<F>,
    signtool: &SignTool,
) -> Result<PathBuf> {
    log::info!("Building {} MSI for {}", arch, settings.product_name());

    let wix_dir = toolset
        .provide(arch)
        .await
        .context("Error when installing wix")?;

    let tmp_dir = settings.tmp_dir();
    fs::create_dir_all(&tmp_dir, true)
        .await
        .context("Error when preparing app files")?;

    let wixobj = build::run_candle(&wix_dir, settings, arch).await?;
    let unsigned = build::run_light(&wix_dir, settings, arch, &wixobj).await?;

    let output = settings
        .output_dir()
        .join(format!("{}.msi", settings.package().artifact_stem(arch)));
    signtool
        .sign_file(&unsigned, &output)
        .await
        .context("Error when signing")?;

    log::info!("✓ Created MSI installer: {}", output.display());

    Ok(output)
}
