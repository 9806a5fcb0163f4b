//! Command line interface for the MSI builder.
//!
//! Resolves arguments, environment and the optional config file into
//! [`Settings`] once, then drives the bundler.

mod args;

pub use args::{Args, DEFAULT_PRODUCT_NAME};

use crate::bundler::{
    Arch, Bundler, PackageSettings, Settings, SettingsBuilder, WindowsSettings, build_version,
    import_certificate,
};
use crate::config::{BuildConfig, load_config};
use crate::error::Result;
use chrono::{DateTime, Utc};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute(args, Utc::now()).await
}

/// Runs the whole pipeline for parsed `args`, stamping the build with `now`.
pub async fn execute(args: Args, now: DateTime<Utc>) -> Result<i32> {
    args.validate()?;
    let secret = args.certificate_secret()?;

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => BuildConfig::default(),
    };
    let settings = build_settings(&args, config, now)?;

    match &secret {
        Some(secret) => {
            import_certificate(&settings, secret).await?;
        }
        None => log::warn!("Skipping certificate import"),
    }

    log::info!("wix version: {}", settings.version_string());

    let bundler = Bundler::new(settings)?;
    let artifacts = bundler.bundle().await?;

    for artifact in &artifacts {
        println!(
            "{}  {} ({} bytes)",
            artifact.sha256,
            artifact.path.display(),
            artifact.size
        );
    }

    Ok(0)
}

/// Merges CLI flags over config file values over defaults.
pub fn build_settings(args: &Args, config: BuildConfig, now: DateTime<Utc>) -> Result<Settings> {
    let BuildConfig {
        product_name,
        arches,
        wix: wix_config,
        signing,
    } = config;

    let arches = if !args.arches.is_empty() {
        args.arches.clone()
    } else {
        arches.unwrap_or_else(|| vec![Arch::X64])
    };

    let product_name = args
        .product_name
        .clone()
        .or(product_name)
        .unwrap_or_else(|| DEFAULT_PRODUCT_NAME.to_string());

    let mut windows = WindowsSettings::default();
    if let Some(cert_name) = args.cert_name.clone().or(signing.cert_name) {
        windows.cert_name = cert_name;
    }
    windows.timestamp_url = args.timestamp_url.clone().or(signing.timestamp_url);
    windows.signtool_path = args.signtool.clone().or(signing.signtool);
    if let Some(dir) = args.sdk_bin_dir.clone().or(signing.sdk_bin_dir) {
        windows.sdk_bin_dir = dir;
    }

    let wix = &mut windows.wix;
    if let Some(source) = wix_config.source {
        wix.source = source;
    }
    if let Some(localization) = wix_config.localization {
        wix.localization = localization;
    }
    if let Some(extensions) = wix_config.candle_extensions {
        wix.candle_extensions = extensions;
    }
    if let Some(extensions) = wix_config.light_extensions {
        wix.light_extensions = extensions;
    }

    Ok(SettingsBuilder::new()
        .working_dir(&args.working_dir)
        .package_settings(PackageSettings {
            product_name,
            version: build_version(now),
        })
        .arches(arches)
        .windows_settings(windows)
        .build()?)
}
