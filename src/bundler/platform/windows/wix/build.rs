//! WiX compile and link execution.
//!
//! `candle.exe` compiles the installer definition into a `.wixobj` under
//! `build/tmp/`, and `light.exe` links it into an unsigned MSI next to it.

use crate::bundler::{
    error::{Context, Result},
    settings::{Arch, Settings},
    utils::process,
};
use std::{
    ffi::OsString,
    path::{MAIN_SEPARATOR, Path, PathBuf},
};

/// Path of the object `candle.exe` writes for the configured source.
pub fn wixobj_path(settings: &Settings) -> Result<PathBuf> {
    let stem = settings
        .wix()
        .source
        .file_stem()
        .context("WiX source has no file name")?;
    let mut name = stem.to_os_string();
    name.push(".wixobj");
    Ok(settings.tmp_dir().join(name))
}

/// Path of the unsigned MSI produced by `light.exe` for `arch`.
pub fn unsigned_msi_path(settings: &Settings, arch: Arch) -> PathBuf {
    settings
        .tmp_dir()
        .join(format!("{}.unsigned.msi", settings.package().artifact_stem(arch)))
}

/// Arguments for `candle.exe`.
pub fn candle_args(settings: &Settings, arch: Arch) -> Vec<OsString> {
    let wix = settings.wix();

    // A trailing separator tells candle that -out names a directory.
    let mut out_dir = settings.tmp_dir().into_os_string();
    out_dir.push(MAIN_SEPARATOR.to_string());

    let mut source_dir = OsString::from("-dSourceDir=");
    source_dir.push(settings.working_dir());

    let mut args: Vec<OsString> = vec![
        "-nologo".into(),
        "-arch".into(),
        arch.as_str().into(),
        format!("-dBuildVersion={}", settings.version_string()).into(),
        source_dir,
    ];
    for ext in &wix.candle_extensions {
        args.push("-ext".into());
        args.push(ext.into());
    }
    args.push("-out".into());
    args.push(out_dir);
    args.push(settings.working_dir().join(&wix.source).into_os_string());
    args
}

/// Arguments for `light.exe`.
pub fn light_args(settings: &Settings, wixobj: &Path, msi: &Path) -> Vec<OsString> {
    let wix = settings.wix();

    let mut args: Vec<OsString> = vec![
        "-b".into(),
        settings.working_dir().as_os_str().to_os_string(),
        "-nologo".into(),
        "-dcl:high".into(),
    ];
    for ext in &wix.light_extensions {
        args.push("-ext".into());
        args.push(ext.into());
    }
    args.push("-loc".into());
    args.push(settings.working_dir().join(&wix.localization).into_os_string());
    args.push(wixobj.as_os_str().to_os_string());
    args.push("-o".into());
    args.push(msi.as_os_str().to_os_string());
    args
}

/// Compile the installer definition. Returns the `.wixobj` path.
pub async fn run_candle(wix_dir: &Path, settings: &Settings, arch: Arch) -> Result<PathBuf> {
    let candle = wix_dir.join("candle.exe");
    process::run(&candle, &candle_args(settings, arch))
        .await
        .context("wix candle exited")?;
    wixobj_path(settings)
}

/// Link the compiled object into an MSI. Returns the unsigned MSI path.
pub async fn run_light(
    wix_dir: &Path,
    settings: &Settings,
    arch: Arch,
    wixobj: &Path,
) -> Result<PathBuf> {
    let light = wix_dir.join("light.exe");
    let msi = unsigned_msi_path(settings, arch);
    process::run(&light, &light_args(settings, wixobj, &msi))
        .await
        .context("wix light exited")?;
    Ok(msi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::{PackageSettings, SettingsBuilder};

    fn settings() -> Settings {
        SettingsBuilder::new()
            .working_dir(".")
            .package_settings(PackageSettings {
                product_name: "litermc-certificate-installer".into(),
                version: "1.20.10692.480".into(),
            })
            .arches(vec![Arch::X64])
            .build()
            .unwrap()
    }

    fn strings(args: Vec<OsString>) -> Vec<String> {
        args.into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn candle_gets_arch_version_and_extensions() {
        let s = settings();
        let args = strings(candle_args(&s, Arch::X64));

        assert_eq!(&args[..3], ["-nologo", "-arch", "x64"]);
        assert!(args.contains(&"-dBuildVersion=1.20.10692.480".to_string()));
        assert!(args.contains(&"-dSourceDir=.".to_string()));
        let ext = args.iter().position(|a| a == "-ext").unwrap();
        assert_eq!(args[ext + 1], "WixIIsExtension");
        let out = args.iter().position(|a| a == "-out").unwrap();
        assert!(args[out + 1].ends_with(MAIN_SEPARATOR));
        assert!(args.last().unwrap().ends_with("Product.wxs"));
    }

    #[test]
    fn light_links_object_into_named_msi() {
        let s = settings();
        let wixobj = wixobj_path(&s).unwrap();
        let msi = unsigned_msi_path(&s, Arch::X64);
        let args = strings(light_args(&s, &wixobj, &msi));

        assert_eq!(&args[..4], ["-b", ".", "-nologo", "-dcl:high"]);
        let exts: Vec<_> = args
            .windows(2)
            .filter(|w| w[0] == "-ext")
            .map(|w| w[1].as_str())
            .collect();
        assert_eq!(
            exts,
            ["WixUIExtension", "WixUtilExtension", "WixIIsExtension"]
        );
        assert!(wixobj.ends_with("Product.wixobj"));
        assert!(
            args.last()
                .unwrap()
                .ends_with("litermc-certificate-installer-x64.unsigned.msi")
        );
        assert_eq!(args[args.len() - 2], "-o");
    }
}
