//! External tool detection.
//!
//! signtool ships inside versioned Windows SDK folders
//! (`<sdk bin>\10.0.22621.0\x64\signtool.exe`). The newest folder that
//! actually contains the tool wins.

use crate::bundler::{
    error::{Error, ErrorExt, Result},
    settings::WindowsSettings,
};
use std::{
    io,
    path::{Path, PathBuf},
};

/// File name of the signing tool.
pub const SIGNTOOL_EXE: &str = "signtool.exe";

/// One entry of an SDK `bin` directory listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SdkCandidate {
    /// Directory name, e.g. `10.0.22621.0`.
    pub name: String,
    /// Whether `<name>\x64\signtool.exe` exists as a file.
    pub has_signtool: bool,
}

impl SdkCandidate {
    fn matches_version_pattern(&self) -> bool {
        self.name.starts_with("10.") && self.name.ends_with(".0")
    }
}

/// Picks the SDK version to take signtool from.
///
/// Only names shaped like `10.*.0` that contain signtool are considered;
/// among those the greatest name by plain string order is returned.
pub fn select_sdk_version(candidates: &[SdkCandidate]) -> Option<&SdkCandidate> {
    candidates
        .iter()
        .filter(|c| c.matches_version_pattern() && c.has_signtool)
        .max_by(|a, b| a.name.cmp(&b.name))
}

/// Path of signtool inside an SDK version folder.
pub fn signtool_in(sdk_bin_dir: &Path, version: &str) -> PathBuf {
    sdk_bin_dir.join(version).join("x64").join(SIGNTOOL_EXE)
}

/// Lists the subdirectories of `sdk_bin_dir` as candidates.
///
/// A missing base directory yields an empty list.
pub fn scan_sdk_bin_dir(sdk_bin_dir: &Path) -> Result<Vec<SdkCandidate>> {
    let entries = match std::fs::read_dir(sdk_bin_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(Error::Fs {
                context: "reading SDK directory",
                path: sdk_bin_dir.to_path_buf(),
                error: e,
            });
        }
    };

    let mut candidates = Vec::new();
    for entry in entries {
        let entry = entry.fs_context("reading SDK directory", sdk_bin_dir)?;
        if !entry.file_type().is_ok_and(|t| t.is_dir()) {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            continue;
        };
        let has_signtool = signtool_in(sdk_bin_dir, &name).is_file();
        candidates.push(SdkCandidate { name, has_signtool });
    }
    Ok(candidates)
}

/// Locates signtool.
///
/// Resolution order: explicit `signtool_path`, newest SDK folder under
/// `sdk_bin_dir`, then `signtool.exe` on `PATH`.
pub fn find_signtool(settings: &WindowsSettings) -> Result<PathBuf> {
    if let Some(path) = &settings.signtool_path {
        if path.is_file() {
            return Ok(path.clone());
        }
        return Err(Error::ToolNotFound(format!(
            "signtool not found at {}",
            path.display()
        )));
    }

    let candidates = scan_sdk_bin_dir(&settings.sdk_bin_dir)?;
    log::debug!(
        "Found {} SDK folders under {}",
        candidates.len(),
        settings.sdk_bin_dir.display()
    );
    if let Some(sdk) = select_sdk_version(&candidates) {
        return Ok(signtool_in(&settings.sdk_bin_dir, &sdk.name));
    }

    match which::which(SIGNTOOL_EXE) {
        Ok(path) => {
            log::debug!("Using {} from PATH", path.display());
            Ok(path)
        }
        Err(_) => Err(Error::ToolNotFound("No signtool was found".into())),
    }
}
