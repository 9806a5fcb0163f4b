//! File system utilities for bundling.
//!
//! Provides idempotent directory handling, artifact copying and the
//! fixed-permission writes used when unpacking the WiX toolset.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::{io, path::Path};
use tokio::fs;

/// Permission bits for files unpacked from the toolset archive.
#[cfg(unix)]
pub const EXTRACTED_FILE_MODE: u32 = 0o644;

/// Creates all of the directories of the specified path, erasing it first if specified.
pub async fn create_dir_all(path: &Path, erase: bool) -> Result<()> {
    if erase {
        remove_dir_all(path).await?;
    }

    // create_dir_all is already idempotent - succeeds even if dir exists
    fs::create_dir_all(path)
        .await
        .fs_context("creating directory", path)
}

/// Removes the directory and its contents if it exists.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()), // Idempotent
        Err(e) => Err(Error::Fs {
            context: "removing directory",
            path: path.to_path_buf(),
            error: e,
        }),
    }
}

/// Copies a regular file from one path to another, creating any parent
/// directories of the destination path as necessary.
///
/// Fails if the source path is a directory or doesn't exist. A partially
/// written destination is removed.
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        return Err(Error::GenericError(format!("{from:?} does not exist")));
    }
    if !from.is_file() {
        return Err(Error::GenericError(format!("{from:?} is not a file")));
    }
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir)
            .await
            .fs_context("creating destination directory", dest_dir)?;
    }
    if let Err(e) = fs::copy(from, to).await {
        let _ = fs::remove_file(to).await;
        return Err(Error::Fs {
            context: "copying file to",
            path: to.to_path_buf(),
            error: e,
        });
    }
    Ok(())
}

/// Writes `contents` to `path` synchronously and applies
/// [`EXTRACTED_FILE_MODE`] on unix. Existing files are truncated.
///
/// Only used from blocking contexts (archive extraction runs in
/// `spawn_blocking`).
pub fn write_extracted_file(path: &Path, contents: &[u8]) -> Result<()> {
    std::fs::write(path, contents).fs_context("writing extracted file", path)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(EXTRACTED_FILE_MODE))
            .fs_context("setting permissions on", path)?;
    }

    Ok(())
}
