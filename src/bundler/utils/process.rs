//! External process execution.
//!
//! Tools run with inherited stdout/stderr so their output streams straight
//! to the operator. A non-zero exit is an error.

use crate::bundler::error::{Error, Result};
use std::{
    ffi::OsString,
    path::Path,
    process::Stdio,
};

/// Runs `program` with `args`, echoing the command line first.
pub async fn run(program: &Path, args: &[OsString]) -> Result<()> {
    run_redacted(program, args, &[]).await
}

/// Like [`run`], but any argument equal to one of `secrets` is masked in the
/// echoed command line.
pub async fn run_redacted(program: &Path, args: &[OsString], secrets: &[&str]) -> Result<()> {
    log::info!("$ {}", display_command(program, args, secrets));

    let command = program.display().to_string();
    let status = tokio::process::Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await
        .map_err(|error| Error::CommandFailed {
            command: command.clone(),
            error,
        })?;

    if !status.success() {
        return Err(Error::ProcessFailed {
            command,
            code: status.code(),
        });
    }

    Ok(())
}

/// Renders a command line for logging, masking secret arguments.
pub fn display_command(program: &Path, args: &[OsString], secrets: &[&str]) -> String {
    let mut line = program.display().to_string();
    for arg in args {
        line.push(' ');
        let arg = arg.to_string_lossy();
        if secrets.iter().any(|s| !s.is_empty() && *s == arg) {
            line.push_str("********");
        } else {
            line.push_str(&arg);
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn os(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    #[test]
    fn display_masks_secrets() {
        let line = display_command(
            Path::new("certutil"),
            &os(&["-f", "-p", "hunter2", "-importpfx", "private/x.pfx"]),
            &["hunter2"],
        );
        assert_eq!(line, "certutil -f -p ******** -importpfx private/x.pfx");
    }

    #[test]
    fn display_without_secrets_is_verbatim() {
        let line = display_command(Path::new("light.exe"), &os(&["-b", "."]), &[]);
        assert_eq!(line, "light.exe -b .");
    }

    #[tokio::test]
    async fn missing_program_is_command_failed() {
        let err = run(Path::new("definitely-not-a-real-tool-4711"), &[])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::CommandFailed { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn nonzero_exit_is_process_failed() {
        let err = run(Path::new("false"), &[]).await.unwrap_err();
        assert!(matches!(err, Error::ProcessFailed { code: Some(1), .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn zero_exit_is_ok() {
        run(Path::new("true"), &[]).await.unwrap();
    }
}
