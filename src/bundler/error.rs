//! Error types for bundling operations.
//!
//! [`Error`] covers every way the MSI pipeline can fail: configuration,
//! transport, integrity, filesystem and external tool failures. Helper traits
//! attach context to results without losing the underlying cause.

use std::{
    fmt::Display,
    io,
    path::{Path, PathBuf},
};
use thiserror::Error as DeriveError;

/// Result type alias for bundler operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the bundler.
#[derive(Debug, DeriveError)]
#[non_exhaustive]
pub enum Error {
    /// Error with an attached context message.
    #[error("{0}: {1}")]
    Context(String, Box<Self>),

    /// Free-form error.
    #[error("{0}")]
    GenericError(String),

    /// Bare I/O error.
    #[error(transparent)]
    IoError(#[from] io::Error),

    /// Filesystem error tied to a specific path.
    #[error("{context} {}: {error}", path.display())]
    Fs {
        /// What was being attempted.
        context: &'static str,
        /// Path involved.
        path: PathBuf,
        /// Underlying error.
        error: io::Error,
    },

    /// External command could not be spawned.
    #[error("failed to run command {command}: {error}")]
    CommandFailed {
        /// Command name.
        command: String,
        /// Spawn error.
        error: io::Error,
    },

    /// External command exited unsuccessfully.
    #[error("{command} exited with {}", code.map_or_else(|| "signal".to_string(), |c| format!("status {c}")))]
    ProcessFailed {
        /// Command name.
        command: String,
        /// Exit code, `None` when terminated by a signal.
        code: Option<i32>,
    },

    /// HTTP transport failure.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with something other than 200.
    #[error("Unexpected http status {status} for {url}")]
    HttpStatus {
        /// Requested URL.
        url: String,
        /// Status code received.
        status: u16,
    },

    /// Downloaded payload does not match its pinned digest.
    #[error("Hash mismatch, expect {expected}, got {actual}")]
    HashMismatch {
        /// Digest recorded for the release.
        expected: String,
        /// Digest of the bytes received.
        actual: String,
    },

    /// Malformed toolset archive.
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Invalid base64 input.
    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Architecture without a configured toolset release.
    #[error("Architecture error: {0}")]
    ArchError(String),

    /// Required external tool is missing.
    #[error("{0}")]
    ToolNotFound(String),
}

impl Error {
    /// True when the error came from a failed transfer rather than bad bytes.
    pub fn is_transport(&self) -> bool {
        match self {
            Self::Http(_) | Self::HttpStatus { .. } => true,
            Self::Context(_, inner) => inner.is_transport(),
            _ => false,
        }
    }

    /// True when the error is a checksum mismatch.
    pub fn is_integrity(&self) -> bool {
        match self {
            Self::HashMismatch { .. } => true,
            Self::Context(_, inner) => inner.is_integrity(),
            _ => false,
        }
    }
}

/// Attach a context message to a result or option.
pub trait Context<T> {
    /// Wrap the error with `context`.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;

    /// Wrap the error with a lazily built context.
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T> Context<T> for Result<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|e| Error::Context(context.to_string(), Box::new(e)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| Error::Context(f().to_string(), Box::new(e)))
    }
}

impl<T> Context<T> for Option<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.ok_or_else(|| Error::GenericError(f().to_string()))
    }
}

/// Attach a filesystem action and path to I/O errors.
pub trait ErrorExt<T> {
    /// Convert into [`Error::Fs`].
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Return early with a [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::bundler::Error::GenericError(format!($msg)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($fmt, $($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_mismatch_names_both_digests() {
        let err = Error::HashMismatch {
            expected: "aa".into(),
            actual: "bb".into(),
        };
        assert_eq!(err.to_string(), "Hash mismatch, expect aa, got bb");
        assert!(err.is_integrity());
        assert!(!err.is_transport());
    }

    #[test]
    fn context_preserves_error_kind() {
        let res: Result<()> = Err(Error::HttpStatus {
            url: "http://x/wix.zip".into(),
            status: 404,
        });
        let err = res.context("installing WiX").unwrap_err();
        assert!(err.is_transport());
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn process_failure_reports_code() {
        let err = Error::ProcessFailed {
            command: "light.exe".into(),
            code: Some(2),
        };
        assert_eq!(err.to_string(), "light.exe exited with status 2");
    }
}
