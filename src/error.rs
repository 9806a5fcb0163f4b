//! Top-level error types for the command line tool.
//!
//! Library failures surface as [`crate::bundler::Error`]; this module adds
//! the configuration and argument errors that only exist at the CLI edge.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, BuildError>;

/// Main error type for a build run
#[derive(Error, Debug)]
pub enum BuildError {
    /// CLI argument and environment errors
    #[error(transparent)]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Bundler errors
    #[error(transparent)]
    Bundler(#[from] crate::bundler::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Signing secrets absent from the environment
    #[error("Either CODE_SIGN_PFX or CODE_SIGN_PFX_PASSWORD was empty")]
    MissingSigningSecrets,
}
