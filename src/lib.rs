//! Windows MSI release builder library
//!
//! Builds one signed installer per architecture:
//! - imports the code signing certificate into the machine store
//! - provisions a SHA-256 verified WiX toolset, cached under `build/`
//! - compiles and links the installer with `candle.exe` / `light.exe`
//! - signs the MSI with signtool and records its checksum
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod config;
pub mod error;

// Re-export commonly used types
pub use error::{BuildError, CliError, Result};
