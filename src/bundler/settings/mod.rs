//! Configuration structures for a build run.
//!
//! [`Settings`] is assembled once by the CLI layer through
//! [`SettingsBuilder`] and passed by reference to every pipeline step.

mod arch;
mod builder;
mod core;
mod package;
mod windows;

pub use arch::Arch;
pub use builder::SettingsBuilder;
pub use core::Settings;
pub use package::PackageSettings;
pub use windows::{DEFAULT_CERT_NAME, DEFAULT_SDK_BIN_DIR, WindowsSettings, WixSettings};
