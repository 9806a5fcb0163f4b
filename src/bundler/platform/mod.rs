//! Platform-specific bundlers.

pub mod windows;
