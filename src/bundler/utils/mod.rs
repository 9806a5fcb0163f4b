//! Shared helpers for the bundler: filesystem, HTTP and process execution.

pub mod fs;
pub mod http;
pub mod process;
