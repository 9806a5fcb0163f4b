//! Bundle orchestration and coordination.
//!
//! - [`checksum`] - SHA256 checksum calculation for artifacts
//! - [`orchestrator`] - Main [`Bundler`] struct and bundling operations
//! - [`signing`] - Certificate import from CI secrets
//! - [`tool_detection`] - signtool discovery

pub mod checksum;
mod orchestrator;
pub mod signing;
pub mod tool_detection;

pub use orchestrator::Bundler;
