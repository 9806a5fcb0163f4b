//! wix_msi_builder - build and sign Windows MSI installers with WiX.
//!
//! Exits with 0 when every requested installer was built and signed, and
//! with 1 after printing the first error otherwise.

use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging, `info` unless RUST_LOG says otherwise
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Run CLI and get exit code
    let exit_code = match wix_msi_builder::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
