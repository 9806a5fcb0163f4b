//! Windows installer bundling: WiX MSI creation and Authenticode signing.

pub mod sign;
pub mod wix;
