//! Identifiers for the fixed catalogue of toolchains and package managers

#[macro_use]
mod id_enum_macro;

pub mod package_manager;
pub mod toolchain_id;

pub use package_manager::{LockFile, PackageManagerId, LOCK_FILES};
pub use toolchain_id::{ToolchainId, HUGO_CONFIGS};
