//! pagesmith - static-site toolchain detection for sub-path hosting
//!
//! Static sites hosted under a path prefix (`https://owner.github.io/<repo>/`)
//! break unless their build is told about the prefix. This library classifies
//! a repository into one of a fixed catalogue of front-end toolchains, tells
//! the caller how to build it, injects the sub-path into the toolchain's config
//! file, and fixes up the build output afterwards.
//!
//! # Core Concepts
//!
//! - **Classification**: an ordered rule list evaluated against evidence
//!   gathered once from the repository root; the first matching rule decides
//! - **Patching**: a pure text insertion per config-file family, applied only
//!   for options not already present
//! - **Finalizing**: `.nojekyll` and SPA `404.html` fallbacks in the output
//!
//! # Example Usage
//!
//! ```no_run
//! use pagesmith::{Classifier, ConfigPatcher, DeployConfig};
//! use std::path::Path;
//!
//! let repo = Path::new(".");
//! let Some(result) = Classifier::default().classify(repo)? else {
//!     eprintln!("unsupported repository");
//!     return Ok(());
//! };
//! println!("case {} builds with {:?}", result.case, result.build_command);
//!
//! let config = DeployConfig::from_env()?;
//! let outcome = ConfigPatcher::default().inject_base_path(repo, result.toolchain, &config)?;
//! println!("{}", outcome);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Project Structure
//!
//! - [`detection`]: evidence gathering, rules and the classifier
//! - [`patch`]: base-path injection and output finalizing
//! - [`stack`]: toolchain and package-manager identifiers
//! - [`fs`]: file-system abstraction with an in-memory mock
//! - [`config`]: deployment context
//! - [`cli`]: command-line surface

pub mod cli;
pub mod config;
pub mod detection;
pub mod fs;
pub mod patch;
pub mod stack;
pub mod util;

pub use config::{ConfigError, DeployConfig};
pub use detection::{classify, Classifier, DetectionError, DetectionResult};
pub use patch::{
    ConfigPatcher, EnsureOutcome, FinalizeError, FinalizeReport, OutputFinalizer, PatchError,
    PatchFamily, PatchOutcome,
};
pub use stack::{PackageManagerId, ToolchainId};
pub use util::{init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
