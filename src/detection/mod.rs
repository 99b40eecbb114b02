//! Toolchain classification
//!
//! [`Classifier`] gathers [`Evidence`] from a repository root and evaluates the
//! ordered [`RuleSet`]; the first matching rule yields the [`DetectionResult`].

pub mod classifier;
pub mod evidence;
pub mod rules;
pub mod types;

pub use classifier::{classify, Classifier};
pub use evidence::{scan_hugo_base_url, Evidence, PackageManifest};
pub use rules::{BuildStyle, DependencyRule, DetectionRule, RuleSet};
pub use types::{DetectionError, DetectionResult, BASE_PATH_PLACEHOLDER};
