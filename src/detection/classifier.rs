use super::evidence::{scan_hugo_base_url, Evidence};
use super::rules::RuleSet;
use super::types::{DetectionError, DetectionResult};
use crate::fs::{FileSystem, RealFileSystem};
use crate::stack::ToolchainId;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Maps a repository checkout to exactly one catalogue case, or no match.
///
/// Reads evidence once per call and never mutates the tree, so repeated calls
/// on an unchanged checkout return equal results.
pub struct Classifier {
    fs: Arc<dyn FileSystem>,
    rules: RuleSet,
}

impl Classifier {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self::with_rules(fs, RuleSet::with_defaults())
    }

    pub fn with_rules(fs: Arc<dyn FileSystem>, rules: RuleSet) -> Self {
        Self { fs, rules }
    }

    /// `Ok(None)` is the legitimate "no match" outcome; unreadable evidence is
    /// always an `Err`.
    pub fn classify(&self, repo_root: &Path) -> Result<Option<DetectionResult>, DetectionError> {
        let evidence = Evidence::gather(self.fs.as_ref(), repo_root)?;
        let Some(mut result) = self.classify_evidence(&evidence) else {
            return Ok(None);
        };

        // Only a Hugo result needs the config contents
        if result.toolchain == ToolchainId::Hugo {
            if let Some(filename) = evidence.hugo_marker() {
                let configured = scan_hugo_base_url(self.fs.as_ref(), repo_root, filename)?;
                result = result.with_base_url_configured(configured);
            }
        }
        Ok(Some(result))
    }

    pub fn classify_evidence(&self, evidence: &Evidence) -> Option<DetectionResult> {
        let Some(rule) = self.rules.first_match(evidence) else {
            debug!(root = %evidence.root().display(), "No rule matched");
            return None;
        };
        debug!(rule = rule.name(), "Rule matched");

        let result = rule.resolve(evidence);
        match &result {
            Some(result) => info!(
                case = %result.case,
                toolchain = %result.toolchain,
                "Detected {}",
                result.toolchain.name()
            ),
            None => info!(rule = rule.name(), "Classification ended without a match"),
        }
        result
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(Arc::new(RealFileSystem::new()))
    }
}

/// Classify a checkout on the real file system
pub fn classify(repo_root: &Path) -> Result<Option<DetectionResult>, DetectionError> {
    Classifier::default().classify(repo_root)
}
