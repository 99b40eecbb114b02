use super::strategy::{PatchFamily, StrategyError, TextPatch};
use crate::config::DeployConfig;
use crate::fs::{FileSystem, RealFileSystem};
use crate::stack::ToolchainId;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum PatchError {
    #[error("No {family} config file found (looked for {})", .candidates.join(", "))]
    ConfigFileMissing {
        family: PatchFamily,
        candidates: Vec<String>,
    },

    #[error(
        "Could not find where to set the base path in {}: expected {anchor}. Set it manually.",
        .file.display()
    )]
    PatternNotFound { file: PathBuf, anchor: &'static str },

    #[error("{family} needs the {requires} to set '{key}'. Set REPO_OWNER or pass --owner")]
    MissingContext {
        family: PatchFamily,
        key: &'static str,
        requires: &'static str,
    },

    #[error("Failed to access {}: {reason}", .path.display())]
    Io { path: PathBuf, reason: String },

    #[error("Internal pattern error: {0}")]
    Pattern(String),
}

impl PatchError {
    fn io(path: &Path, err: impl fmt::Display) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            reason: err.to_string(),
        }
    }

    fn from_strategy(err: StrategyError, file: &Path) -> Self {
        match err {
            StrategyError::AnchorNotFound { anchor } => Self::PatternNotFound {
                file: file.to_path_buf(),
                anchor,
            },
            StrategyError::MissingContext {
                family,
                key,
                requires,
            } => Self::MissingContext {
                family,
                key,
                requires,
            },
            StrategyError::Pattern(reason) => Self::Pattern(reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum PatchOutcome {
    Written {
        file: PathBuf,
        inserted: Vec<String>,
    },
    AlreadySet {
        file: PathBuf,
    },
    NotRequired {
        toolchain: ToolchainId,
    },
}

impl fmt::Display for PatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchOutcome::Written { file, inserted } => {
                write!(f, "set {} in {}", inserted.join(", "), file.display())
            }
            PatchOutcome::AlreadySet { file } => {
                write!(f, "base path already set in {}", file.display())
            }
            PatchOutcome::NotRequired { toolchain } => {
                write!(f, "no config change needed for {}", toolchain)
            }
        }
    }
}

/// Config file a family's options go into; looked up fresh on every call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchTarget {
    pub family: PatchFamily,
    pub path: PathBuf,
}

/// Rewrites a toolchain's build config so assets resolve under a sub-path
pub struct ConfigPatcher {
    fs: Arc<dyn FileSystem>,
}

impl ConfigPatcher {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    pub fn resolve_target(
        &self,
        repo_root: &Path,
        family: PatchFamily,
    ) -> Result<PatchTarget, PatchError> {
        let candidates = family.candidates();
        candidates
            .iter()
            .map(|name| repo_root.join(name))
            .find(|path| self.fs.is_file(path))
            .map(|path| PatchTarget { family, path })
            .ok_or_else(|| PatchError::ConfigFileMissing {
                family,
                candidates: candidates.iter().map(|c| c.to_string()).collect(),
            })
    }

    /// Inserts the family's base-path options into the first existing config
    /// candidate. Options already present are left alone, so repeated calls
    /// write at most once.
    pub fn inject_base_path(
        &self,
        repo_root: &Path,
        toolchain: ToolchainId,
        config: &DeployConfig,
    ) -> Result<PatchOutcome, PatchError> {
        let Some(family) = PatchFamily::for_toolchain(toolchain) else {
            debug!(%toolchain, "No config patch needed");
            return Ok(PatchOutcome::NotRequired { toolchain });
        };

        let target = self.resolve_target(repo_root, family)?;
        debug!(family = %family, file = %target.path.display(), "Resolved patch target");

        let source = self
            .fs
            .read_to_string(&target.path)
            .map_err(|e| PatchError::io(&target.path, format!("{:#}", e)))?;

        let strategy = family
            .strategy()
            .map_err(|e| PatchError::from_strategy(e, &target.path))?;

        match strategy
            .apply(&source, config)
            .map_err(|e| PatchError::from_strategy(e, &target.path))?
        {
            TextPatch::Unchanged => {
                info!(file = %target.path.display(), "Base path already configured");
                Ok(PatchOutcome::AlreadySet { file: target.path })
            }
            TextPatch::Patched { text, inserted } => {
                self.fs
                    .write(&target.path, text.as_bytes())
                    .map_err(|e| PatchError::io(&target.path, format!("{:#}", e)))?;
                info!(
                    file = %target.path.display(),
                    options = ?inserted,
                    base_path = %config.base_path(),
                    "Injected base path"
                );
                Ok(PatchOutcome::Written {
                    file: target.path,
                    inserted: inserted.into_iter().map(String::from).collect(),
                })
            }
        }
    }
}

impl Default for ConfigPatcher {
    fn default() -> Self {
        Self::new(Arc::new(RealFileSystem::new()))
    }
}
