use crate::config::DeployConfig;
use crate::stack::{PackageManagerId, ToolchainId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Placeholder sub-path baked into build commands that take the base path as a
/// flag. Replaced by [`DetectionResult::build_command_for`].
pub const BASE_PATH_PLACEHOLDER: &str = "/repo-name/";

/// Errors that prevent classification from completing.
///
/// A broken repository must never be reported as an unsupported one, so these
/// are kept apart from the `Ok(None)` "no match" outcome.
#[derive(Debug, Error)]
pub enum DetectionError {
    #[error("Repository path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("Repository path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Failed to read {}: {reason}", .path.display())]
    EvidenceRead { path: PathBuf, reason: String },
}

impl DetectionError {
    pub fn evidence_read(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        Self::EvidenceRead {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// The classifier's single output: one case from the fixed catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    pub case: String,

    #[serde(rename = "type")]
    pub toolchain: ToolchainId,

    pub package_manager: Option<PackageManagerId>,

    /// `None` when the site is served as-is or built by the host
    pub build_command: Option<String>,

    pub output_dir: String,

    pub base_url_note: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_file: Option<String>,

    /// Hugo only: whether the config file already mentions a base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url_configured: Option<bool>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl DetectionResult {
    pub fn new(toolchain: ToolchainId) -> Self {
        Self {
            case: toolchain.case_label().to_string(),
            toolchain,
            package_manager: None,
            build_command: None,
            output_dir: toolchain.output_dir().to_string(),
            base_url_note: toolchain.base_url_note().to_string(),
            config_file: None,
            base_url_configured: None,
            warnings: Vec::new(),
        }
    }

    pub fn with_package_manager(mut self, package_manager: PackageManagerId) -> Self {
        self.package_manager = Some(package_manager);
        self
    }

    pub fn with_build_command(mut self, command: impl Into<String>) -> Self {
        self.build_command = Some(command.into());
        self
    }

    pub fn with_config_file(mut self, config_file: Option<&str>) -> Self {
        self.config_file = config_file.map(str::to_string);
        self
    }

    pub fn with_base_url_configured(mut self, configured: bool) -> Self {
        self.base_url_configured = Some(configured);
        self
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings.extend(warnings);
        self
    }

    /// Build command with the base-path placeholder replaced by the deployed
    /// sub-path.
    pub fn build_command_for(&self, config: &DeployConfig) -> Option<String> {
        self.build_command.as_ref().map(|cmd| {
            cmd.replace(BASE_PATH_PLACEHOLDER, &config.base_path_with_trailing_slash())
        })
    }
}

impl fmt::Display for DetectionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "case {} ({}) -> {}",
            self.case,
            self.toolchain.name(),
            self.output_dir
        )
    }
}
