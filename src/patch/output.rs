//! Post-build fixes applied to the static output directory.

use crate::detection::DetectionResult;
use crate::fs::{FileSystem, RealFileSystem};
use crate::stack::ToolchainId;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Marker that turns off the host's own Jekyll processing
pub const NOJEKYLL: &str = ".nojekyll";
pub const PRIMARY_DOCUMENT: &str = "index.html";
/// Served by the host for unknown paths; a copy of the primary document lets
/// client-side routers handle deep links
pub const FALLBACK_DOCUMENT: &str = "404.html";

#[derive(Debug, Error)]
pub enum FinalizeError {
    #[error("Build output directory not found: {} (did the build run?)", .0.display())]
    OutputDirMissing(PathBuf),

    #[error("Failed to update {}: {reason}", .path.display())]
    Io { path: PathBuf, reason: String },
}

impl FinalizeError {
    fn io(path: &Path, err: anyhow::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            reason: format!("{:#}", err),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnsureOutcome {
    Created,
    AlreadyPresent,
    Removed,
    /// Precondition not met or not applicable to the toolchain
    Skipped,
}

impl fmt::Display for EnsureOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EnsureOutcome::Created => "created",
            EnsureOutcome::AlreadyPresent => "already present",
            EnsureOutcome::Removed => "removed",
            EnsureOutcome::Skipped => "skipped",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalizeReport {
    pub output_dir: PathBuf,
    pub nojekyll: EnsureOutcome,
    pub spa_fallback: EnsureOutcome,
}

pub struct OutputFinalizer {
    fs: Arc<dyn FileSystem>,
}

impl OutputFinalizer {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Creates an empty `.nojekyll` in `output_dir` unless one exists
    pub fn ensure_nojekyll(&self, output_dir: &Path) -> Result<EnsureOutcome, FinalizeError> {
        self.require_dir(output_dir)?;
        let marker = output_dir.join(NOJEKYLL);
        if self.fs.exists(&marker) {
            return Ok(EnsureOutcome::AlreadyPresent);
        }

        self.fs
            .write(&marker, b"")
            .map_err(|e| FinalizeError::io(&marker, e))?;
        info!(path = %marker.display(), "Created .nojekyll marker");
        Ok(EnsureOutcome::Created)
    }

    /// Copies `index.html` to `404.html`. An existing `404.html` is the
    /// site's own and is never overwritten.
    pub fn ensure_spa_fallback(&self, output_dir: &Path) -> Result<EnsureOutcome, FinalizeError> {
        self.require_dir(output_dir)?;
        let fallback = output_dir.join(FALLBACK_DOCUMENT);
        if self.fs.exists(&fallback) {
            return Ok(EnsureOutcome::AlreadyPresent);
        }

        let primary = output_dir.join(PRIMARY_DOCUMENT);
        if !self.fs.is_file(&primary) {
            debug!(path = %primary.display(), "No primary document, skipping SPA fallback");
            return Ok(EnsureOutcome::Skipped);
        }

        self.fs
            .copy(&primary, &fallback)
            .map_err(|e| FinalizeError::io(&fallback, e))?;
        info!(path = %fallback.display(), "Created SPA fallback document");
        Ok(EnsureOutcome::Created)
    }

    /// Jekyll sites are built by the host, which a stale marker would disable
    pub fn clear_nojekyll(&self, repo_root: &Path) -> Result<EnsureOutcome, FinalizeError> {
        let marker = repo_root.join(NOJEKYLL);
        if !self.fs.is_file(&marker) {
            return Ok(EnsureOutcome::Skipped);
        }

        self.fs
            .remove_file(&marker)
            .map_err(|e| FinalizeError::io(&marker, e))?;
        info!(path = %marker.display(), "Removed .nojekyll marker");
        Ok(EnsureOutcome::Removed)
    }

    pub fn finalize(
        &self,
        repo_root: &Path,
        result: &DetectionResult,
    ) -> Result<FinalizeReport, FinalizeError> {
        let output_dir = Self::output_dir(repo_root, &result.output_dir);
        self.finalize_dir(repo_root, &output_dir, result.toolchain)
    }

    /// Like [`finalize`](Self::finalize) with an explicit output directory
    pub fn finalize_dir(
        &self,
        repo_root: &Path,
        output_dir: &Path,
        toolchain: ToolchainId,
    ) -> Result<FinalizeReport, FinalizeError> {
        if toolchain == ToolchainId::Jekyll {
            return Ok(FinalizeReport {
                output_dir: output_dir.to_path_buf(),
                nojekyll: self.clear_nojekyll(repo_root)?,
                spa_fallback: EnsureOutcome::Skipped,
            });
        }

        let nojekyll = self.ensure_nojekyll(output_dir)?;
        let spa_fallback = if toolchain.is_spa() {
            self.ensure_spa_fallback(output_dir)?
        } else {
            EnsureOutcome::Skipped
        };

        Ok(FinalizeReport {
            output_dir: output_dir.to_path_buf(),
            nojekyll,
            spa_fallback,
        })
    }

    fn output_dir(repo_root: &Path, relative: &str) -> PathBuf {
        if relative.is_empty() || relative == "." {
            repo_root.to_path_buf()
        } else {
            repo_root.join(relative)
        }
    }

    fn require_dir(&self, dir: &Path) -> Result<(), FinalizeError> {
        if self.fs.is_dir(dir) {
            Ok(())
        } else {
            Err(FinalizeError::OutputDirMissing(dir.to_path_buf()))
        }
    }
}

impl Default for OutputFinalizer {
    fn default() -> Self {
        Self::new(Arc::new(RealFileSystem::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;

    fn finalizer(files: &[(&str, &str)]) -> (OutputFinalizer, Arc<MockFileSystem>) {
        let fs = Arc::new(MockFileSystem::new());
        for (name, content) in files {
            fs.add_file(name, content);
        }
        (OutputFinalizer::new(fs.clone()), fs)
    }

    #[test]
    fn test_ensure_nojekyll_idempotent() {
        let (finalizer, fs) = finalizer(&[("dist/index.html", "<html></html>")]);
        let dist = fs.root().join("dist");

        assert_eq!(
            finalizer.ensure_nojekyll(&dist).unwrap(),
            EnsureOutcome::Created
        );
        assert_eq!(fs.read_to_string(&dist.join(NOJEKYLL)).unwrap(), "");
        assert_eq!(
            finalizer.ensure_nojekyll(&dist).unwrap(),
            EnsureOutcome::AlreadyPresent
        );
    }

    #[test]
    fn test_spa_fallback_copies_index() {
        let (finalizer, fs) = finalizer(&[("dist/index.html", "<div id=app></div>")]);
        let dist = fs.root().join("dist");

        assert_eq!(
            finalizer.ensure_spa_fallback(&dist).unwrap(),
            EnsureOutcome::Created
        );
        assert_eq!(
            fs.read_to_string(&dist.join(FALLBACK_DOCUMENT)).unwrap(),
            "<div id=app></div>"
        );
    }

    #[test]
    fn test_spa_fallback_keeps_existing_404() {
        let (finalizer, fs) = finalizer(&[
            ("dist/index.html", "index"),
            ("dist/404.html", "custom not found"),
        ]);
        let dist = fs.root().join("dist");

        assert_eq!(
            finalizer.ensure_spa_fallback(&dist).unwrap(),
            EnsureOutcome::AlreadyPresent
        );
        assert_eq!(
            fs.read_to_string(&dist.join(FALLBACK_DOCUMENT)).unwrap(),
            "custom not found"
        );
    }

    #[test]
    fn test_spa_fallback_without_index() {
        let (finalizer, fs) = finalizer(&[("dist/app.js", "")]);
        assert_eq!(
            finalizer
                .ensure_spa_fallback(&fs.root().join("dist"))
                .unwrap(),
            EnsureOutcome::Skipped
        );
    }

    #[test]
    fn test_missing_output_dir() {
        let (finalizer, fs) = finalizer(&[]);
        let err = finalizer
            .ensure_nojekyll(&fs.root().join("dist"))
            .unwrap_err();
        assert!(matches!(err, FinalizeError::OutputDirMissing(_)));
    }

    #[test]
    fn test_finalize_spa() {
        let (finalizer, fs) = finalizer(&[("dist/index.html", "index")]);
        let result = DetectionResult::new(ToolchainId::VueVite);

        let report = finalizer.finalize(fs.root(), &result).unwrap();
        assert_eq!(report.output_dir, fs.root().join("dist"));
        assert_eq!(report.nojekyll, EnsureOutcome::Created);
        assert_eq!(report.spa_fallback, EnsureOutcome::Created);
    }

    #[test]
    fn test_finalize_static_site_uses_repo_root() {
        let (finalizer, fs) = finalizer(&[("index.html", "hello")]);
        let result = DetectionResult::new(ToolchainId::Static);

        let report = finalizer.finalize(fs.root(), &result).unwrap();
        assert_eq!(report.output_dir, fs.root().to_path_buf());
        assert_eq!(report.nojekyll, EnsureOutcome::Created);
        assert_eq!(report.spa_fallback, EnsureOutcome::Skipped);
        assert!(!fs.exists(&fs.root().join(FALLBACK_DOCUMENT)));
    }

    #[test]
    fn test_finalize_jekyll_clears_marker() {
        let (finalizer, fs) = finalizer(&[("_config.yml", "title: x"), (".nojekyll", "")]);
        let result = DetectionResult::new(ToolchainId::Jekyll);

        let report = finalizer.finalize(fs.root(), &result).unwrap();
        assert_eq!(report.nojekyll, EnsureOutcome::Removed);
        assert!(!fs.exists(&fs.root().join(NOJEKYLL)));

        let report = finalizer.finalize(fs.root(), &result).unwrap();
        assert_eq!(report.nojekyll, EnsureOutcome::Skipped);
    }

    #[test]
    fn test_report_serialization() {
        let report = FinalizeReport {
            output_dir: PathBuf::from("/repo/public"),
            nojekyll: EnsureOutcome::AlreadyPresent,
            spa_fallback: EnsureOutcome::Skipped,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["outputDir"], "/repo/public");
        assert_eq!(json["nojekyll"], "already-present");
        assert_eq!(json["spaFallback"], "skipped");
    }
}
