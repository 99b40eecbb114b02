//! Evidence gathered from a repository root for classification
//!
//! Everything the rules look at is collected up front in one pass: the root
//! entry names, the parsed `package.json` and the lock files present. Rules are
//! then pure functions of this value. The Hugo config is only read once the
//! Hugo case has won, see [`scan_hugo_base_url`].

use super::types::DetectionError;
use crate::fs::FileSystem;
use crate::stack::{LockFile, PackageManagerId, HUGO_CONFIGS, LOCK_FILES};
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const MANIFEST_FILE: &str = "package.json";

/// The subset of `package.json` the classifier reads
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    #[serde(default)]
    pub dependencies: Option<BTreeMap<String, Value>>,

    #[serde(default)]
    pub dev_dependencies: Option<BTreeMap<String, Value>>,

    #[serde(default)]
    pub scripts: Option<BTreeMap<String, Value>>,
}

impl PackageManifest {
    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Runtime and development dependencies merged; a dev entry replaces a
    /// runtime entry of the same name.
    pub fn merged_dependencies(&self) -> BTreeMap<String, Value> {
        let mut merged = BTreeMap::new();
        for deps in [&self.dependencies, &self.dev_dependencies].into_iter().flatten() {
            for (name, version) in deps {
                merged.insert(name.clone(), version.clone());
            }
        }
        merged
    }

    pub fn build_script(&self) -> Option<&str> {
        self.scripts.as_ref()?.get("build")?.as_str()
    }
}

#[derive(Debug, Clone)]
pub struct Evidence {
    root: PathBuf,
    entries: BTreeSet<String>,
    manifest: Option<PackageManifest>,
    dependencies: BTreeMap<String, Value>,
    build_script: String,
    lock_files: Vec<LockFile>,
    hugo_marker: Option<&'static str>,
}

impl Evidence {
    /// Collect evidence from `root`.
    ///
    /// A manifest that exists but cannot be read or parsed is an error, never
    /// treated as absent.
    pub fn gather(fs: &dyn FileSystem, root: &Path) -> Result<Self, DetectionError> {
        if !fs.exists(root) {
            return Err(DetectionError::PathNotFound(root.to_path_buf()));
        }
        if !fs.is_dir(root) {
            return Err(DetectionError::NotADirectory(root.to_path_buf()));
        }

        let entries: BTreeSet<String> = fs
            .read_dir(root)
            .map_err(|e| DetectionError::evidence_read(root, format!("{:#}", e)))?
            .into_iter()
            .map(|entry| entry.name)
            .collect();
        debug!(count = entries.len(), "Read repository root entries");

        let manifest = if entries.contains(MANIFEST_FILE) {
            let path = root.join(MANIFEST_FILE);
            let content = fs
                .read_to_string(&path)
                .map_err(|e| DetectionError::evidence_read(&path, format!("{:#}", e)))?;
            let manifest = PackageManifest::parse(&content)
                .map_err(|e| DetectionError::evidence_read(&path, e))?;
            Some(manifest)
        } else {
            None
        };

        let dependencies = manifest
            .as_ref()
            .map(PackageManifest::merged_dependencies)
            .unwrap_or_default();
        let build_script = manifest
            .as_ref()
            .and_then(PackageManifest::build_script)
            .unwrap_or_default()
            .to_string();

        let lock_files: Vec<LockFile> = LOCK_FILES
            .iter()
            .filter(|lock| entries.contains(lock.filename))
            .copied()
            .collect();
        if lock_files.len() > 1 {
            warn!(
                lock_files = ?lock_files.iter().map(|l| l.filename).collect::<Vec<_>>(),
                "Multiple lock files present, using the highest-priority one"
            );
        }

        let hugo_marker = HUGO_CONFIGS
            .iter()
            .copied()
            .find(|name| entries.contains(*name));

        Ok(Self {
            root: root.to_path_buf(),
            entries,
            manifest,
            dependencies,
            build_script,
            lock_files,
            hugo_marker,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether an entry of this name exists at the repository root
    pub fn has(&self, name: &str) -> bool {
        self.entries.contains(name)
    }

    pub fn has_manifest(&self) -> bool {
        self.manifest.is_some()
    }

    pub fn manifest(&self) -> Option<&PackageManifest> {
        self.manifest.as_ref()
    }

    pub fn has_dependency(&self, name: &str) -> bool {
        self.dependencies.contains_key(name)
    }

    pub fn dependencies(&self) -> &BTreeMap<String, Value> {
        &self.dependencies
    }

    /// Text of the `build` script, empty when there is none
    pub fn build_script(&self) -> &str {
        &self.build_script
    }

    /// Recognized lock files present, in priority order
    pub fn lock_files(&self) -> &[LockFile] {
        &self.lock_files
    }

    /// Package manager of the highest-priority lock file, npm when none
    pub fn package_manager(&self) -> PackageManagerId {
        self.lock_files
            .first()
            .map(|lock| lock.package_manager)
            .unwrap_or(PackageManagerId::Npm)
    }

    /// Hugo config file present at the root, `hugo.toml` first
    pub fn hugo_marker(&self) -> Option<&'static str> {
        self.hugo_marker
    }

    /// First candidate present at the root
    pub fn first_existing(&self, candidates: &[&'static str]) -> Option<&'static str> {
        candidates.iter().copied().find(|name| self.has(name))
    }

    /// Human-readable notes about ambiguous evidence
    pub fn warnings(&self) -> Vec<String> {
        if self.lock_files.len() > 1 {
            let names: Vec<&str> = self.lock_files.iter().map(|l| l.filename).collect();
            vec![format!(
                "Multiple lock files found ({}); using {} from {}",
                names.join(", "),
                self.package_manager(),
                names[0]
            )]
        } else {
            Vec::new()
        }
    }
}

/// Case-insensitive `baseURL` substring check on a Hugo config file. The file
/// is never parsed as TOML.
pub fn scan_hugo_base_url(
    fs: &dyn FileSystem,
    root: &Path,
    filename: &str,
) -> Result<bool, DetectionError> {
    let path = root.join(filename);
    let content = fs
        .read_to_string(&path)
        .map_err(|e| DetectionError::evidence_read(&path, format!("{:#}", e)))?;
    Ok(content.to_lowercase().contains("baseurl"))
}
