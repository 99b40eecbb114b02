//! Deployment context for sub-path hosting
//!
//! The patcher needs to know which sub-path the site will be served under and,
//! for absolute site URLs, which account owns the pages domain. Both are read
//! once from the environment (or CLI flags) and passed explicitly to the
//! components that need them.
//!
//! # Environment Variables
//!
//! - `PAGESMITH_REPO_NAME`, then `REPO_NAME`: sub-path value (the repository name)
//! - `PAGESMITH_REPO_OWNER`, then `REPO_OWNER`, then `GITHUB_REPOSITORY_OWNER`:
//!   owning account
//! - `GITHUB_REPOSITORY` (`owner/name`): fallback for both
//!
//! # Example
//!
//! ```
//! use pagesmith::DeployConfig;
//!
//! let config = DeployConfig::new("my-site").with_owner("alice");
//! config.validate().unwrap();
//!
//! assert_eq!(config.base_path(), "/my-site");
//! assert_eq!(config.site_url().as_deref(), Some("https://alice.github.io"));
//! ```

use std::collections::BTreeMap;
use std::env;
use thiserror::Error;

const PAGES_DOMAIN: &str = "github.io";

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// No sub-path value could be found
    #[error("Repository name not specified. Set PAGESMITH_REPO_NAME or REPO_NAME, or pass --repo-name")]
    MissingRepoName,

    /// Sub-path value cannot be used in a URL path segment
    #[error("Invalid repository name '{0}': use only letters, digits, '.', '-' and '_'")]
    InvalidRepoName(String),

    /// Owner cannot be used as a host label
    #[error("Invalid owner '{0}': use only letters, digits and '-'")]
    InvalidOwner(String),
}

/// Sub-path deployment context shared by the patcher and the CLI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployConfig {
    /// Sub-path segment the site is served under (conventionally the repo name)
    pub repo_name: String,

    /// Account owning the pages domain, needed for absolute site URLs
    pub owner: Option<String>,
}

impl DeployConfig {
    pub fn new(repo_name: impl Into<String>) -> Self {
        Self {
            repo_name: repo_name.into(),
            owner: None,
        }
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Loads from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads from an arbitrary key lookup, so tests need no environment mutation
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::resolve(None, None, lookup)
    }

    /// Applies CLI overrides on top of whatever the lookup provides
    pub fn resolve<F>(
        repo_name: Option<String>,
        owner: Option<String>,
        lookup: F,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let github_repository = first_set(&lookup, &["GITHUB_REPOSITORY"]);
        let (github_owner, github_name) =
            match github_repository.as_deref().and_then(|r| r.split_once('/')) {
                Some((owner, name)) => (Some(owner.to_string()), Some(name.to_string())),
                None => (None, None),
            };

        let repo_name = repo_name
            .or_else(|| first_set(&lookup, &["PAGESMITH_REPO_NAME", "REPO_NAME"]))
            .or(github_name)
            .ok_or(ConfigError::MissingRepoName)?;
        let owner = owner
            .or_else(|| {
                first_set(
                    &lookup,
                    &["PAGESMITH_REPO_OWNER", "REPO_OWNER", "GITHUB_REPOSITORY_OWNER"],
                )
            })
            .or(github_owner);

        let config = Self { repo_name, owner };
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        // The values are spliced into JS/JSON string literals and URLs unescaped
        let name = &self.repo_name;
        let name_ok = !name.is_empty()
            && name != "."
            && name != ".."
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'));
        if !name_ok {
            return Err(ConfigError::InvalidRepoName(name.clone()));
        }

        if let Some(owner) = &self.owner {
            let owner_ok =
                !owner.is_empty() && owner.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
            if !owner_ok {
                return Err(ConfigError::InvalidOwner(owner.clone()));
            }
        }

        Ok(())
    }

    /// `/<repo>`
    pub fn base_path(&self) -> String {
        format!("/{}", self.repo_name)
    }

    /// `/<repo>/`
    pub fn base_path_with_trailing_slash(&self) -> String {
        format!("/{}/", self.repo_name)
    }

    /// `https://<owner>.github.io`, when the owner is known
    pub fn site_url(&self) -> Option<String> {
        self.owner
            .as_ref()
            .map(|owner| format!("https://{}.{}", owner.to_lowercase(), PAGES_DOMAIN))
    }

    pub fn to_display_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert("repo_name".to_string(), self.repo_name.clone());
        map.insert("base_path".to_string(), self.base_path());
        map.insert(
            "owner".to_string(),
            self.owner.clone().unwrap_or_else(|| "(not set)".to_string()),
        );
        if let Some(url) = self.site_url() {
            map.insert("site_url".to_string(), url);
        }
        map
    }
}

/// First non-blank value among `keys`, trimmed
fn first_set<F>(lookup: &F, keys: &[&str]) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    keys.iter()
        .filter_map(|key| lookup(*key))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}
