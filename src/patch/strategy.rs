//! Pure text transforms that splice base-path options into build configs.
//!
//! Nothing here touches the file system: a strategy takes the config source and
//! returns either [`TextPatch::Unchanged`] or the rewritten text.

use crate::config::DeployConfig;
use crate::stack::ToolchainId;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Config-file family a toolchain's base path lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatchFamily {
    Vite,
    SvelteKit,
    NextJs,
    Astro,
    CreateReactApp,
}

impl PatchFamily {
    /// `None` for toolchains that need no config rewrite (served as-is, built
    /// by the host, or given the base path on the command line)
    pub fn for_toolchain(toolchain: ToolchainId) -> Option<Self> {
        match toolchain {
            ToolchainId::ReactVite
            | ToolchainId::VueVite
            | ToolchainId::SvelteVite
            | ToolchainId::VanillaVite => Some(PatchFamily::Vite),
            ToolchainId::SvelteKit => Some(PatchFamily::SvelteKit),
            ToolchainId::NextJs => Some(PatchFamily::NextJs),
            ToolchainId::Astro => Some(PatchFamily::Astro),
            ToolchainId::ReactCra => Some(PatchFamily::CreateReactApp),
            ToolchainId::Static | ToolchainId::Jekyll | ToolchainId::Hugo | ToolchainId::Angular => {
                None
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PatchFamily::Vite => "Vite",
            PatchFamily::SvelteKit => "SvelteKit",
            PatchFamily::NextJs => "Next.js",
            PatchFamily::Astro => "Astro",
            PatchFamily::CreateReactApp => "Create React App",
        }
    }

    /// Candidate config files in lookup order
    pub fn candidates(&self) -> &'static [&'static str] {
        self.representative().config_candidates()
    }

    fn representative(&self) -> ToolchainId {
        match self {
            PatchFamily::Vite => ToolchainId::VanillaVite,
            PatchFamily::SvelteKit => ToolchainId::SvelteKit,
            PatchFamily::NextJs => ToolchainId::NextJs,
            PatchFamily::Astro => ToolchainId::Astro,
            PatchFamily::CreateReactApp => ToolchainId::ReactCra,
        }
    }

    /// Where new options are inserted; the first match wins
    pub fn anchor_pattern(&self) -> &'static str {
        match self {
            PatchFamily::Vite => r"defineConfig\(\s*\{|export\s+default\s*\{",
            PatchFamily::SvelteKit => r"\bkit\s*:\s*\{",
            PatchFamily::NextJs => {
                r"(?:\b(?:const|let|var)\s+nextConfig\b[^=\n]*=|module\.exports\s*=|export\s+default)\s*\{"
            }
            PatchFamily::Astro => r"defineConfig\(\s*\{",
            PatchFamily::CreateReactApp => r"\A\s*\{",
        }
    }

    /// Human-readable anchor, used in diagnostics
    pub fn anchor_hint(&self) -> &'static str {
        match self {
            PatchFamily::Vite => "defineConfig({ or export default {",
            PatchFamily::SvelteKit => "kit: {",
            PatchFamily::NextJs => "const nextConfig = {, module.exports = { or export default {",
            PatchFamily::Astro => "defineConfig({",
            PatchFamily::CreateReactApp => "a top-level JSON object",
        }
    }

    pub fn options(&self) -> &'static [ConfigOption] {
        match self {
            PatchFamily::Vite => VITE_OPTIONS,
            PatchFamily::SvelteKit => SVELTEKIT_OPTIONS,
            PatchFamily::NextJs => NEXT_OPTIONS,
            PatchFamily::Astro => ASTRO_OPTIONS,
            PatchFamily::CreateReactApp => CRA_OPTIONS,
        }
    }

    pub fn strategy(&self) -> Result<InsertionStrategy, StrategyError> {
        InsertionStrategy::new(*self)
    }
}

impl fmt::Display for PatchFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One key the family needs set, rendered from the deployment context
#[derive(Debug)]
pub struct ConfigOption {
    pub key: &'static str,
    render: fn(&DeployConfig) -> Option<String>,
    /// What the deployment context is missing when `render` yields nothing
    requires: &'static str,
}

impl ConfigOption {
    /// The full `key: value` line without indentation or trailing comma
    pub fn render(&self, config: &DeployConfig) -> Option<String> {
        (self.render)(config)
    }
}

const VITE_OPTIONS: &[ConfigOption] = &[ConfigOption {
    key: "base",
    render: |c| Some(format!("base: '{}'", c.base_path_with_trailing_slash())),
    requires: "repository name",
}];

const SVELTEKIT_OPTIONS: &[ConfigOption] = &[ConfigOption {
    key: "paths",
    render: |c| Some(format!("paths: {{ base: '{}' }}", c.base_path())),
    requires: "repository name",
}];

const NEXT_OPTIONS: &[ConfigOption] = &[
    ConfigOption {
        key: "basePath",
        render: |c| Some(format!("basePath: '{}'", c.base_path())),
        requires: "repository name",
    },
    ConfigOption {
        key: "assetPrefix",
        render: |c| Some(format!("assetPrefix: '{}'", c.base_path_with_trailing_slash())),
        requires: "repository name",
    },
];

const ASTRO_OPTIONS: &[ConfigOption] = &[
    ConfigOption {
        key: "site",
        render: |c| c.site_url().map(|url| format!("site: '{}'", url)),
        requires: "repository owner",
    },
    ConfigOption {
        key: "base",
        render: |c| Some(format!("base: '{}'", c.base_path())),
        requires: "repository name",
    },
];

const CRA_OPTIONS: &[ConfigOption] = &[ConfigOption {
    key: "homepage",
    render: |c| Some(format!("\"homepage\": \"{}\"", c.base_path())),
    requires: "repository name",
}];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StrategyError {
    #[error("insertion point not found (expected {anchor})")]
    AnchorNotFound { anchor: &'static str },

    #[error("{family} needs the {requires} to set '{key}'")]
    MissingContext {
        family: PatchFamily,
        key: &'static str,
        requires: &'static str,
    },

    #[error("invalid pattern: {0}")]
    Pattern(String),
}

impl From<regex::Error> for StrategyError {
    fn from(err: regex::Error) -> Self {
        StrategyError::Pattern(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextPatch {
    /// Every option already present; the source must not be rewritten
    Unchanged,
    Patched {
        text: String,
        inserted: Vec<&'static str>,
    },
}

/// Compiled anchor and already-set checks for one family
#[derive(Debug)]
pub struct InsertionStrategy {
    family: PatchFamily,
    anchor: Regex,
    present: Vec<(&'static ConfigOption, Regex)>,
}

impl InsertionStrategy {
    pub fn new(family: PatchFamily) -> Result<Self, StrategyError> {
        let anchor = Regex::new(family.anchor_pattern())?;
        let present = family
            .options()
            .iter()
            .map(|option| {
                let pattern = format!(r#"\b{}["']?\s*:"#, regex::escape(option.key));
                Regex::new(&pattern).map(|re| (option, re))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            family,
            anchor,
            present,
        })
    }

    pub fn family(&self) -> PatchFamily {
        self.family
    }

    /// Permissive textual check: a match anywhere (even in a comment) counts
    pub fn is_set(&self, source: &str, key: &str) -> bool {
        self.present
            .iter()
            .any(|(option, re)| option.key == key && re.is_match(source))
    }

    pub fn missing_options(&self, source: &str) -> Vec<&'static ConfigOption> {
        self.present
            .iter()
            .filter(|(_, re)| !re.is_match(source))
            .map(|(option, _)| *option)
            .collect()
    }

    pub fn apply(&self, source: &str, config: &DeployConfig) -> Result<TextPatch, StrategyError> {
        let missing = self.missing_options(source);
        if missing.is_empty() {
            return Ok(TextPatch::Unchanged);
        }

        let lines = missing
            .iter()
            .map(|option| {
                option
                    .render(config)
                    .ok_or(StrategyError::MissingContext {
                        family: self.family,
                        key: option.key,
                        requires: option.requires,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let anchor = self
            .anchor
            .find(source)
            .ok_or(StrategyError::AnchorNotFound {
                anchor: self.family.anchor_hint(),
            })?;

        let (head, rest) = source.split_at(anchor.end());
        let anchor_indent = line_indent(source, anchor.start());
        let multiline = first_line(rest).trim().is_empty() && rest.contains('\n');
        let option_indent = if multiline {
            next_member_indent(rest)
        } else {
            None
        }
        .unwrap_or_else(|| format!("{}  ", anchor_indent));
        let closes_object = rest.trim_start().starts_with('}');
        let newline = if source.contains("\r\n") { "\r\n" } else { "\n" };

        let mut insertion = String::new();
        for (i, line) in lines.iter().enumerate() {
            insertion.push_str(newline);
            insertion.push_str(&option_indent);
            insertion.push_str(line);
            let last = i + 1 == lines.len();
            if !(last && closes_object) {
                insertion.push(',');
            }
        }
        // `{}` or `{ }` on one line: put the closing brace back on its own line
        if closes_object && !multiline {
            insertion.push_str(newline);
            insertion.push_str(anchor_indent);
        }

        let mut text = String::with_capacity(source.len() + insertion.len());
        text.push_str(head);
        text.push_str(&insertion);
        text.push_str(rest);

        Ok(TextPatch::Patched {
            text,
            inserted: missing.iter().map(|option| option.key).collect(),
        })
    }
}

fn leading_whitespace(line: &str) -> &str {
    let trimmed = line.trim_start_matches([' ', '\t']);
    &line[..line.len() - trimmed.len()]
}

fn line_indent(source: &str, offset: usize) -> &str {
    let start = source[..offset].rfind('\n').map_or(0, |i| i + 1);
    leading_whitespace(&source[start..])
}

fn first_line(text: &str) -> &str {
    text.split('\n').next().unwrap_or("")
}

/// Indentation of the first member after the anchor, unless the object closes
/// straight away
fn next_member_indent(rest: &str) -> Option<String> {
    let line = rest
        .split('\n')
        .skip(1)
        .find(|line| !line.trim().is_empty())?;
    if line.trim_start().starts_with('}') {
        return None;
    }
    let indent = leading_whitespace(line);
    (!indent.is_empty()).then(|| indent.to_string())
}
