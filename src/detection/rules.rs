//! Ordered classification rules
//!
//! Each rule is a pure function of [`Evidence`]. The classifier walks the list
//! once and the first rule whose predicate holds decides the outcome, so the
//! position of a rule in [`RuleSet::with_defaults`] is what breaks ties between
//! overlapping evidence (a meta-framework before the bundler it wraps).

use super::evidence::Evidence;
use super::types::{DetectionResult, BASE_PATH_PLACEHOLDER};
use crate::stack::ToolchainId;

const JEKYLL_CONFIG: &str = "_config.yml";
const INDEX_HTML: &str = "index.html";
const HUGO_BINARY: &str = "hugo";
const HUGO_DIRECT_BUILD: &str = "hugo --minify";
const VITE: &str = "vite";

/// One step of the ordered classification procedure
pub trait DetectionRule: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    fn matches(&self, evidence: &Evidence) -> bool;

    /// Outcome once the rule matched. `None` ends classification with no match.
    fn resolve(&self, evidence: &Evidence) -> Option<DetectionResult>;
}

/// Jekyll marker without a manifest. The host builds Jekyll itself.
pub struct JekyllRule;

impl DetectionRule for JekyllRule {
    fn name(&self) -> &'static str {
        "jekyll"
    }

    fn matches(&self, evidence: &Evidence) -> bool {
        evidence.has(JEKYLL_CONFIG) && !evidence.has_manifest()
    }

    fn resolve(&self, _evidence: &Evidence) -> Option<DetectionResult> {
        Some(DetectionResult::new(ToolchainId::Jekyll).with_config_file(Some(JEKYLL_CONFIG)))
    }
}

/// Hugo marker file, or a build script invoking hugo. Independent of declared
/// dependencies, so it also covers a bare hugo binary with no manifest.
pub struct HugoRule;

impl DetectionRule for HugoRule {
    fn name(&self) -> &'static str {
        "hugo"
    }

    fn matches(&self, evidence: &Evidence) -> bool {
        evidence.hugo_marker().is_some()
            || evidence.build_script().contains(HUGO_BINARY)
    }

    fn resolve(&self, evidence: &Evidence) -> Option<DetectionResult> {
        let mut result = DetectionResult::new(ToolchainId::Hugo);

        if evidence.has_manifest() {
            let pm = evidence.package_manager();
            result = result
                .with_package_manager(pm)
                .with_build_command(pm.run_script("build"))
                .with_warnings(evidence.warnings());
        } else {
            result = result.with_build_command(HUGO_DIRECT_BUILD);
        }

        Some(result.with_config_file(evidence.hugo_marker()))
    }
}

/// Plain HTML at the root and nothing to build
pub struct StaticRule;

impl DetectionRule for StaticRule {
    fn name(&self) -> &'static str {
        "static"
    }

    fn matches(&self, evidence: &Evidence) -> bool {
        !evidence.has_manifest() && evidence.has(INDEX_HTML)
    }

    fn resolve(&self, _evidence: &Evidence) -> Option<DetectionResult> {
        Some(DetectionResult::new(ToolchainId::Static))
    }
}

/// Terminal rule: without a manifest nothing below can apply
pub struct NoManifestRule;

impl DetectionRule for NoManifestRule {
    fn name(&self) -> &'static str {
        "no-manifest"
    }

    fn matches(&self, evidence: &Evidence) -> bool {
        !evidence.has_manifest()
    }

    fn resolve(&self, _evidence: &Evidence) -> Option<DetectionResult> {
        None
    }
}

/// How a dependency-detected toolchain is built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStyle {
    /// The manifest's `build` script through the package manager
    BuildScript,
    /// The Angular CLI, with the base href passed as a flag
    AngularCli,
}

/// Manifest dependency marker rule.
///
/// With a `gate`, the rule only applies when the gate dependency is declared.
/// Empty `markers` under a gate make the rule a catch-all for that gate.
pub struct DependencyRule {
    pub toolchain: ToolchainId,
    pub gate: Option<&'static str>,
    pub markers: &'static [&'static str],
    pub build: BuildStyle,
}

impl DependencyRule {
    pub fn new(toolchain: ToolchainId, markers: &'static [&'static str]) -> Self {
        Self {
            toolchain,
            gate: None,
            markers,
            build: BuildStyle::BuildScript,
        }
    }

    pub fn gated(mut self, gate: &'static str) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn with_build(mut self, build: BuildStyle) -> Self {
        self.build = build;
        self
    }
}

impl DetectionRule for DependencyRule {
    fn name(&self) -> &'static str {
        self.toolchain.as_str()
    }

    fn matches(&self, evidence: &Evidence) -> bool {
        if !evidence.has_manifest() {
            return false;
        }
        if let Some(gate) = self.gate {
            if !evidence.has_dependency(gate) {
                return false;
            }
            if self.markers.is_empty() {
                return true;
            }
        }
        self.markers.iter().any(|dep| evidence.has_dependency(dep))
    }

    fn resolve(&self, evidence: &Evidence) -> Option<DetectionResult> {
        let pm = evidence.package_manager();
        let command = match self.build {
            BuildStyle::BuildScript => pm.run_build(),
            BuildStyle::AngularCli => format!(
                "{} ng build --configuration production --base-href {}",
                pm.exec_prefix(),
                BASE_PATH_PLACEHOLDER
            ),
        };

        Some(
            DetectionResult::new(self.toolchain)
                .with_package_manager(pm)
                .with_build_command(command)
                .with_config_file(evidence.first_existing(self.toolchain.config_candidates()))
                .with_warnings(evidence.warnings()),
        )
    }
}

/// Ordered list of rules; first match wins, no backtracking
pub struct RuleSet {
    rules: Vec<Box<dyn DetectionRule>>,
}

impl RuleSet {
    pub fn new(rules: Vec<Box<dyn DetectionRule>>) -> Self {
        Self { rules }
    }

    pub fn with_defaults() -> Self {
        Self::new(vec![
            Box::new(JekyllRule),
            Box::new(HugoRule),
            Box::new(StaticRule),
            Box::new(NoManifestRule),
            Box::new(DependencyRule::new(ToolchainId::ReactCra, &["react-scripts"])),
            Box::new(DependencyRule::new(ToolchainId::SvelteKit, &["@sveltejs/kit"])),
            // Astro wraps Vite, so it has to win over the Vite branch
            Box::new(DependencyRule::new(ToolchainId::Astro, &["astro"])),
            Box::new(
                DependencyRule::new(
                    ToolchainId::ReactVite,
                    &["@vitejs/plugin-react", "@vitejs/plugin-react-swc", "react"],
                )
                .gated(VITE),
            ),
            Box::new(DependencyRule::new(ToolchainId::VueVite, &["vue"]).gated(VITE)),
            Box::new(DependencyRule::new(ToolchainId::SvelteVite, &["svelte"]).gated(VITE)),
            Box::new(DependencyRule::new(ToolchainId::VanillaVite, &[]).gated(VITE)),
            Box::new(
                DependencyRule::new(ToolchainId::Angular, &["@angular/core"])
                    .with_build(BuildStyle::AngularCli),
            ),
            Box::new(DependencyRule::new(ToolchainId::NextJs, &["next"])),
        ])
    }

    /// First matching rule, if any
    pub fn first_match(&self, evidence: &Evidence) -> Option<&dyn DetectionRule> {
        self.rules
            .iter()
            .map(|rule| rule.as_ref())
            .find(|rule| rule.matches(evidence))
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::with_defaults()
    }
}
