//! Base-path injection and output finalizing on real checkouts

mod support;

use pagesmith::detection::Classifier;
use pagesmith::patch::{
    ConfigPatcher, EnsureOutcome, OutputFinalizer, PatchError, PatchFamily, PatchOutcome,
};
use pagesmith::stack::ToolchainId;
use pagesmith::DeployConfig;
use std::fs;
use std::path::Path;
use support::checkout;
use yare::parameterized;

fn config() -> DeployConfig {
    DeployConfig::new("my-site").with_owner("Octo-Org")
}

fn detect(repo: &Path) -> ToolchainId {
    Classifier::default()
        .classify(repo)
        .expect("classification failed")
        .expect("fixture should match a case")
        .toolchain
}

#[parameterized(
    vue_vite = { "vue-vite-pnpm", "vite.config.ts", &["base: '/my-site/',"] },
    vanilla_vite = { "vanilla-vite-pnpm", "vite.config.js", &["export default {\n  base: '/my-site/',\n  server: {"] },
    svelte_vite = { "svelte-vite-npm", "vite.config.js", &["base: '/my-site/',"] },
    sveltekit = { "sveltekit-bun", "svelte.config.js", &["\tkit: {\n\t\tpaths: { base: '/my-site' },\n\t\tadapter:"] },
    nextjs = { "nextjs-yarn", "next.config.js", &["basePath: '/my-site',", "assetPrefix: '/my-site/',", "output: 'export',"] },
    astro = { "astro-npm", "astro.config.mjs", &["site: 'https://octo-org.github.io',", "base: '/my-site'\n});"] },
    react_cra = { "react-cra-npm", "package.json", &["\"homepage\": \"/my-site\","] },
)]
fn test_patch_then_idempotent(fixture: &str, file: &str, expected: &[&str]) {
    let repo = checkout(fixture);
    let patcher = ConfigPatcher::default();
    let toolchain = detect(repo.path());
    let path = repo.path().join(file);

    let outcome = patcher
        .inject_base_path(repo.path(), toolchain, &config())
        .unwrap();
    assert!(
        matches!(&outcome, PatchOutcome::Written { file: f, .. } if *f == path),
        "unexpected outcome: {:?}",
        outcome
    );

    let patched = fs::read_to_string(&path).unwrap();
    for snippet in expected {
        assert!(
            patched.contains(snippet),
            "missing {:?} in:\n{}",
            snippet,
            patched
        );
    }

    let again = patcher
        .inject_base_path(repo.path(), toolchain, &config())
        .unwrap();
    assert_eq!(again, PatchOutcome::AlreadySet { file: path.clone() });
    assert_eq!(fs::read_to_string(&path).unwrap(), patched);
}

#[test]
fn test_patched_cra_manifest_still_parses_and_classifies() {
    let repo = checkout("react-cra-npm");
    ConfigPatcher::default()
        .inject_base_path(repo.path(), ToolchainId::ReactCra, &config())
        .unwrap();

    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(repo.path().join("package.json")).unwrap())
            .unwrap();
    assert_eq!(manifest["homepage"], "/my-site");
    assert_eq!(detect(repo.path()), ToolchainId::ReactCra);
}

#[test]
fn test_existing_base_is_left_alone() {
    let repo = checkout("react-vite-bun");
    let path = repo.path().join("vite.config.ts");
    let before = fs::read_to_string(&path).unwrap();

    let outcome = ConfigPatcher::default()
        .inject_base_path(repo.path(), detect(repo.path()), &config())
        .unwrap();
    assert_eq!(outcome, PatchOutcome::AlreadySet { file: path.clone() });
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[parameterized(
    static_html = { "static-html", ToolchainId::Static },
    jekyll = { "jekyll", ToolchainId::Jekyll },
    hugo = { "hugo-npm", ToolchainId::Hugo },
    angular = { "angular-pnpm", ToolchainId::Angular },
)]
fn test_not_required(fixture: &str, toolchain: ToolchainId) {
    let repo = checkout(fixture);
    assert_eq!(detect(repo.path()), toolchain);
    assert_eq!(
        ConfigPatcher::default()
            .inject_base_path(repo.path(), toolchain, &config())
            .unwrap(),
        PatchOutcome::NotRequired { toolchain }
    );
}

#[test]
fn test_missing_config_file() {
    let repo = checkout("vue-vite-pnpm");
    fs::remove_file(repo.path().join("vite.config.ts")).unwrap();

    let err = ConfigPatcher::default()
        .inject_base_path(repo.path(), ToolchainId::VueVite, &config())
        .unwrap_err();
    match err {
        PatchError::ConfigFileMissing { family, candidates } => {
            assert_eq!(family, PatchFamily::Vite);
            assert_eq!(candidates.len(), 4);
            assert_eq!(candidates[0], "vite.config.ts");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unrecognized_config_shape() {
    let repo = checkout("nextjs-yarn");
    let path = repo.path().join("next.config.js");
    let unusual = "const withMDX = require('@next/mdx')();\nmodule.exports = withMDX(require('./base.config'));\n";
    fs::write(&path, unusual).unwrap();

    let err = ConfigPatcher::default()
        .inject_base_path(repo.path(), ToolchainId::NextJs, &config())
        .unwrap_err();
    assert!(matches!(&err, PatchError::PatternNotFound { file, .. } if *file == path));
    assert!(err.to_string().contains("next.config.js"));
    assert_eq!(fs::read_to_string(&path).unwrap(), unusual);
}

#[test]
fn test_nested_next_config_object_is_refused() {
    let repo = checkout("nextjs-yarn");
    let path = repo.path().join("next.config.js");
    let source = "const nextConfig = require('./next.base.js');\nnextConfig.images = {\n  unoptimized: true,\n};\n\nmodule.exports = nextConfig;\n";
    fs::write(&path, source).unwrap();

    let err = ConfigPatcher::default()
        .inject_base_path(repo.path(), ToolchainId::NextJs, &config())
        .unwrap_err();
    assert!(matches!(&err, PatchError::PatternNotFound { file, .. } if *file == path));
    assert_eq!(fs::read_to_string(&path).unwrap(), source);
}

#[test]
fn test_astro_without_owner_is_refused() {
    let repo = checkout("astro-npm");
    let before = fs::read_to_string(repo.path().join("astro.config.mjs")).unwrap();

    let err = ConfigPatcher::default()
        .inject_base_path(repo.path(), ToolchainId::Astro, &DeployConfig::new("my-site"))
        .unwrap_err();
    assert!(matches!(err, PatchError::MissingContext { .. }));
    assert_eq!(
        fs::read_to_string(repo.path().join("astro.config.mjs")).unwrap(),
        before
    );
}

#[test]
fn test_finalize_spa_build_output() {
    let repo = checkout("vue-vite-pnpm");
    let dist = repo.path().join("dist");
    fs::create_dir(&dist).unwrap();
    fs::write(dist.join("index.html"), "<div id=\"app\"></div>").unwrap();

    let result = Classifier::default().classify(repo.path()).unwrap().unwrap();
    let finalizer = OutputFinalizer::default();

    let report = finalizer.finalize(repo.path(), &result).unwrap();
    assert_eq!(report.nojekyll, EnsureOutcome::Created);
    assert_eq!(report.spa_fallback, EnsureOutcome::Created);
    assert!(dist.join(".nojekyll").is_file());
    assert_eq!(
        fs::read_to_string(dist.join("404.html")).unwrap(),
        "<div id=\"app\"></div>"
    );

    let report = finalizer.finalize(repo.path(), &result).unwrap();
    assert_eq!(report.nojekyll, EnsureOutcome::AlreadyPresent);
    assert_eq!(report.spa_fallback, EnsureOutcome::AlreadyPresent);
}

#[test]
fn test_finalize_hugo_gets_marker_only() {
    let repo = checkout("hugo-bare");
    let public = repo.path().join("public");
    fs::create_dir(&public).unwrap();
    fs::write(public.join("index.html"), "home").unwrap();

    let result = Classifier::default().classify(repo.path()).unwrap().unwrap();
    let report = OutputFinalizer::default()
        .finalize(repo.path(), &result)
        .unwrap();
    assert_eq!(report.nojekyll, EnsureOutcome::Created);
    assert_eq!(report.spa_fallback, EnsureOutcome::Skipped);
    assert!(!public.join("404.html").exists());
}

#[test]
fn test_finalize_before_build_fails() {
    let repo = checkout("astro-npm");
    let result = Classifier::default().classify(repo.path()).unwrap().unwrap();
    assert!(OutputFinalizer::default()
        .finalize(repo.path(), &result)
        .is_err());
}

#[test]
fn test_finalize_jekyll_removes_stale_marker() {
    let repo = checkout("jekyll");
    fs::write(repo.path().join(".nojekyll"), "").unwrap();

    let result = Classifier::default().classify(repo.path()).unwrap().unwrap();
    let report = OutputFinalizer::default()
        .finalize(repo.path(), &result)
        .unwrap();
    assert_eq!(report.nojekyll, EnsureOutcome::Removed);
    assert!(!repo.path().join(".nojekyll").exists());
}
