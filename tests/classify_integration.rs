//! Classification against checked-in fixture repositories

mod support;

use pagesmith::detection::{Classifier, DetectionError};
use pagesmith::stack::{PackageManagerId, ToolchainId};
use support::{checkout, fixture_path};
use yare::parameterized;

#[parameterized(
    static_html = { "static-html", "1", ToolchainId::Static, None, None, "." },
    react_cra_npm = { "react-cra-npm", "2", ToolchainId::ReactCra, Some(PackageManagerId::Npm), Some("npm run build"), "build" },
    react_vite_bun = { "react-vite-bun", "3", ToolchainId::ReactVite, Some(PackageManagerId::Bun), Some("bun run build"), "dist" },
    vue_vite_pnpm = { "vue-vite-pnpm", "4", ToolchainId::VueVite, Some(PackageManagerId::Pnpm), Some("pnpm run build"), "dist" },
    angular_pnpm = { "angular-pnpm", "5", ToolchainId::Angular, Some(PackageManagerId::Pnpm), Some("pnpm exec ng build --configuration production --base-href /repo-name/"), "dist" },
    svelte_vite_npm = { "svelte-vite-npm", "6a", ToolchainId::SvelteVite, Some(PackageManagerId::Npm), Some("npm run build"), "dist" },
    sveltekit_bun = { "sveltekit-bun", "6b", ToolchainId::SvelteKit, Some(PackageManagerId::Bun), Some("bun run build"), "build" },
    nextjs_yarn = { "nextjs-yarn", "7", ToolchainId::NextJs, Some(PackageManagerId::Yarn), Some("yarn build"), "out" },
    astro_npm = { "astro-npm", "8", ToolchainId::Astro, Some(PackageManagerId::Npm), Some("npm run build"), "dist" },
    vanilla_vite_pnpm = { "vanilla-vite-pnpm", "9", ToolchainId::VanillaVite, Some(PackageManagerId::Pnpm), Some("pnpm run build"), "dist" },
    jekyll = { "jekyll", "10", ToolchainId::Jekyll, None, None, "_site" },
    hugo_npm = { "hugo-npm", "12", ToolchainId::Hugo, Some(PackageManagerId::Npm), Some("npm run build"), "public" },
    hugo_bare = { "hugo-bare", "12", ToolchainId::Hugo, None, Some("hugo --minify"), "public" },
)]
fn test_fixture_classification(
    fixture: &str,
    case: &str,
    toolchain: ToolchainId,
    package_manager: Option<PackageManagerId>,
    build_command: Option<&str>,
    output_dir: &str,
) {
    let result = Classifier::default()
        .classify(&fixture_path(fixture))
        .expect("classification failed")
        .expect("fixture should match a case");

    assert_eq!(result.case, case);
    assert_eq!(result.toolchain, toolchain);
    assert_eq!(result.package_manager, package_manager);
    assert_eq!(result.build_command.as_deref(), build_command);
    assert_eq!(result.output_dir, output_dir);
    assert!(!result.base_url_note.is_empty());
}

#[parameterized(
    vue_vite = { "vue-vite-pnpm", Some("vite.config.ts") },
    sveltekit = { "sveltekit-bun", Some("svelte.config.js") },
    nextjs = { "nextjs-yarn", Some("next.config.js") },
    astro = { "astro-npm", Some("astro.config.mjs") },
    angular = { "angular-pnpm", Some("angular.json") },
    hugo_npm = { "hugo-npm", Some("hugo.toml") },
    hugo_bare = { "hugo-bare", Some("config.toml") },
    jekyll = { "jekyll", Some("_config.yml") },
    static_html = { "static-html", None },
)]
fn test_config_file_reported(fixture: &str, config_file: Option<&str>) {
    let result = Classifier::default()
        .classify(&fixture_path(fixture))
        .unwrap()
        .unwrap();
    assert_eq!(result.config_file.as_deref(), config_file);
}

#[test]
fn test_hugo_base_url_detection() {
    let classifier = Classifier::default();

    let configured = classifier
        .classify(&fixture_path("hugo-npm"))
        .unwrap()
        .unwrap();
    assert_eq!(configured.base_url_configured, Some(true));

    let bare = classifier
        .classify(&fixture_path("hugo-bare"))
        .unwrap()
        .unwrap();
    assert_eq!(bare.base_url_configured, Some(false));
}

#[test]
fn test_unsupported_repository_is_no_match() {
    let result = Classifier::default()
        .classify(&fixture_path("express-server"))
        .unwrap();
    assert!(result.is_none());
}

#[test]
fn test_empty_directory_is_no_match() {
    let dir = tempfile::TempDir::new().unwrap();
    assert!(Classifier::default().classify(dir.path()).unwrap().is_none());
}

#[test]
fn test_broken_manifest_is_an_error() {
    // A static index.html is present, but the broken manifest must not fall
    // through to any case
    let err = Classifier::default()
        .classify(&fixture_path("broken-manifest"))
        .unwrap_err();
    match err {
        DetectionError::EvidenceRead { path, .. } => {
            assert!(path.ends_with("package.json"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_root_is_an_error() {
    let err = Classifier::default()
        .classify(&fixture_path("does-not-exist"))
        .unwrap_err();
    assert!(matches!(err, DetectionError::PathNotFound(_)));
}

#[test]
fn test_multiple_lock_files_warn_and_pick_by_priority() {
    let result = Classifier::default()
        .classify(&fixture_path("multi-lock"))
        .unwrap()
        .unwrap();
    assert_eq!(result.toolchain, ToolchainId::VanillaVite);
    assert_eq!(result.package_manager, Some(PackageManagerId::Yarn));
    assert_eq!(result.build_command.as_deref(), Some("yarn build"));
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].contains("yarn.lock"));
    assert!(result.warnings[0].contains("package-lock.json"));
}

#[test]
fn test_classification_is_deterministic() {
    let classifier = Classifier::default();
    let path = fixture_path("nextjs-yarn");
    let first = classifier.classify(&path).unwrap();
    for _ in 0..5 {
        assert_eq!(classifier.classify(&path).unwrap(), first);
    }
}

#[test]
fn test_lock_file_added_to_checkout_changes_package_manager() {
    let repo = checkout("vanilla-vite-pnpm");
    std::fs::write(repo.path().join("bun.lockb"), "").unwrap();

    let result = Classifier::default().classify(repo.path()).unwrap().unwrap();
    assert_eq!(result.package_manager, Some(PackageManagerId::Bun));
    assert!(!result.warnings.is_empty());
}
