//! Subcommand handlers. Each returns the process exit code.

use super::commands::{DetectArgs, FinalizeArgs, PatchArgs};
use super::output::OutputFormatter;
use crate::config::DeployConfig;
use crate::detection::{Classifier, DetectionResult};
use crate::patch::{ConfigPatcher, OutputFinalizer};
use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{error, info};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

pub fn handle_detect(args: &DetectArgs) -> i32 {
    exit_code(run_detect(args))
}

pub fn handle_patch(args: &PatchArgs) -> i32 {
    exit_code(run_patch(args))
}

pub fn handle_finalize(args: &FinalizeArgs) -> i32 {
    exit_code(run_finalize(args))
}

fn exit_code(result: Result<i32>) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            EXIT_FAILURE
        }
    }
}

fn repository_path(path: &Option<PathBuf>) -> PathBuf {
    path.clone().unwrap_or_else(|| PathBuf::from("."))
}

/// `None` means no case matched; the caller reports it and exits 1
fn classify(repo_root: &Path) -> Result<Option<DetectionResult>> {
    let classifier = Classifier::default();
    let result = classifier
        .classify(repo_root)
        .with_context(|| format!("Failed to classify {}", repo_root.display()))?;

    if result.is_none() {
        eprintln!(
            "No supported static-site toolchain found in {}",
            repo_root.display()
        );
    }
    Ok(result)
}

fn run_detect(args: &DetectArgs) -> Result<i32> {
    let repo_root = repository_path(&args.repository_path);
    let Some(result) = classify(&repo_root)? else {
        return Ok(EXIT_FAILURE);
    };

    let output = OutputFormatter::new(args.format.into()).format(&result)?;
    println!("{}", output.trim_end());
    Ok(EXIT_SUCCESS)
}

fn run_patch(args: &PatchArgs) -> Result<i32> {
    let repo_root = repository_path(&args.repository_path);
    let config = DeployConfig::resolve(args.repo_name.clone(), args.owner.clone(), |key| {
        env::var(key).ok()
    })
    .context("Invalid deployment context")?;

    let Some(result) = classify(&repo_root)? else {
        return Ok(EXIT_FAILURE);
    };

    info!(repo_name = %config.repo_name, base_path = %config.base_path(), "Patching");
    let outcome = ConfigPatcher::default().inject_base_path(&repo_root, result.toolchain, &config)?;

    // Report the command with the real sub-path in place of the placeholder
    let result = DetectionResult {
        build_command: result.build_command_for(&config),
        ..result
    };
    let output = OutputFormatter::new(args.format.into()).format_patch(&result, &outcome)?;
    println!("{}", output.trim_end());
    Ok(EXIT_SUCCESS)
}

fn run_finalize(args: &FinalizeArgs) -> Result<i32> {
    let repo_root = repository_path(&args.repository_path);
    let Some(result) = classify(&repo_root)? else {
        return Ok(EXIT_FAILURE);
    };

    let finalizer = OutputFinalizer::default();
    let report = match &args.output_dir {
        Some(dir) => finalizer.finalize_dir(&repo_root, &repo_root.join(dir), result.toolchain)?,
        None => finalizer.finalize(&repo_root, &result)?,
    };

    let output = OutputFormatter::new(args.format.into()).format_finalize(&result, &report)?;
    println!("{}", output.trim_end());
    Ok(EXIT_SUCCESS)
}
