//! Output formatting for multiple formats
//!
//! JSON and YAML are meant for scripts and CI steps; the human format is what a
//! person running the tool in a terminal sees.
//!
//! # Example
//!
//! ```
//! use pagesmith::cli::output::{OutputFormat, OutputFormatter};
//! use pagesmith::detection::DetectionResult;
//! use pagesmith::stack::ToolchainId;
//!
//! let result = DetectionResult::new(ToolchainId::Static);
//! let formatter = OutputFormatter::new(OutputFormat::Json);
//! let output = formatter.format(&result).unwrap();
//! assert!(output.contains("\"type\": \"static\""));
//! ```

use anyhow::{Context, Result};

use crate::detection::DetectionResult;
use crate::patch::{FinalizeReport, PatchOutcome};

const RULE: &str = "\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format
    Yaml,
    /// Human-readable formatted text
    Human,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a detection result according to the configured format
    pub fn format(&self, result: &DetectionResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(result)
                .context("Failed to serialize detection result to JSON"),
            OutputFormat::Yaml => serde_yaml::to_string(result)
                .context("Failed to serialize detection result to YAML"),
            OutputFormat::Human => Ok(self.format_human(result)),
        }
    }

    pub fn format_patch(&self, result: &DetectionResult, outcome: &PatchOutcome) -> Result<String> {
        let output = serde_json::json!({
            "detection": result,
            "patch": outcome,
        });
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(&output).context("Failed to serialize patch to JSON")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(&output).context("Failed to serialize patch to YAML")
            }
            OutputFormat::Human => Ok(self.format_patch_human(result, outcome)),
        }
    }

    pub fn format_finalize(
        &self,
        result: &DetectionResult,
        report: &FinalizeReport,
    ) -> Result<String> {
        let output = serde_json::json!({
            "detection": result,
            "finalize": report,
        });
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&output)
                .context("Failed to serialize finalize report to JSON"),
            OutputFormat::Yaml => serde_yaml::to_string(&output)
                .context("Failed to serialize finalize report to YAML"),
            OutputFormat::Human => Ok(self.format_finalize_human(result, report)),
        }
    }

    fn format_human(&self, result: &DetectionResult) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\u{2713} Case {}: {}\n",
            result.case,
            result.toolchain.name()
        ));
        output.push_str(RULE);
        output.push_str("\n\n");

        output.push_str(&format!("Type:             {}\n", result.toolchain));
        match result.package_manager {
            Some(pm) => output.push_str(&format!("Package Manager:  {}\n", pm)),
            None => output.push_str("Package Manager:  (none)\n"),
        }
        match &result.build_command {
            Some(cmd) => output.push_str(&format!("Build Command:    {}\n", cmd)),
            None => output.push_str("Build Command:    (none, served as-is or built by host)\n"),
        }
        output.push_str(&format!("Output Dir:       {}\n", result.output_dir));
        if let Some(config_file) = &result.config_file {
            output.push_str(&format!("Config File:      {}\n", config_file));
        }
        if let Some(configured) = result.base_url_configured {
            output.push_str(&format!(
                "Base URL:         {}\n",
                if configured {
                    "configured"
                } else {
                    "not configured"
                }
            ));
        }
        output.push_str(&format!("\nBase URL Note:    {}\n", result.base_url_note));

        if !result.warnings.is_empty() {
            output.push_str("\n\u{26A0} Warnings:\n");
            for warning in &result.warnings {
                output.push_str(&format!("  - {}\n", warning));
            }
        }

        output
    }

    fn format_patch_human(&self, result: &DetectionResult, outcome: &PatchOutcome) -> String {
        let mut output = format!("Case {}: {}\n", result.case, result.toolchain.name());
        let line = match outcome {
            PatchOutcome::Written { file, inserted } => format!(
                "\u{2713} Set {} in {}\n",
                inserted.join(", "),
                file.display()
            ),
            PatchOutcome::AlreadySet { file } => {
                format!("\u{2713} Base path already set in {}\n", file.display())
            }
            PatchOutcome::NotRequired { .. } => {
                format!("\u{2713} No config change needed. {}\n", result.base_url_note)
            }
        };
        output.push_str(&line);

        if let Some(cmd) = &result.build_command {
            output.push_str(&format!("Build with: {}\n", cmd));
        }
        output
    }

    fn format_finalize_human(&self, result: &DetectionResult, report: &FinalizeReport) -> String {
        let mut output = format!("Case {}: {}\n", result.case, result.toolchain.name());
        output.push_str(&format!("Output Dir:    {}\n", report.output_dir.display()));
        output.push_str(&format!("\u{251C}\u{2500} .nojekyll:  {}\n", report.nojekyll));
        output.push_str(&format!(
            "\u{2514}\u{2500} 404.html:   {}\n",
            report.spa_fallback
        ));
        output
    }
}
