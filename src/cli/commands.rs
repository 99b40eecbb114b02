use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Static-site toolchain detection and sub-path deployment helper
#[derive(Parser, Debug)]
#[command(
    name = "pagesmith",
    about = "Detects a static site's toolchain and prepares it for sub-path hosting",
    version,
    long_about = "pagesmith classifies a repository into one of a fixed set of static-site \
                  toolchains, reports how to build it, injects the repository sub-path into \
                  its build config, and fixes up the build output for path-based hosting."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - only log errors"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Classify a repository's static-site toolchain",
        long_about = "Inspects marker files, package.json and lock files to pick exactly one \
                      toolchain case, then reports the build command, output directory and \
                      where the base URL has to be configured.\n\n\
                      Exits with status 1 when no case matches.\n\n\
                      Examples:\n  \
                      pagesmith detect\n  \
                      pagesmith detect /path/to/repo\n  \
                      pagesmith detect --format json"
    )]
    Detect(DetectArgs),

    #[command(
        about = "Inject the sub-path base URL into the build config",
        long_about = "Detects the toolchain and inserts the base-path options into its config \
                      file. Options that are already set are left untouched.\n\n\
                      Examples:\n  \
                      pagesmith patch --repo-name my-site\n  \
                      REPO_NAME=my-site REPO_OWNER=alice pagesmith patch /path/to/repo"
    )]
    Patch(PatchArgs),

    #[command(
        about = "Fix up the build output for path-based hosting",
        long_about = "Adds a .nojekyll marker to the output directory and, for single-page \
                      apps, copies index.html to 404.html. For Jekyll sites a stale .nojekyll \
                      in the repository root is removed instead.\n\n\
                      Examples:\n  \
                      pagesmith finalize\n  \
                      pagesmith finalize --output-dir dist"
    )]
    Finalize(FinalizeArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct DetectArgs {
    #[arg(
        value_name = "PATH",
        help = "Path to repository (defaults to current directory)"
    )]
    pub repository_path: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct PatchArgs {
    #[arg(
        value_name = "PATH",
        help = "Path to repository (defaults to current directory)"
    )]
    pub repository_path: Option<PathBuf>,

    #[arg(
        long,
        value_name = "NAME",
        help = "Sub-path to serve under (defaults to PAGESMITH_REPO_NAME, REPO_NAME or GITHUB_REPOSITORY)"
    )]
    pub repo_name: Option<String>,

    #[arg(
        long,
        value_name = "OWNER",
        help = "Account owning the pages domain (needed for Astro's site URL)"
    )]
    pub owner: Option<String>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct FinalizeArgs {
    #[arg(
        value_name = "PATH",
        help = "Path to repository (defaults to current directory)"
    )]
    pub repository_path: Option<PathBuf>,

    #[arg(
        long,
        value_name = "DIR",
        help = "Build output directory, relative to the repository (defaults to the detected one)"
    )]
    pub output_dir: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
