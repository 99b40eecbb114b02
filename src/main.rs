use pagesmith::cli::commands::{CliArgs, Commands};
use pagesmith::cli::handlers::{handle_detect, handle_finalize, handle_patch};
use pagesmith::util::{init_logging, LoggingConfig};
use pagesmith::VERSION;

use clap::Parser;
use std::env;
use tracing::debug;

fn main() {
    let args = CliArgs::parse();
    init_logging(LoggingConfig::from_cli(
        args.log_level.as_deref(),
        args.verbose,
        args.quiet,
        |key| env::var(key).ok(),
    ));

    debug!("pagesmith v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Detect(detect_args) => handle_detect(detect_args),
        Commands::Patch(patch_args) => handle_patch(patch_args),
        Commands::Finalize(finalize_args) => handle_finalize(finalize_args),
    };

    std::process::exit(exit_code);
}
