pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, Commands, DetectArgs, FinalizeArgs, OutputFormatArg, PatchArgs};
pub use output::{OutputFormat, OutputFormatter};
