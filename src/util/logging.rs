//! Structured logging setup for pagesmith
//!
//! Logs always go to stderr so that `detect` output on stdout stays machine
//! readable.
//!
//! # Configuration
//!
//! - `--log-level`, `-v` (debug) and `-q` (error) on the command line
//! - `PAGESMITH_LOG_LEVEL` - Log level (trace, debug, info, warn, error)
//! - `PAGESMITH_LOG_JSON` - Use JSON output (true/false)
//! - `RUST_LOG` - Standard filtering; replaces the defaults entirely when set
//!
//! # Example
//!
//! ```no_run
//! use pagesmith::util::logging;
//!
//! logging::init_from_env();
//!
//! tracing::info!(repo = "my-site", "Classifying repository");
//! ```

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Ensures logging is only initialized once
static INIT: Once = Once::new();

const LEVEL_VAR: &str = "PAGESMITH_LOG_LEVEL";
const JSON_VAR: &str = "PAGESMITH_LOG_JSON";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Minimum level for pagesmith's own events
    pub level: Level,

    /// Use JSON output format (for CI log collectors)
    pub use_json: bool,

    /// Include the module target (e.g., pagesmith::patch) in logs
    pub include_target: bool,

    /// Include file and line number information
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: true,
            include_location: false,
        }
    }
}

impl LoggingConfig {
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// Reads `PAGESMITH_LOG_LEVEL` and `PAGESMITH_LOG_JSON` through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let level = lookup(LEVEL_VAR)
            .map(|value| parse_level(&value))
            .unwrap_or(Level::INFO);
        let use_json = lookup(JSON_VAR)
            .and_then(|value| parse_bool(&value))
            .unwrap_or(false);

        Self {
            level,
            use_json,
            ..Default::default()
        }
    }

    /// Command-line flags take precedence over the environment: an explicit
    /// `--log-level` first, then `-v`, then `-q`.
    pub fn from_cli<F>(log_level: Option<&str>, verbose: bool, quiet: bool, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::from_lookup(lookup);
        if let Some(level) = log_level {
            config.level = parse_level(level);
        } else if verbose {
            config.level = Level::DEBUG;
        } else if quiet {
            config.level = Level::ERROR;
        }
        config
    }

    fn filter(&self) -> EnvFilter {
        if env::var("RUST_LOG").is_ok() {
            return EnvFilter::from_default_env();
        }

        let filter = EnvFilter::new("warn");
        match format!("pagesmith={}", self.level).parse() {
            Ok(directive) => filter.add_directive(directive),
            Err(_) => filter,
        }
    }
}

/// Parses a log level from a string, falling back to INFO
///
/// ```
/// use pagesmith::util::logging::parse_level;
/// use tracing::Level;
///
/// assert_eq!(parse_level("debug"), Level::DEBUG);
/// assert_eq!(parse_level("WARN"), Level::WARN);
/// assert_eq!(parse_level("loud"), Level::INFO);
/// ```
pub fn parse_level(level_str: &str) -> Level {
    match level_str.trim().to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// Installs the global subscriber. Only the first call has any effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = config.filter();

        // try_init: a host application may already own the global subscriber
        let result = if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(std::io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location),
                )
                .try_init()
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location),
                )
                .try_init()
        };

        if let Err(e) = result {
            eprintln!("Logging already initialized: {}", e);
        }
    });
}

/// Initializes logging from `PAGESMITH_LOG_LEVEL` / `PAGESMITH_LOG_JSON`
pub fn init_from_env() {
    init_logging(LoggingConfig::from_lookup(|key| env::var(key).ok()));
}
