//! Logger initialization for the command-line tool
//!
//! The library only emits through the `log` facade; `env_logger` is wired up
//! here for the binary.

use std::sync::Once;

/// Logger configuration
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "brickmosaic=debug").
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Explicit filter, taking precedence over `RUST_LOG`
    pub env_filter: Option<String>,
    /// Level used when neither a filter nor `RUST_LOG` is given
    pub default_level: log::LevelFilter,
    /// ANSI coloring behavior
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            default_level: log::LevelFilter::Info,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    /// Configuration for the CLI verbosity flags
    pub fn for_verbosity(verbose: bool, quiet: bool) -> Self {
        let default_level = if verbose {
            log::LevelFilter::Debug
        } else if quiet {
            log::LevelFilter::Warn
        } else {
            log::LevelFilter::Info
        };
        Self {
            default_level,
            ..Self::default()
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once
///
/// Subsequent calls are ignored, as is a logger installed by someone else.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = config.env_filter {
            builder.parse_filters(&filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(config.default_level);
        }

        builder.write_style(config.write_style);

        if builder.try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}
