use std::io;

use anyhow::{Context, Result};
use mailweave_core::LoggingConfig;
use tracing_subscriber::{fmt::Layer, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Level after applying `-v` flags on top of the configured level
pub fn effective_level(config: &LoggingConfig, verbose: u8) -> String {
    match verbose {
        0 => config.level.to_lowercase(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Install the global subscriber. Logs go to stderr so command output stays pipeable.
///
/// `RUST_LOG` wins over the configured level when set.
pub fn init_logging(config: &LoggingConfig, verbose: u8) -> Result<()> {
    let level = effective_level(config, verbose);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&level))
        .with_context(|| format!("Invalid log filter '{}'", level))?;

    let registry = tracing_subscriber::registry().with(filter);
    match config.format.to_lowercase().as_str() {
        "json" => registry
            .with(Layer::new().with_writer(io::stderr).json())
            .try_init(),
        "pretty" => registry
            .with(Layer::new().with_writer(io::stderr).pretty())
            .try_init(),
        _ => registry
            .with(Layer::new().with_writer(io::stderr).compact())
            .try_init(),
    }
    .context("Failed to install log subscriber")
}
