// Logging module - Logging infrastructure
use crate::domain::error::{LinkError, LinkResult};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set. `verbose` forces debug.
pub fn default_filter(log_level: &str, verbose: bool) -> String {
    let level = if verbose { "debug" } else { log_level };
    format!("linetalk={},warn", level)
}

/// Initialize logging system. Output goes to stderr; stdout belongs to the
/// operator console.
pub fn init_logging(log_level: &str, verbose: bool) -> LinkResult<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(log_level, verbose)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .with_level(true),
        )
        .try_init()
        .map_err(|e| LinkError::Config {
            message: format!("Failed to initialize logging: {}", e),
        })?;

    tracing::debug!("LineTalk logging system initialized");
    Ok(())
}
