//! Logging initialisation via tracing-subscriber.
//!
//! Call [`init`] once at startup, before the document is loaded, so load
//! diagnostics are visible.

use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Env var holding the binary's log filter. Accepts anything `RUST_LOG`
/// accepts, e.g. `debug` or `mirror_config=trace`.
pub const LOG_LEVEL_ENV: &str = "MIRROR_LOG_LEVEL";

/// Initialise the global tracing subscriber, writing to stderr so stdout stays
/// free for the exported document.
///
/// If `prefer_level` is `true`, `level` takes precedence and `RUST_LOG` is only
/// used as a fallback when `level` is invalid. If `prefer_level` is `false`,
/// `RUST_LOG` takes precedence and `level` is the fallback.
pub fn init(level: &str, prefer_level: bool) -> Result<(), AppError> {
    let filter = build_filter(level, prefer_level)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| AppError::Logger(format!("failed to set subscriber: {e}")))?;

    Ok(())
}

/// Resolve `level` and `RUST_LOG` into one filter, without installing it.
pub fn build_filter(level: &str, prefer_level: bool) -> Result<EnvFilter, AppError> {
    if prefer_level {
        match EnvFilter::try_new(level) {
            Ok(filter) => Ok(filter),
            Err(level_err) => EnvFilter::try_from_default_env().map_err(|env_err| {
                AppError::Logger(format!(
                    "invalid log level '{level}': {level_err}; RUST_LOG parse failed: {env_err}"
                ))
            }),
        }
    } else {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(level))
            .map_err(|e| AppError::Logger(format!("invalid log level '{level}': {e}")))
    }
}
