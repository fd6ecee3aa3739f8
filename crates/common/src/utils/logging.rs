use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when neither `RUST_LOG` nor a configured level is available.
pub const DEFAULT_FILTER: &str = "info,tower_http=info,axum=info";

fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize tracing subscriber with sensible defaults and stdout writer.
/// - Respects `RUST_LOG` if set
/// - Falls back to `fallback`, then to [`DEFAULT_FILTER`] if that does not parse
/// - Writes to stdout to improve visibility in environments that hide stderr
pub fn init_logging_default(fallback: &str) {
    let _ = fmt()
        .with_env_filter(env_filter(fallback))
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}

/// Initialize tracing subscriber with JSON structured output.
/// Same filter resolution as [`init_logging_default`].
pub fn init_logging_json(fallback: &str) {
    let _ = fmt()
        .with_env_filter(env_filter(fallback))
        .with_target(true)
        .json()
        .with_writer(io::stdout)
        .try_init();
}

/// Pick the output flavour at runtime.
pub fn init_logging(fallback: &str, json: bool) {
    if json {
        init_logging_json(fallback);
    } else {
        init_logging_default(fallback);
    }
    tracing::debug!(json, "tracing subscriber initialized");
}
