//! Installation of the global tracing subscriber.

use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

const DEFAULT_FILTER: &str = "info";

/// Installs a pretty stdout subscriber filtered by `RUST_LOG`, falling back to
/// the info level when the variable is not set or cannot be parsed.
pub fn init() -> Result<(), SetGlobalDefaultError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let stdout_log = tracing_subscriber::fmt::layer().pretty();
    let subscriber = Registry::default().with(stdout_log.with_filter(filter));

    tracing::subscriber::set_global_default(subscriber)
}
