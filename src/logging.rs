use std::sync::OnceLock;

use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt};

static INIT: OnceLock<()> = OnceLock::new();

/// Environment variable consulted before `RUST_LOG`.
pub const LOG_ENV: &str = "MD_LOG";

/// Initialize the `tracing` subscriber. Logs go to stderr so verbose output on
/// stdout stays clean.
pub fn init() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("warn"));
        let subscriber = Registry::default().with(filter).with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        );
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}
