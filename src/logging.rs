// logging.rs
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "niger_portal=info";

/// stderr subscriber; `RUST_LOG` overrides the default filter.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
