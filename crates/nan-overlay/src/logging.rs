use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "nan_overlay=debug,nan_overlay_core=debug";

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
pub(crate) fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
