// src/log.rs
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the stderr subscriber. `RUST_LOG` wins over `verbose` when set.
/// Calling it twice is harmless; the second call keeps the first subscriber.
pub fn init(verbose: bool) {
    let default = if verbose { "dart_scrape=debug,info" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}
