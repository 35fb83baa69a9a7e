use tracing_subscriber::EnvFilter;

use crate::config::{Config, DEFAULT_LOG_FILTER};

pub fn init() {
    init_with_filter(DEFAULT_LOG_FILTER);
}

pub fn init_from_config(config: &Config) {
    init_with_filter(&config.log_filter);
}

/// Install the global fmt subscriber. `RUST_LOG` overrides `filter` when set.
///
/// Calling this more than once keeps the first subscriber.
pub fn init_with_filter(filter: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .try_init()
        .is_err()
    {
        tracing::debug!("global subscriber already installed");
    }
}
