use tracing_subscriber::{EnvFilter, fmt};

/// Install the fmt subscriber. `RUST_LOG` wins over `fallback_filter` when set.
/// Safe to call more than once; later calls keep the subscriber already installed.
pub fn init(fallback_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback_filter));
    if let Err(err) = fmt().with_env_filter(filter).try_init() {
        tracing::debug!(%err, "tracing subscriber already installed");
    }
}

#[cfg(test)]
mod telemetry_tests {
    use super::*;

    #[test]
    fn it_should_tolerate_being_initialised_twice() {
        init("debug");
        init("info");
        tracing::info!("still logging");
    }
}
