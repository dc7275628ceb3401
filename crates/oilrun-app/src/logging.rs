//! Tracing subscriber setup for the host binary.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when neither `RUST_LOG` nor the config names one.
pub const DEFAULT_FILTER: &str = "info";

/// Build the filter: `RUST_LOG` wins, then `log_level`, then the default.
pub fn env_filter(log_level: &str) -> EnvFilter {
    let filter_str = if log_level.trim().is_empty() {
        DEFAULT_FILTER
    } else {
        log_level
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str))
}

/// Install the global subscriber: console output with module path, thread
/// names (render loop, fuel timer, asset loader) and time since start.
///
/// Safe to call twice; the second call leaves the first subscriber in place.
pub fn init_logging(log_level: &str) {
    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let _ = tracing_subscriber::registry()
        .with(env_filter(log_level))
        .with(console_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subsystem_filter_parses() {
        let filter = EnvFilter::new("info,oilrun_sim=debug");
        let filter_str = format!("{filter}");
        assert!(filter_str.contains("oilrun_sim=debug"));
        assert!(filter_str.contains("info"));
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_logging("warn");
        init_logging("debug");
    }
}
