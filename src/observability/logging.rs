//! Structured logging.
//!
//! `RUST_LOG` takes precedence; otherwise the configured level applies to
//! every target. JSON output is selected by `observability.json_logs`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Filter used when `RUST_LOG` is unset or invalid.
pub fn default_filter(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Call once, before serving.
pub fn init_logging(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(config));

    let (json, plain) = if config.json_logs {
        (Some(fmt::layer().json()), None)
    } else {
        (None, Some(fmt::layer()))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(plain)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_default_filter_uses_config_level() {
        let config = ObservabilityConfig {
            log_level: "debug".into(),
            json_logs: false,
        };
        assert_eq!(default_filter(&config).max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_invalid_level_falls_back() {
        let config = ObservabilityConfig {
            log_level: "very=loud=please".into(),
            json_logs: true,
        };
        assert_eq!(default_filter(&config).max_level_hint(), Some(LevelFilter::INFO));
    }
}
