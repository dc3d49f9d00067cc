use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingConfig;

/// Parses a `logging.level` value; surrounding whitespace and case are ignored.
pub fn parse_level(level: &str) -> Option<LevelFilter> {
    match level.trim().to_lowercase().as_str() {
        "trace" => Some(LevelFilter::TRACE),
        "debug" => Some(LevelFilter::DEBUG),
        "info" => Some(LevelFilter::INFO),
        "warn" => Some(LevelFilter::WARN),
        "error" => Some(LevelFilter::ERROR),
        _ => None,
    }
}

/// Installs the global tracing subscriber.
///
/// # Panics
///
/// Panics on an unknown `logging.level`, or if a global subscriber is
/// already installed.
pub fn init_logging(logging_config: &LoggingConfig) {
    let Some(level_filter) = parse_level(&logging_config.level) else {
        panic!(
            "Invalid logging.level '{}'. Valid values: trace, debug, info, warn, error",
            logging_config.level
        );
    };

    // RUST_LOG directives are honoured on top of the configured default level.
    let filter_layer = EnvFilter::from_default_env().add_directive(level_filter.into());

    match logging_config.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter_layer)
                .with(fmt::layer().json().flatten_event(true))
                .init();
        }
        _ => {
            // Human-readable console output, also the fallback for unknown formats
            tracing_subscriber::registry()
                .with(filter_layer)
                .with(fmt::layer().pretty())
                .init();
        }
    }

    tracing::info!(
        service.name = %logging_config.service_name,
        service.version = %logging_config.service_version,
        "logging initialized"
    );
}

#[cfg(test)]
mod tests {
    use super::parse_level;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn parses_known_levels() {
        assert_eq!(parse_level("info"), Some(LevelFilter::INFO));
        assert_eq!(parse_level(" WARN "), Some(LevelFilter::WARN));
        assert_eq!(parse_level("trace"), Some(LevelFilter::TRACE));
    }

    #[test]
    fn rejects_unknown_level() {
        assert_eq!(parse_level("verbose"), None);
    }
}
