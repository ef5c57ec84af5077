use crate::core::config::LoggingConfig;
use anyhow::{Context, Result};
use tracing_subscriber::{
    layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

/// Appended to the configured level; sqlx reports every statement at info
const QUIET_TARGETS: &str = "sqlx=warn";

/// Where log lines go and in what shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    /// Human-readable, colored lines
    Console,
    /// One JSON object per event
    Json,
}

impl LogOutput {
    pub fn from_config(config: &LoggingConfig) -> Self {
        if config.console || config.format == "console" {
            LogOutput::Console
        } else {
            LogOutput::Json
        }
    }
}

pub fn filter_directives(level: &str) -> String {
    format!("{},{}", level, QUIET_TARGETS)
}

fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    EnvFilter::try_new(filter_directives(&config.level))
        .with_context(|| format!("Invalid log filter for level '{}'", config.level))
}

/// Install the global subscriber. `RUST_LOG` takes precedence over the configured level.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(config)?;

    let layer: Box<dyn Layer<Registry> + Send + Sync> = match LogOutput::from_config(config) {
        LogOutput::Console => tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_line_number(true)
            .with_thread_ids(true)
            .with_filter(filter)
            .boxed(),
        LogOutput::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_filter(filter)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(layer)
        .try_init()
        .context("Failed to install tracing subscriber")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logging(format: &str, console: bool) -> LoggingConfig {
        LoggingConfig {
            level: "info".to_string(),
            format: format.to_string(),
            console,
        }
    }

    #[test]
    fn test_output_selection() {
        assert_eq!(LogOutput::from_config(&logging("json", false)), LogOutput::Json);
        assert_eq!(LogOutput::from_config(&logging("console", false)), LogOutput::Console);
        // The console flag wins over the format
        assert_eq!(LogOutput::from_config(&logging("json", true)), LogOutput::Console);
    }

    #[test]
    fn test_filter_directives() {
        let directives = filter_directives("debug");

        assert_eq!(directives, "debug,sqlx=warn");
        assert!(EnvFilter::try_new(&directives).is_ok());
    }
}
