//! ## studiegang-telemetry::logging
//! **Structured logging with `tracing`**
//!
//! ### Expectations:
//! - Negligible overhead during simulation stepping
//! - `RUST_LOG` overrides the configured default filter
//! - Domain events carry structured metadata
//!
//! ### Components:
//! - `metrics/`: Prometheus registry with counters and histograms
//! - `logging/`: env-filtered fmt subscriber plus event helper

use opentelemetry::KeyValue;
use tracing::info_span;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Clone)]
pub struct EventLogger;

impl EventLogger {
    /// Installs the global fmt subscriber. `RUST_LOG` wins over the default.
    pub fn init() {
        Self::init_with_default("info")
    }

    /// Installs the global fmt subscriber with a configured fallback filter.
    pub fn init_with_default(default_filter: &str) {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new(default_filter.to_string())),
            )
            .with_thread_names(true)
            .with_span_events(FmtSpan::ENTER)
            .init()
    }

    /// Logs a domain event with structured metadata.
    pub fn log_event(event_type: &str, metadata: Vec<KeyValue>) {
        let span = info_span!(
            "simulation_event",
            event_type = event_type,
            otel.kind = "INTERNAL"
        );
        let _guard = span.enter();
        tracing::info!(metadata = ?metadata, "Simulation event occurred");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[traced_test]
    #[test]
    fn test_logging() {
        EventLogger::log_event("test", vec![KeyValue::new("key", "value")]);
        assert!(logs_contain("Simulation event occurred"));
    }
}
