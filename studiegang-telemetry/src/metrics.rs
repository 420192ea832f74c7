//! ## studiegang-telemetry::metrics
//! **Prometheus registry with counters and histograms**
//!
//! ### Components:
//! - `studiegang_semesters_total`: semesters stepped across all runs
//! - `studiegang_course_attempts_total`: graded course attempts
//! - `studiegang_step_latency_ns`: wall time per model step

use prometheus::{Counter, Histogram, HistogramOpts, Registry};

#[derive(Debug, Clone)]
pub struct MetricsRecorder {
    pub registry: prometheus::Registry,
    pub semesters: prometheus::Counter,
    pub course_attempts: prometheus::Counter,
    pub step_latency: prometheus::Histogram,
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsRecorder {
    pub fn new() -> Self {
        let registry = Registry::new();
        let semesters =
            Counter::new("studiegang_semesters_total", "Total simulated semesters").unwrap();

        let course_attempts = Counter::new(
            "studiegang_course_attempts_total",
            "Total graded course attempts",
        )
        .unwrap();

        let step_latency = Histogram::with_opts(
            HistogramOpts::new("studiegang_step_latency_ns", "Model step processing time")
                .buckets(vec![10_000.0, 100_000.0, 1_000_000.0, 10_000_000.0, 100_000_000.0]),
        )
        .unwrap();

        registry.register(Box::new(semesters.clone())).unwrap();
        registry
            .register(Box::new(course_attempts.clone()))
            .unwrap();
        registry.register(Box::new(step_latency.clone())).unwrap();

        Self {
            registry,
            semesters,
            course_attempts,
            step_latency,
        }
    }

    pub fn gather_metrics(&self) -> Result<String, prometheus::Error> {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let mut buffer = Vec::<u8>::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer).unwrap_or_default())
    }

    pub fn inc_semesters(&self) {
        self.semesters.inc();
    }

    pub fn add_course_attempts(&self, count: u64) {
        self.course_attempts.inc_by(count as f64);
    }
}
