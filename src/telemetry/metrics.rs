//! Engine metrics
//!
//! Recorded through the `metrics` facade. Without an installed recorder the
//! calls are no-ops.

/// Counter metric types
#[derive(Debug, Clone, Copy)]
pub enum CounterMetric {
    /// Estimates produced
    Estimates,
    /// Estimates that fell back to the mock price
    MockFallback,
    /// Raw sale records rejected by the adapter
    RecordsDropped,
}

impl CounterMetric {
    pub fn name(&self) -> &'static str {
        match self {
            CounterMetric::Estimates => "cardvalue_estimates_total",
            CounterMetric::MockFallback => "cardvalue_mock_fallback_total",
            CounterMetric::RecordsDropped => "cardvalue_records_dropped_total",
        }
    }
}

/// Histogram metric types
#[derive(Debug, Clone, Copy)]
pub enum HistogramMetric {
    /// Confidence score of each estimate
    EstimateConfidence,
}

impl HistogramMetric {
    pub fn name(&self) -> &'static str {
        match self {
            HistogramMetric::EstimateConfidence => "cardvalue_estimate_confidence",
        }
    }
}

/// Increment a counter by one
pub fn increment_counter(metric: CounterMetric) {
    ::metrics::counter!(metric.name()).increment(1);
}

/// Record a histogram sample
pub fn record_histogram(metric: HistogramMetric, value: f64) {
    ::metrics::histogram!(metric.name()).record(value);
}
