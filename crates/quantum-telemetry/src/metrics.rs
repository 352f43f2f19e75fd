//! Prometheus metrics for the block-input pipeline.
//!
//! All metrics follow the naming convention: `qc_<subsystem>_<metric>_<unit>`
//!
//! ## Metric Types
//!
//! - **Counter**: Monotonically increasing value (e.g., gossip_blobs_total)
//! - **Gauge**: Value that can go up or down (e.g., cache_entries)
//! - **Histogram**: Distribution of values (e.g., availability_wait_seconds)

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Counter, CounterVec, Encoder, Gauge, Histogram, HistogramOpts, Opts,
    Registry, TextEncoder,
};
use std::sync::Arc;

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // BLOCK CODEC METRICS (Subsystem 1)
    // =========================================================================

    /// Full/blinded conversions performed
    pub static ref CODEC_CONVERSIONS: CounterVec = CounterVec::new(
        Opts::new("qc_codec_conversions_total", "Block representation conversions"),
        &["direction", "level"]  // direction: blind/unblind, level: value/bytes
    ).expect("metric creation failed");

    // =========================================================================
    // BLOCK INPUT METRICS (Subsystem 2)
    // =========================================================================

    /// Gossip block messages ingested
    pub static ref GOSSIP_BLOCKS_RECEIVED: Counter = Counter::new(
        "qc_block_input_gossip_blocks_total",
        "Total gossip block messages ingested"
    ).expect("metric creation failed");

    /// Gossip blob sidecar messages ingested
    pub static ref GOSSIP_BLOBS_RECEIVED: Counter = Counter::new(
        "qc_block_input_gossip_blobs_total",
        "Total gossip blob sidecar messages ingested"
    ).expect("metric creation failed");

    /// Block inputs that reached completion
    pub static ref BLOCK_INPUTS_COMPLETED: Counter = Counter::new(
        "qc_block_input_completed_total",
        "Total block inputs whose blobs all arrived"
    ).expect("metric creation failed");

    /// Cache entries evicted by the size bound
    pub static ref BLOCK_INPUT_EVICTIONS: Counter = Counter::new(
        "qc_block_input_evictions_total",
        "Total block input cache entries evicted"
    ).expect("metric creation failed");

    /// Entries currently tracked by the assembler
    pub static ref BLOCK_INPUT_CACHE_SIZE: Gauge = Gauge::new(
        "qc_block_input_cache_entries",
        "Number of block identities currently tracked"
    ).expect("metric creation failed");

    // =========================================================================
    // DATA AVAILABILITY METRICS (Subsystem 3)
    // =========================================================================

    /// Availability verdicts by outcome
    pub static ref DATA_AVAILABILITY_OUTCOMES: CounterVec = CounterVec::new(
        Opts::new("qc_data_availability_outcomes_total", "Availability checks by outcome"),
        &["outcome"]  // outcome: pre_deneb/available/unavailable/invalid
    ).expect("metric creation failed");

    /// Time spent waiting for pending blobs
    pub static ref AVAILABILITY_WAIT_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "qc_data_availability_wait_seconds",
            "Time spent waiting for pending blob sidecars"
        ).buckets(exponential_buckets(0.005, 2.0, 12).expect("valid bucket layout"))
    ).expect("metric creation failed");

    // =========================================================================
    // ERROR METRICS
    // =========================================================================

    /// Subsystem errors by type
    pub static ref SUBSYSTEM_ERRORS: CounterVec = CounterVec::new(
        Opts::new("qc_subsystem_errors_total", "Errors by subsystem and type"),
        &["subsystem", "error_type"]
    ).expect("metric creation failed");
}

/// Handle keeping the registry alive.
pub struct MetricsHandle {
    _registry: Arc<Registry>,
}

/// Register all metrics with the global registry.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        // Codec
        Box::new(CODEC_CONVERSIONS.clone()),
        // Block input
        Box::new(GOSSIP_BLOCKS_RECEIVED.clone()),
        Box::new(GOSSIP_BLOBS_RECEIVED.clone()),
        Box::new(BLOCK_INPUTS_COMPLETED.clone()),
        Box::new(BLOCK_INPUT_EVICTIONS.clone()),
        Box::new(BLOCK_INPUT_CACHE_SIZE.clone()),
        // Data availability
        Box::new(DATA_AVAILABILITY_OUTCOMES.clone()),
        Box::new(AVAILABILITY_WAIT_DURATION.clone()),
        // Errors
        Box::new(SUBSYSTEM_ERRORS.clone()),
    ];

    for metric in metrics {
        REGISTRY
            .register(metric)
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    }

    Ok(MetricsHandle {
        _registry: Arc::new(REGISTRY.clone()),
    })
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        self.histogram.observe(duration);
    }
}

/// Start timing for a histogram. Observation happens on drop.
#[macro_export]
macro_rules! time_histogram {
    ($histogram:expr) => {
        $crate::HistogramTimer::new(&$histogram)
    };
}
