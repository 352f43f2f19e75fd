//! # Quantum Telemetry
//!
//! Observability shared by the block-input subsystems.
//!
//! ## Components
//!
//! - **Logs**: a global `tracing` subscriber, human-readable or JSON
//! - **Metrics**: Prometheus counters, gauges and histograms in one registry
//!
//! ## Usage
//!
//! ```rust,ignore
//! use quantum_telemetry::{TelemetryConfig, init_telemetry};
//!
//! fn main() {
//!     let config = TelemetryConfig::for_subsystem("03", "data-availability");
//!     let _guard = init_telemetry(config).expect("Failed to init telemetry");
//!
//!     // Logs and metrics are now being collected
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `quantum-chain` | Service name in logs |
//! | `QC_LOG_LEVEL` / `RUST_LOG` | `info` | Log filter |
//! | `QC_JSON_LOGS` | `false` | JSON log lines |
//! | `QC_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `QC_SUBSYSTEM_ID` | `00` | Subsystem identifier |
//! | `QC_NETWORK` | `mainnet` | Network name |

mod config;
mod logging;
mod metrics;

pub use config::TelemetryConfig;
pub use logging::{build_filter, init_logging};
pub use metrics::{
    encode_metrics, register_metrics, HistogramTimer, MetricsHandle, AVAILABILITY_WAIT_DURATION,
    BLOCK_INPUTS_COMPLETED, BLOCK_INPUT_CACHE_SIZE, BLOCK_INPUT_EVICTIONS, CODEC_CONVERSIONS,
    DATA_AVAILABILITY_OUTCOMES, GOSSIP_BLOBS_RECEIVED, GOSSIP_BLOCKS_RECEIVED, REGISTRY,
    SUBSYSTEM_ERRORS,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging and metrics.
///
/// Returns a guard that must be held for the lifetime of the application.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    // Metrics first, so anything logged during startup can also be counted
    let metrics_handle = register_metrics()?;

    logging::init_logging(&config)?;

    Ok(TelemetryGuard {
        _metrics: metrics_handle,
    })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    _metrics: MetricsHandle,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!("Shutting down telemetry...");
    }
}

/// Convenience macro for recording a metric increment.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}

/// Convenience macro for recording a metric with a value.
#[macro_export]
macro_rules! metric_observe {
    ($metric:expr, $value:expr) => {
        $metric.observe($value)
    };
    ($metric:expr, $labels:expr, $value:expr) => {
        $metric.with_label_values($labels).observe($value)
    };
}
