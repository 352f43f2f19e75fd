//! Structured logging.
//!
//! A single global `tracing` subscriber: an `EnvFilter` built from
//! `TelemetryConfig::log_level`, plus either a human-readable or a JSON fmt
//! layer. JSON lines carry `timestamp`, `level`, `target`, the span list and
//! every structured field, which is what log shippers expect.

use crate::{TelemetryConfig, TelemetryError};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

/// Build the level filter for `config`.
pub fn build_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(&config.log_level).map_err(|e| TelemetryError::Config(e.to_string()))
}

/// Install the global subscriber.
///
/// Fails with `LoggingInit` if a global subscriber is already set.
pub fn init_logging(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = build_filter(config)?;

    let fmt_layer: Option<Box<dyn Layer<Registry> + Send + Sync>> = match (
        config.console_output,
        config.json_logs,
    ) {
        (false, _) => None,
        (true, true) => Some(
            fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .boxed(),
        ),
        (true, false) => Some(fmt::layer().with_target(true).boxed()),
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .try_init()
        .map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;

    tracing::debug!(
        service = %config.full_service_name(),
        network = %config.network,
        json_logs = config.json_logs,
        "Structured logging initialised"
    );

    Ok(())
}

/// Log a block-related event with standard fields.
#[macro_export]
macro_rules! log_block_event {
    ($level:ident, $subsystem:expr, $msg:expr, $slot:expr, $block_root:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            subsystem = $subsystem,
            slot = $slot,
            block_root = ?$block_root,
            $($($field)*,)?
            $msg
        )
    };
}
