//! Telemetry configuration from environment variables.

use std::env;

/// Configuration for logging and metrics.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name attached to every log line
    pub service_name: String,

    /// Subsystem identifier (01-03), "00" for the whole node
    pub subsystem_id: String,

    /// Log filter directive (trace, debug, info, or a full `EnvFilter` string)
    pub log_level: String,

    /// Whether to write logs to stdout at all
    pub console_output: bool,

    /// Whether logs are JSON formatted
    pub json_logs: bool,

    /// Network identifier (mainnet, holesky, devnet)
    pub network: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "quantum-chain".to_string(),
            subsystem_id: "00".to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
            network: "mainnet".to_string(),
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OTEL_SERVICE_NAME`: Service name (default: quantum-chain)
    /// - `QC_SUBSYSTEM_ID`: Subsystem ID (default: 00)
    /// - `QC_LOG_LEVEL` or `RUST_LOG`: Log filter (default: info)
    /// - `QC_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `QC_JSON_LOGS`: Enable JSON logs (default: false, true in containers)
    /// - `QC_NETWORK`: Network name (default: mainnet)
    pub fn from_env() -> Self {
        let is_container =
            env::var("KUBERNETES_SERVICE_HOST").is_ok() || env::var("DOCKER_CONTAINER").is_ok();

        Self {
            service_name: env::var("OTEL_SERVICE_NAME")
                .unwrap_or_else(|_| "quantum-chain".to_string()),
            subsystem_id: env::var("QC_SUBSYSTEM_ID").unwrap_or_else(|_| "00".to_string()),
            log_level: env::var("QC_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),
            console_output: env::var("QC_CONSOLE_OUTPUT")
                .map(|v| parse_flag(&v, true))
                .unwrap_or(true),
            json_logs: env::var("QC_JSON_LOGS")
                .map(|v| parse_flag(&v, false))
                .unwrap_or(is_container),
            network: env::var("QC_NETWORK").unwrap_or_else(|_| "mainnet".to_string()),
        }
    }

    /// Configuration for a single subsystem, e.g. `("02", "block-input")`.
    pub fn for_subsystem(subsystem_id: &str, subsystem_name: &str) -> Self {
        let mut config = Self::from_env();
        config.subsystem_id = subsystem_id.to_string();
        config.service_name = format!("qc-{}-{}", subsystem_id, subsystem_name);
        config
    }

    /// Service name including the subsystem suffix, if any.
    pub fn full_service_name(&self) -> String {
        if self.subsystem_id == "00" {
            self.service_name.clone()
        } else {
            format!("{}-{}", self.service_name, self.subsystem_id)
        }
    }
}

/// "true"/"1" and "false"/"0" (any case); anything else keeps `default`.
fn parse_flag(value: &str, default: bool) -> bool {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" => true,
        "false" | "0" => false,
        _ => default,
    }
}
