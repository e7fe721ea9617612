use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub token: String,
    pub host: String,
    pub pod: String,
    pub containers: Vec<String>,
    /// Verify the metrics endpoint's TLS certificate. Off by default so
    /// self-signed cluster endpoints keep working.
    #[serde(default)]
    pub verify_tls: bool,
}

/// What a probe run measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeMode {
    Memory,
    Cpu,
}

impl ProbeMode {
    pub fn metric_name(&self) -> &'static str {
        match self {
            ProbeMode::Memory => "container_memory_working_set_bytes",
            ProbeMode::Cpu => "container_cpu_usage_seconds_total",
        }
    }

    /// Header of the derived column, if this mode has one.
    pub fn unit_label(&self) -> Option<&'static str> {
        match self {
            ProbeMode::Memory => Some("MB"),
            ProbeMode::Cpu => None,
        }
    }

    /// Converts a raw sample value into the derived unit. CPU seconds have no
    /// derived unit, so nothing is produced.
    pub fn convert(&self, raw: f64) -> Option<f64> {
        match self {
            ProbeMode::Memory => Some(raw / 1024.0 / 1024.0),
            ProbeMode::Cpu => None,
        }
    }
}

/// One decoded entry of an instant query result.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSample {
    pub container: String,
    pub timestamp: DateTime<Utc>,
    /// Measurement exactly as Prometheus sent it.
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub container: String,
    pub raw_value: String,
    pub converted: Option<f64>,
}
