use std::collections::HashMap;

use tracing::warn;

use crate::error::ValueParseError;
use crate::types::{MetricSample, ProbeMode, ReportRow};

/// Label of the synthetic summary row.
pub const TOTAL_LABEL: &str = "Total";

/// Container label Prometheus uses for the pod sandbox.
const SANDBOX_CONTAINER: &str = "POD";

/// Aggregated usage for one pod
#[derive(Debug, Clone)]
pub struct Report {
    pub mode: ProbeMode,
    /// Per-container rows in sorted container order, followed by the total row.
    pub rows: Vec<ReportRow>,
    /// Sum of every container value that parsed as a number.
    pub total: f64,
    pub missing: Vec<String>,
    pub parse_failures: Vec<ValueParseError>,
}

impl Report {
    pub fn container_rows(&self) -> &[ReportRow] {
        &self.rows[..self.rows.len() - 1]
    }

    pub fn total_row(&self) -> &ReportRow {
        &self.rows[self.rows.len() - 1]
    }

    pub fn has_diagnostics(&self) -> bool {
        !self.missing.is_empty() || !self.parse_failures.is_empty()
    }
}

pub fn is_workload_container(name: &str) -> bool {
    !name.is_empty() && name != SANDBOX_CONTAINER
}

/// Latest sample per workload container. Later samples replace earlier ones.
pub fn latest_by_container(samples: Vec<MetricSample>) -> HashMap<String, MetricSample> {
    let mut map = HashMap::new();
    for sample in samples {
        if !is_workload_container(&sample.container) {
            continue;
        }
        map.insert(sample.container.clone(), sample);
    }
    map
}

pub fn aggregate(samples: Vec<MetricSample>, expected: &[String], mode: ProbeMode) -> Report {
    let by_container = latest_by_container(samples);

    let mut names: Vec<&String> = expected.iter().collect();
    names.sort();
    names.dedup();

    let mut rows = Vec::with_capacity(names.len() + 1);
    let mut missing = Vec::new();
    let mut parse_failures = Vec::new();
    let mut total = 0.0;

    for name in names {
        let Some(sample) = by_container.get(name.as_str()) else {
            warn!("Missing container: {}", name);
            missing.push(name.clone());
            continue;
        };

        let converted = match sample.value.parse::<f64>() {
            Ok(n) => {
                total += n;
                mode.convert(n)
            }
            Err(source) => {
                let failure = ValueParseError {
                    container: name.clone(),
                    raw: sample.value.clone(),
                    source,
                };
                warn!("{}", failure);
                parse_failures.push(failure);
                mode.convert(0.0)
            }
        };

        rows.push(ReportRow {
            container: name.clone(),
            raw_value: sample.value.clone(),
            converted,
        });
    }

    rows.push(ReportRow {
        container: TOTAL_LABEL.to_string(),
        raw_value: format!("{:.2}", total),
        converted: mode.convert(total),
    });

    Report {
        mode,
        rows,
        total,
        missing,
        parse_failures,
    }
}
