use std::io::Write;

use tracing::{debug, info};

use crate::error::{ProbeError, RequestError};
use crate::prometheus::{decode, PrometheusClient};
use crate::query::build_mode_query_url;
use crate::report::{aggregate, Report};
use crate::table::render;
use crate::types::{Config, ProbeMode};

/// Runs one fetch, decode and aggregate cycle for a pod.
pub struct Prober<'a> {
    client: &'a PrometheusClient,
    config: &'a Config,
}

impl<'a> Prober<'a> {
    pub fn new(client: &'a PrometheusClient, config: &'a Config) -> Self {
        Self { client, config }
    }

    pub async fn collect(&self, mode: ProbeMode) -> Result<Report, ProbeError> {
        let url = build_mode_query_url(self.config, mode).map_err(RequestError::from)?;
        info!("Querying {} for pod {}", mode.metric_name(), self.config.pod);

        let body = self.client.fetch(url).await?;
        let samples = decode(&body)?;
        debug!("Decoded {} samples", samples.len());

        let report = aggregate(samples, &self.config.containers, mode);
        info!(
            "Report for pod {}: {} containers, {} missing, {} unparsable",
            self.config.pod,
            report.rows.len() - 1,
            report.missing.len(),
            report.parse_failures.len()
        );
        Ok(report)
    }

    /// Collects the report and renders it into `out`. Nothing is written if
    /// any fatal error occurs before rendering.
    pub async fn run<W: Write>(&self, mode: ProbeMode, out: &mut W) -> Result<Report, ProbeError> {
        let report = self.collect(mode).await?;
        render(out, &report)?;
        out.flush()?;
        Ok(report)
    }
}
