use chrono::{DateTime, Utc};
use reqwest::header::COOKIE;
use serde::Deserialize;
use tracing::{debug, error};
use url::Url;

use crate::error::{DecodeError, RequestError};
use crate::types::{Config, MetricSample};

const MAX_ERROR_BODY: usize = 512;

#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    pub data: QueryData,
}

#[derive(Debug, Deserialize)]
pub struct QueryData {
    pub result: Vec<QueryResult>,
}

#[derive(Debug, Deserialize)]
pub struct QueryResult {
    pub metric: MetricLabels,
    pub value: Vec<SampleValue>,
}

#[derive(Debug, Deserialize)]
pub struct MetricLabels {
    #[serde(default)]
    pub container: String,
}

/// One element of a `[timestamp, "value"]` pair, told apart by JSON type
/// rather than position.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SampleValue {
    Timestamp(f64),
    Text(String),
}

impl TryFrom<QueryResult> for MetricSample {
    type Error = DecodeError;

    fn try_from(res: QueryResult) -> Result<Self, Self::Error> {
        let container = res.metric.container;
        let malformed = |reason: String| DecodeError::MalformedValue {
            container: container.clone(),
            reason,
        };

        if res.value.len() != 2 {
            return Err(malformed(format!("expected 2 elements, got {}", res.value.len())));
        }

        let mut timestamp = None;
        let mut value = None;
        for element in res.value {
            match element {
                SampleValue::Timestamp(t) if timestamp.is_none() => timestamp = Some(t),
                SampleValue::Text(s) if value.is_none() => value = Some(s),
                SampleValue::Timestamp(_) => return Err(malformed("two numeric elements".to_string())),
                SampleValue::Text(_) => return Err(malformed("two string elements".to_string())),
            }
        }

        // exactly two elements and no duplicates, so both are set
        let (Some(ts), Some(value)) = (timestamp, value) else {
            return Err(malformed("missing timestamp or value".to_string()));
        };

        Ok(MetricSample {
            container,
            timestamp: float_to_timestamp(ts)?,
            value,
        })
    }
}

/// Seconds since the epoch with a fractional sub-second part.
pub fn float_to_timestamp(t: f64) -> Result<DateTime<Utc>, DecodeError> {
    if !t.is_finite() || t.abs() >= i64::MAX as f64 {
        return Err(DecodeError::TimestampOutOfRange(t));
    }
    let secs = t.floor();
    let nanos = (((t - secs) * 1e9).round() as u32).min(999_999_999);
    DateTime::from_timestamp(secs as i64, nanos).ok_or(DecodeError::TimestampOutOfRange(t))
}

pub fn decode(body: &[u8]) -> Result<Vec<MetricSample>, DecodeError> {
    let resp: QueryResponse = serde_json::from_slice(body)?;
    resp.data
        .result
        .into_iter()
        .map(MetricSample::try_from)
        .collect()
}

/// Thin client for the instant query endpoint.
pub struct PrometheusClient {
    http: reqwest::Client,
    token: String,
}

impl PrometheusClient {
    pub fn new(config: &Config) -> Result<Self, RequestError> {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(!config.verify_tls)
            .build()?;
        Ok(Self {
            http,
            token: config.token.clone(),
        })
    }

    pub async fn fetch(&self, url: Url) -> Result<Vec<u8>, RequestError> {
        debug!("GET {}", url);
        let res = self
            .http
            .get(url)
            .header(COOKIE, format!("openshift-session-token={};", self.token))
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let mut body = res.text().await.unwrap_or_default();
            if body.len() > MAX_ERROR_BODY {
                let mut cut = MAX_ERROR_BODY;
                while !body.is_char_boundary(cut) {
                    cut -= 1;
                }
                body.truncate(cut);
            }
            error!("Metrics query failed: {} - {}", status, body);
            return Err(RequestError::Status { status, body });
        }

        Ok(res.bytes().await?.to_vec())
    }
}
