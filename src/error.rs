use std::num::ParseFloatError;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("invalid query URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("metrics endpoint returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("unexpected response body: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed value for container {container:?}: {reason}")]
    MalformedValue { container: String, reason: String },
    #[error("timestamp {0} is out of range")]
    TimestampOutOfRange(f64),
}

/// A container's sample value is not a number. Recoverable: the row is still
/// shown but contributes nothing to the total.
#[derive(Debug, Clone, Error)]
#[error("cannot parse value {raw:?} of container {container}: {source}")]
pub struct ValueParseError {
    pub container: String,
    pub raw: String,
    #[source]
    pub source: ParseFloatError,
}

/// Faults that abort a probe run.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("cannot write report: {0}")]
    Output(#[from] std::io::Error),
}
