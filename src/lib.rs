// Public modules
pub mod types;
pub mod error;
pub mod config;
pub mod query;
pub mod prometheus;
pub mod report;
pub mod table;
pub mod probe;

// Re-export commonly used items
pub use types::*;
pub use error::{ConfigError, DecodeError, ProbeError, RequestError, ValueParseError};
pub use config::{load_config, parse_config};
pub use query::{build_mode_query_url, build_query_url, build_selector};
pub use prometheus::{decode, PrometheusClient};
pub use report::{aggregate, Report};
pub use table::render;
pub use probe::Prober;
