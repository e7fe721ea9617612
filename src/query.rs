use url::Url;

use crate::types::{Config, ProbeMode};

pub const QUERY_PATH: &str = "/api/prometheus/api/v1/query";

/// PromQL selector for `metric` restricted to one pod.
pub fn build_selector(metric: &str, pod: &str) -> String {
    format!("{}{{pod='{}'}}", metric, pod)
}

pub fn build_query_url(config: &Config, metric: &str) -> Result<Url, url::ParseError> {
    let base = format!("{}{}", config.host.trim_end_matches('/'), QUERY_PATH);
    let mut url = Url::parse(&base)?;
    url.query_pairs_mut()
        .append_pair("query", &build_selector(metric, &config.pod));
    Ok(url)
}

pub fn build_mode_query_url(config: &Config, mode: ProbeMode) -> Result<Url, url::ParseError> {
    build_query_url(config, mode.metric_name())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(host: &str) -> Config {
        Config {
            token: "t".to_string(),
            host: host.to_string(),
            pod: "api-7c9d".to_string(),
            containers: vec![],
            verify_tls: false,
        }
    }

    #[test]
    fn test_build_selector() {
        assert_eq!(
            build_selector("container_memory_working_set_bytes", "api-7c9d"),
            "container_memory_working_set_bytes{pod='api-7c9d'}"
        );
    }

    #[test]
    fn test_build_query_url_escapes_selector() {
        let url = build_query_url(&config("https://console.example.com"), "up").unwrap();

        assert_eq!(url.path(), QUERY_PATH);
        assert_eq!(url.host_str(), Some("console.example.com"));
        assert!(!url.as_str().contains('{'));
        assert!(!url.as_str().contains('\''));

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs, vec![("query".to_string(), "up{pod='api-7c9d'}".to_string())]);
    }

    #[test]
    fn test_build_query_url_trailing_slash() {
        let url = build_query_url(&config("https://console.example.com/"), "up").unwrap();
        assert_eq!(url.path(), QUERY_PATH);
    }

    #[test]
    fn test_build_mode_query_url() {
        let cfg = config("https://h");
        for (mode, metric) in [
            (ProbeMode::Memory, "container_memory_working_set_bytes"),
            (ProbeMode::Cpu, "container_cpu_usage_seconds_total"),
        ] {
            let url = build_mode_query_url(&cfg, mode).unwrap();
            let (_, query) = url.query_pairs().next().unwrap();
            assert_eq!(query, format!("{}{{pod='api-7c9d'}}", metric));
        }
    }

    #[test]
    fn test_build_query_url_invalid_host() {
        assert!(build_query_url(&config("not a host"), "up").is_err());
    }
}
