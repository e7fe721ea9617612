use std::path::Path;

use crate::error::ConfigError;
use crate::types::Config;

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_config(contents: &str) -> Result<Config, serde_yaml::Error> {
    serde_yaml::from_str(contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FULL: &str = r#"
token: sha256~abc
host: https://console.example.com
pod: api-7c9d
containers:
  - worker
  - api
"#;

    #[test]
    fn test_parse_config_fields_verbatim() {
        let config = parse_config(FULL).unwrap();

        assert_eq!(config.token, "sha256~abc");
        assert_eq!(config.host, "https://console.example.com");
        assert_eq!(config.pod, "api-7c9d");
        // order from the file is kept; sorting happens at report time
        assert_eq!(config.containers, vec!["worker", "api"]);
        assert!(!config.verify_tls);
    }

    #[test]
    fn test_parse_config_verify_tls() {
        let yaml = format!("{}verify_tls: true\n", FULL);
        let config = parse_config(&yaml).unwrap();
        assert!(config.verify_tls);
    }

    #[test]
    fn test_parse_config_missing_field() {
        let yaml = "token: t\nhost: https://h\npod: p\n";
        let err = parse_config(yaml).unwrap_err();
        assert!(err.to_string().contains("containers"));
    }

    #[test]
    fn test_parse_config_wrong_shape() {
        let yaml = "token: t\nhost: https://h\npod: p\ncontainers: api\n";
        assert!(parse_config(yaml).is_err());
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FULL.as_bytes()).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.pod, "api-7c9d");
    }

    #[test]
    fn test_load_config_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");

        match load_config(&missing) {
            Err(ConfigError::Read { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected read error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_config_malformed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"token: [unterminated").unwrap();

        assert!(matches!(load_config(file.path()), Err(ConfigError::Parse { .. })));
    }
}
