use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DriveError, DriveResult};

pub const DEFAULT_CONFIG_FILE: &str = "landrive.json";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    pub server: String,
    pub api_prefix: String,
    /// Path segment after the prefix for deletes: `delete` gives
    /// `DELETE /api/delete/{name}`, `files` gives `DELETE /api/files/{name}`.
    pub delete_route: String,
    pub download_dir: PathBuf,
    /// No timeout unless set.
    pub timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: "http://127.0.0.1:8080".to_string(),
            api_prefix: "/api".to_string(),
            delete_route: "delete".to_string(),
            download_dir: PathBuf::from("."),
            timeout_secs: None,
        }
    }
}

impl Config {
    /// Load the config file at `path`, or `landrive.json` in the working
    /// directory when no path is given. Only an explicitly named file is
    /// required to exist.
    pub fn load(path: Option<&Path>) -> DriveResult<Config> {
        let (path, required) = match path {
            Some(p) => (p, true),
            None => (Path::new(DEFAULT_CONFIG_FILE), false),
        };
        match fs::read_to_string(path) {
            Ok(content) => Config::parse(&content),
            Err(e) if e.kind() == ErrorKind::NotFound && !required => Ok(Config::default()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(DriveError::Config(format!(
                "{} does not exist, you should create it with content like:\n{}",
                path.display(),
                Config::example()
            ))),
            Err(e) => Err(e.into()),
        }
    }

    pub fn parse(content: &str) -> DriveResult<Config> {
        let config: Config = serde_json::from_str(content)?;
        if config.server.trim().is_empty() {
            return Err(DriveError::Config("`server` must not be empty".to_string()));
        }
        if config.delete_route.is_empty() || config.delete_route.contains('/') {
            return Err(DriveError::Config(format!(
                "`delete_route` must be a single path segment, got {:?}",
                config.delete_route
            )));
        }
        Ok(config)
    }

    pub fn example() -> String {
        serde_json::to_string_pretty(&Config::default()).unwrap_or_default()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = Config::parse(r#"{"server": "http://192.168.1.180:8080"}"#).unwrap();
        assert_eq!(config.server, "http://192.168.1.180:8080");
        assert_eq!(config.api_prefix, "/api");
        assert_eq!(config.delete_route, "delete");
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn timeout_is_seconds() {
        let config = Config::parse(r#"{"timeout_secs": 30}"#).unwrap();
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn empty_server_is_rejected() {
        assert!(matches!(
            Config::parse(r#"{"server": " "}"#),
            Err(DriveError::Config(_))
        ));
    }

    #[test]
    fn delete_route_must_be_one_segment() {
        assert!(Config::parse(r#"{"delete_route": "files"}"#).is_ok());
        assert!(matches!(
            Config::parse(r#"{"delete_route": "api/files"}"#),
            Err(DriveError::Config(_))
        ));
    }

    #[test]
    fn missing_explicit_file_explains_format() {
        let err = Config::load(Some(Path::new("does/not/exist.json"))).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("does not exist"));
        assert!(msg.contains("api_prefix"));
    }
}
