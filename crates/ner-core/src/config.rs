//! NER Service Configuration
//!
//! Settings come from environment variables with hardcoded defaults,
//! optionally layered over a TOML file.
//!
//! | Variable           | Default                |
//! |--------------------|------------------------|
//! | `MITIE_MODEL_PATH` | `models/ner_model.dat` |
//! | `PORT`             | `8080`                 |
//! | `HOST`             | `0.0.0.0`              |
//! | `NER_BACKEND`      | `mitie` or `rules`     |
//! | `LOG_LEVEL`        | `info`                 |
//! | `LOG_FORMAT`       | `text`                 |
//!
//! Empty variables are treated as unset.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_MODEL_PATH: &str = "models/ner_model.dat";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// MITIE model file
    pub model_path: PathBuf,

    /// Port to listen on
    pub port: u16,

    /// Host to bind to
    pub host: String,

    /// Extraction backend
    pub backend: Backend,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            port: DEFAULT_PORT,
            host: DEFAULT_HOST.to_string(),
            backend: Backend::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        config.apply_overrides(lookup)?;
        Ok(config)
    }

    /// Load from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileReadError {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path,
            message: e.to_string(),
        })
    }

    /// Merge with environment variables (env takes precedence)
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Lay values from `lookup` over this configuration
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.apply_overrides(lookup)?;
        Ok(self)
    }

    /// Address string for the HTTP listener
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(path) = get("MITIE_MODEL_PATH") {
            self.model_path = PathBuf::from(path);
        }
        if let Some(port) = get("PORT") {
            self.port = port.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT".to_string(),
                value: port,
            })?;
        }
        if let Some(host) = get("HOST") {
            self.host = host;
        }
        if let Some(backend) = get("NER_BACKEND") {
            self.backend = backend.parse()?;
        }
        if let Some(level) = get("LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = get("LOG_FORMAT") {
            self.logging.json_format = match format.to_lowercase().as_str() {
                "json" => true,
                "text" | "pretty" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "LOG_FORMAT".to_string(),
                        value: format,
                    })
                }
            };
        }

        Ok(())
    }
}

/// Entity extraction backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// MITIE statistical model (requires the `mitie` feature)
    Mitie,
    /// Built-in gazetteer and capitalization rules
    Rules,
}

impl Default for Backend {
    fn default() -> Self {
        if cfg!(feature = "mitie") {
            Self::Mitie
        } else {
            Self::Rules
        }
    }
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mitie => "mitie",
            Self::Rules => "rules",
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Backend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mitie" => Ok(Self::Mitie),
            "rules" | "rule" => Ok(Self::Rules),
            _ => Err(ConfigError::InvalidValue {
                key: "NER_BACKEND".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// JSON format for logs
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_values() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.model_path, PathBuf::from("models/ner_model.dat"));
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_environment_values() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("MITIE_MODEL_PATH", "/custom/path/model.dat"),
            ("PORT", "9090"),
        ]))
        .unwrap();

        assert_eq!(config.model_path, PathBuf::from("/custom/path/model.dat"));
        assert_eq!(config.port, 9090);
        assert_eq!(config.listen_addr(), "0.0.0.0:9090");
    }

    #[test]
    fn test_partial_environment() {
        let config =
            AppConfig::from_lookup(lookup_from(&[("MITIE_MODEL_PATH", "/custom/model.dat")]))
                .unwrap();

        assert_eq!(config.model_path, PathBuf::from("/custom/model.dat"));
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_empty_values_use_defaults() {
        let config =
            AppConfig::from_lookup(lookup_from(&[("MITIE_MODEL_PATH", ""), ("PORT", "")]))
                .unwrap();

        assert_eq!(config.model_path, PathBuf::from(DEFAULT_MODEL_PATH));
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn test_invalid_port() {
        let err = AppConfig::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "PORT"));
    }

    #[test]
    fn test_backend_parse() {
        assert_eq!("mitie".parse::<Backend>().unwrap(), Backend::Mitie);
        assert_eq!("RULES".parse::<Backend>().unwrap(), Backend::Rules);
        assert!("spacy".parse::<Backend>().is_err());

        let config = AppConfig::from_lookup(lookup_from(&[("NER_BACKEND", "rules")])).unwrap();
        assert_eq!(config.backend, Backend::Rules);
    }

    #[test]
    fn test_log_format() {
        let config = AppConfig::from_lookup(lookup_from(&[("LOG_FORMAT", "json")])).unwrap();
        assert!(config.logging.json_format);
        assert!(AppConfig::from_lookup(lookup_from(&[("LOG_FORMAT", "xml")])).is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
model_path = "/opt/models/es.dat"
port = 3000
backend = "rules"

[logging]
level = "debug"
"#
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.model_path, PathBuf::from("/opt/models/es.dat"));
        assert_eq!(config.port, 3000);
        assert_eq!(config.backend, Backend::Rules);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.host, DEFAULT_HOST);
    }

    #[test]
    fn test_overrides_over_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
model_path = "/opt/models/es.dat"
port = 3000
host = "127.0.0.1"
"#
        )
        .unwrap();

        let config = AppConfig::from_file(file.path())
            .unwrap()
            .with_overrides(lookup_from(&[
                ("PORT", "9191"),
                ("MITIE_MODEL_PATH", ""),
                ("HOST", "  "),
            ]))
            .unwrap();

        assert_eq!(config.port, 9191);
        assert_eq!(config.model_path, PathBuf::from("/opt/models/es.dat"));
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.listen_addr(), "127.0.0.1:9191");
    }

    #[test]
    fn test_env_override_matches_from_env() {
        let layered = AppConfig::default().with_env_override();
        match (layered, AppConfig::from_env()) {
            (Ok(layered), Ok(direct)) => assert_eq!(layered, direct),
            (Err(_), Err(_)) => {}
            (layered, direct) => panic!("mismatch: {layered:?} vs {direct:?}"),
        }
    }

    #[test]
    fn test_from_missing_file() {
        let err = AppConfig::from_file("/nonexistent/ner.toml").unwrap_err();
        assert!(matches!(err, ConfigError::FileReadError { .. }));
    }
}
