//! Configuration loading and constants.
//!
//! Loads application configuration from an optional TOML file. Every section
//! has defaults, so running without a file reproduces the stock behavior:
//! listen on `[::]:8080` (IPv6 and IPv4) and stall the slow branch for four seconds.

use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;

// =============================================================================
// Defaults
// =============================================================================

/// Default bind host (all interfaces, dual-stack where the OS allows)
pub const DEFAULT_HTTP_HOST: &str = "::";

/// Default bind port
pub const DEFAULT_HTTP_PORT: u16 = 8080;

/// Delay applied to the slow-but-healthy outcome, in seconds
pub const DEFAULT_LATENCY_SECONDS: u64 = 4;

/// Default log filter when neither `--log-level` nor RUST_LOG is set
pub const DEFAULT_LOG_FILTER: &str = "flaky_health=info,tower_http=info";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

/// Accepted values for `logging.format`
pub const LOG_FORMATS: &[&str] = &["text", "json"];

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Fault injection tuning
    #[serde(default)]
    pub fault: FaultConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        DEFAULT_HTTP_HOST.to_string()
    }

    fn default_port() -> u16 {
        DEFAULT_HTTP_PORT
    }

    /// Parse host and port into a socket address.
    ///
    /// The host is an IP literal; IPv6 may be bracketed (`[::1]`) or bare (`::1`).
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let host = self
            .host
            .strip_prefix('[')
            .and_then(|h| h.strip_suffix(']'))
            .unwrap_or(self.host.as_str());
        let ip: IpAddr = host.parse().map_err(|e| {
            ConfigError::Validation(format!(
                "Invalid http.host '{}' (port {}): {}",
                self.host, self.port, e
            ))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Fault injection settings
#[derive(Debug, Clone, Deserialize)]
pub struct FaultConfig {
    /// How long the slow outcome waits before answering (default: 4)
    #[serde(default = "FaultConfig::default_latency")]
    pub latency_seconds: u64,
}

impl Default for FaultConfig {
    fn default() -> Self {
        Self {
            latency_seconds: Self::default_latency(),
        }
    }
}

impl FaultConfig {
    fn default_latency() -> u64 {
        DEFAULT_LATENCY_SECONDS
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> String {
        DEFAULT_LOG_FORMAT.to_string()
    }

    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::Validation(format!(
                "Unknown logging.format '{}', expected one of {:?}",
                self.logging.format, LOG_FORMATS
            )));
        }

        self.http.socket_addr()?;
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_stock_stub() {
        let config = AppConfig::default();
        assert_eq!(config.http.host, "::");
        assert_eq!(config.http.port, 8080);
        assert_eq!(config.fault.latency_seconds, 4);
        assert!(!config.logging.is_json());
        assert_eq!(
            config.http.socket_addr().unwrap(),
            "[::]:8080".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_host_literals() {
        let addr = |host: &str| {
            HttpServerConfig {
                host: host.to_string(),
                port: 9000,
            }
            .socket_addr()
            .unwrap()
        };
        assert_eq!(addr("0.0.0.0"), "0.0.0.0:9000".parse::<SocketAddr>().unwrap());
        assert_eq!(addr("127.0.0.1"), "127.0.0.1:9000".parse::<SocketAddr>().unwrap());
        assert_eq!(addr("::1"), "[::1]:9000".parse::<SocketAddr>().unwrap());
        assert_eq!(addr("[::1]"), "[::1]:9000".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let config = AppConfig::parse(include_str!("../dist/flaky-health.toml")).unwrap();
        assert_eq!(config.http.host, DEFAULT_HTTP_HOST);
        assert_eq!(config.http.port, DEFAULT_HTTP_PORT);
        assert_eq!(config.fault.latency_seconds, DEFAULT_LATENCY_SECONDS);
        assert_eq!(config.logging.format, DEFAULT_LOG_FORMAT);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = AppConfig::parse("").unwrap();
        assert_eq!(config.http.port, DEFAULT_HTTP_PORT);
        assert_eq!(config.fault.latency_seconds, DEFAULT_LATENCY_SECONDS);
    }

    #[test]
    fn test_partial_sections() {
        let config = AppConfig::parse(
            r#"
            [http]
            port = 9090

            [fault]
            latency_seconds = 1
            "#,
        )
        .unwrap();
        assert_eq!(config.http.host, DEFAULT_HTTP_HOST);
        assert_eq!(config.http.port, 9090);
        assert_eq!(config.fault.latency_seconds, 1);
    }

    #[test]
    fn test_json_logging() {
        let config = AppConfig::parse("[logging]\nformat = \"json\"\n").unwrap();
        assert!(config.logging.is_json());
    }

    #[test]
    fn test_unknown_log_format_rejected() {
        let err = AppConfig::parse("[logging]\nformat = \"xml\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_bad_host_rejected() {
        let err = AppConfig::parse("[http]\nhost = \"not a host\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_malformed_toml() {
        let err = AppConfig::parse("[http\nport = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[http]\nhost = \"127.0.0.1\"\nport = 8181").unwrap();
        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.http.host, "127.0.0.1");
        assert_eq!(config.http.port, 8181);
    }

    #[test]
    fn test_load_missing_file() {
        let err = AppConfig::load("/nonexistent/flaky-health.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
