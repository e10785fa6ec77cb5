//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files and
//! default every field, so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct NlbConfig {
    /// Listener configuration.
    pub listener: ListenerConfig,

    /// Server variable names read and written by the resolvers.
    pub headers: HeaderKeys,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// `SERVER_PORT` reported for requests without a forwarded protocol.
    pub default_port: u16,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            default_port: 80,
        }
    }
}

/// Names of the server variables the resolvers operate on.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct HeaderKeys {
    /// Forwarded-for chain (input).
    pub forwarded_for: String,

    /// Forwarded protocol (input).
    pub forwarded_proto: String,

    /// Client address (output).
    pub remote_addr: String,

    /// `on` / `off` protocol marker (output).
    pub https: String,

    /// Effective port (output).
    pub server_port: String,

    /// `1` / `0` secure flag (output).
    pub server_port_secure: String,
}

impl Default for HeaderKeys {
    fn default() -> Self {
        Self {
            forwarded_for: "HTTP_X_FORWARDED_FOR".to_string(),
            forwarded_proto: "HTTP_X_FORWARDED_PROTO".to_string(),
            remote_addr: "REMOTE_ADDR".to_string(),
            https: "HTTPS".to_string(),
            server_port: "SERVER_PORT".to_string(),
            server_port_secure: "SERVER_PORT_SECURE".to_string(),
        }
    }
}

impl HeaderKeys {
    pub fn inputs(&self) -> [(&'static str, &str); 2] {
        [
            ("forwarded_for", self.forwarded_for.as_str()),
            ("forwarded_proto", self.forwarded_proto.as_str()),
        ]
    }

    pub fn outputs(&self) -> [(&'static str, &str); 4] {
        [
            ("remote_addr", self.remote_addr.as_str()),
            ("https", self.https.as_str()),
            ("server_port", self.server_port.as_str()),
            ("server_port_secure", self.server_port_secure.as_str()),
        ]
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
