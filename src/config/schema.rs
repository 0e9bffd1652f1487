//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from a TOML file.
//! Every section falls back to defaults, so an empty file is valid.

use serde::{Deserialize, Serialize};

/// Token endpoint of the speech service; `{region}` is substituted per call.
pub const DEFAULT_ENDPOINT_TEMPLATE: &str =
    "https://{region}.api.cognitive.microsoft.com/sts/v1.0/issueToken";

/// Root configuration for the token relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind address, request deadline).
    pub listener: ListenerConfig,

    /// Outbound call to the token issuer.
    pub upstream: UpstreamConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Total time allowed for one inbound request, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// How a non-200 answer from the token issuer is reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UpstreamStatusPolicy {
    /// Always answer 500.
    #[default]
    Mask,
    /// Answer with the issuer's own status code.
    PassThrough,
}

/// Token issuer settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// URL template containing a `{region}` placeholder.
    pub endpoint_template: String,

    /// Whole-call timeout in seconds.
    pub timeout_secs: u64,

    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,

    pub status_policy: UpstreamStatusPolicy,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            endpoint_template: DEFAULT_ENDPOINT_TEMPLATE.to_string(),
            timeout_secs: 10,
            connect_timeout_secs: 5,
            status_policy: UpstreamStatusPolicy::Mask,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    pub log_level: String,

    /// Emit JSON lines instead of the human-readable format.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}
