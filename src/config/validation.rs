//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the endpoint template can address a region
//! - Validate value ranges (timeouts > 0, bind address parses)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RelayConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::RelayConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    BindAddress(String),

    #[error("upstream.endpoint_template must contain '{{region}}'")]
    MissingRegionPlaceholder,

    #[error("upstream.endpoint_template '{0}' is not an http(s) URL")]
    EndpointScheme(String),

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error(
        "upstream.timeout_secs ({upstream}) must be less than listener.request_timeout_secs ({request})"
    )]
    UpstreamOutlivesRequest { upstream: u64, request: u64 },
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    let template = &config.upstream.endpoint_template;
    if !template.contains("{region}") {
        errors.push(ValidationError::MissingRegionPlaceholder);
    }
    // Probe with a neutral region so the placeholder itself cannot fail parsing.
    match url::Url::parse(&template.replace("{region}", "region")) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        _ => errors.push(ValidationError::EndpointScheme(template.clone())),
    }

    if config.listener.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("listener.request_timeout_secs"));
    }
    if config.upstream.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("upstream.timeout_secs"));
    }
    if config.upstream.connect_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("upstream.connect_timeout_secs"));
    }

    // The issuer call must fail on its own deadline so the caller gets the
    // plain-text 500, not the request layer's bare 408.
    let upstream = config.upstream.timeout_secs;
    let request = config.listener.request_timeout_secs;
    if upstream > 0 && request > 0 && upstream >= request {
        errors.push(ValidationError::UpstreamOutlivesRequest { upstream, request });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
