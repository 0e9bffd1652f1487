//! Function host adapter.
//!
//! Under a serverless function host (custom handler protocol) the host
//! starts this process, forwards each HTTP invocation to the port given in
//! `FUNCTIONS_CUSTOMHANDLER_PORT`, and may change app settings between
//! invocations. Credentials are therefore re-read on every call.

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use thiserror::Error;

use crate::config::RelayConfig;
use crate::relay::{CredentialSource, HttpTokenIssuer, IssueError, TokenRelay};

pub const PORT_ENV: &str = "FUNCTIONS_CUSTOMHANDLER_PORT";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error)]
#[error("FUNCTIONS_CUSTOMHANDLER_PORT '{value}' is not a valid port")]
pub struct InvalidPort {
    pub value: String,
}

/// Loopback address the function host expects the handler on.
pub fn listen_address() -> Result<SocketAddr, InvalidPort> {
    listen_address_from(std::env::var(PORT_ENV).ok())
}

pub fn listen_address_from(value: Option<String>) -> Result<SocketAddr, InvalidPort> {
    let port = match value.as_deref().map(str::trim) {
        None | Some("") => DEFAULT_PORT,
        Some(raw) => raw.parse::<u16>().map_err(|_| InvalidPort {
            value: raw.to_string(),
        })?,
    };
    Ok(SocketAddr::from((Ipv4Addr::LOCALHOST, port)))
}

/// Relay that reads credentials from the environment per invocation.
pub fn relay_for_function_host(config: &RelayConfig) -> Result<TokenRelay, IssueError> {
    let issuer = HttpTokenIssuer::new(&config.upstream)?;
    Ok(TokenRelay::new(
        Arc::new(issuer),
        CredentialSource::Environment,
        config.upstream.status_policy,
    ))
}
