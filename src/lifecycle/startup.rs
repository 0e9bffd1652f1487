//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Wire the relay for the chosen deployment shape
//! - Bind the listener and serve until shutdown

use std::net::SocketAddr;
use std::path::Path;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{load_config, validate_config, ConfigError, RelayConfig};
use crate::http::function::{self, InvalidPort};
use crate::http::{relay_for_web_server, HttpServer, ServeMode};
use crate::lifecycle::Shutdown;
use crate::relay::IssueError;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to create token issuer: {0}")]
    Issuer(#[from] IssueError),

    #[error(transparent)]
    Port(#[from] InvalidPort),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(std::io::Error),
}

/// Load the config file when given, otherwise start from defaults.
pub fn load_configuration(path: Option<&Path>) -> Result<RelayConfig, StartupError> {
    let config = match path {
        Some(path) => load_config(path)?,
        None => {
            let config = RelayConfig::default();
            validate_config(&config).map_err(ConfigError::Validation)?;
            config
        }
    };
    Ok(config)
}

/// Bind and serve in the given mode until `shutdown` fires.
pub async fn start(
    mode: ServeMode,
    config: RelayConfig,
    shutdown: &Shutdown,
) -> Result<(), StartupError> {
    let (relay, addr) = match mode {
        ServeMode::WebServer => (
            relay_for_web_server(&config)?,
            config.listener.bind_address.clone(),
        ),
        ServeMode::FunctionHost => (
            function::relay_for_function_host(&config)?,
            function::listen_address()?.to_string(),
        ),
    };

    tracing::info!(
        mode = ?mode,
        bind_address = %addr,
        endpoint_template = %config.upstream.endpoint_template,
        status_policy = ?config.upstream.status_policy,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind {
            addr: addr.clone(),
            source,
        })?;
    let local_addr: SocketAddr = listener.local_addr().map_err(StartupError::Serve)?;
    tracing::info!(address = %local_addr, "Listening for connections");

    let server = HttpServer::new(config, relay, mode);
    server
        .run(listener, shutdown.subscribe())
        .await
        .map_err(StartupError::Serve)
}
