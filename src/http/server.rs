//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the token route and status endpoint
//! - Wire up middleware (request ID, tracing, request timeout)
//! - Serve on a bound listener until the shutdown signal fires

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request},
    response::Response,
    routing::{any, get},
    Json, Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::RelayConfig;
use crate::http::request::{request_id_of, X_REQUEST_ID};
use crate::relay::{CredentialSource, HttpTokenIssuer, IssueError, SpeechCredentials, TokenRelay};

/// Path both deployment shapes serve the token on.
pub const TOKEN_ROUTE: &str = "/api/getSpeechToken";

/// Which deployment shape the process is running as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ServeMode {
    WebServer,
    FunctionHost,
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub relay: TokenRelay,
    pub mode: ServeMode,
}

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub mode: ServeMode,
}

/// HTTP server for the token relay.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server around an already wired relay.
    pub fn new(config: RelayConfig, relay: TokenRelay, mode: ServeMode) -> Self {
        let state = AppState { relay, mode };
        let router = Self::build_router(&config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &RelayConfig, state: AppState) -> Router {
        Router::new()
            .route(TOKEN_ROUTE, any(token_handler))
            .route("/status", get(status_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.listener.request_timeout_secs,
            )))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        path = %request.uri().path(),
                        request_id = %request_id_of(request),
                    )
                }),
            )
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
    }

    /// The fully layered router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server on the given listener until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Relay with credentials read once from the environment.
pub fn relay_for_web_server(config: &RelayConfig) -> Result<TokenRelay, IssueError> {
    let issuer = HttpTokenIssuer::new(&config.upstream)?;
    let credentials = SpeechCredentials::from_env();

    let missing = credentials.missing();
    if !missing.is_empty() {
        // Not fatal: each request will answer 500 until the operator fixes it.
        tracing::warn!(missing = ?missing, "Speech service credentials are not configured");
    }

    Ok(TokenRelay::new(
        Arc::new(issuer),
        CredentialSource::Fixed(credentials),
        config.upstream.status_policy,
    ))
}

async fn token_handler(State(state): State<AppState>, method: Method) -> Response {
    state.relay.handle(&method).await
}

async fn status_handler(State(state): State<AppState>) -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        mode: state.mode,
    })
}
