//! Error types for the token relay.
//!
//! Every variant of `RelayError` is a terminal outcome of one invocation and
//! maps to exactly one plain-text HTTP response.

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::config::UpstreamStatusPolicy;

/// Failure of a single call to the token issuer.
#[derive(Debug, Error)]
pub enum IssueError {
    /// Connection, TLS, timeout or body read failure.
    #[error("{0}")]
    Transport(String),

    /// The issuer answered with something other than 200.
    #[error("token issuer returned status {0}")]
    Status(StatusCode),

    /// The endpoint URL could not be built for the region.
    #[error("invalid token endpoint '{0}'")]
    InvalidEndpoint(String),

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(String),
}

/// Terminal failure states of one relay invocation.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Invalid request method. Only POST requests are allowed.")]
    InvalidMethod(Method),

    #[error("{} environment variable is missing.", .0.join(" or "))]
    MissingConfiguration(Vec<&'static str>),

    #[error("Invalid speech service configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Error fetching access token: {0}")]
    UpstreamTransport(String),

    #[error("Error fetching access token. Status code: {}", .0.as_u16())]
    UpstreamStatus(StatusCode),
}

impl RelayError {
    /// HTTP status reported to the caller for this failure.
    pub fn status_code(&self, policy: UpstreamStatusPolicy) -> StatusCode {
        match self {
            RelayError::InvalidMethod(_) => StatusCode::METHOD_NOT_ALLOWED,
            RelayError::UpstreamStatus(status) if policy == UpstreamStatusPolicy::PassThrough => {
                *status
            }
            RelayError::MissingConfiguration(_)
            | RelayError::InvalidConfiguration(_)
            | RelayError::UpstreamTransport(_)
            | RelayError::UpstreamStatus(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Render as a plain-text response under the given status policy.
    pub fn into_response_with(self, policy: UpstreamStatusPolicy) -> Response {
        let status = self.status_code(policy);
        let mut response = (status, self.to_string()).into_response();
        let headers = response.headers_mut();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        if matches!(self, RelayError::InvalidMethod(_)) {
            headers.insert(header::ALLOW, HeaderValue::from_static("POST"));
        }
        response
    }
}

impl From<IssueError> for RelayError {
    fn from(err: IssueError) -> Self {
        match err {
            IssueError::Status(status) => RelayError::UpstreamStatus(status),
            IssueError::InvalidEndpoint(_) => RelayError::InvalidConfiguration(err.to_string()),
            IssueError::Transport(_) | IssueError::Client(_) => {
                RelayError::UpstreamTransport(err.to_string())
            }
        }
    }
}
