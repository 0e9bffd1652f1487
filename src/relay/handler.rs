//! The token relay handler shared by every deployment adapter.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, HeaderValue, Method, StatusCode},
    response::Response,
};

use crate::config::UpstreamStatusPolicy;
use crate::relay::credentials::CredentialSource;
use crate::relay::error::RelayError;
use crate::relay::issuer::{IssuedToken, TokenIssuer};

const ALLOW_METHODS: &str = "POST, GET, OPTIONS";

/// Validates, resolves credentials, calls the issuer and shapes the answer.
#[derive(Clone)]
pub struct TokenRelay {
    issuer: Arc<dyn TokenIssuer>,
    credentials: CredentialSource,
    status_policy: UpstreamStatusPolicy,
}

impl TokenRelay {
    pub fn new(
        issuer: Arc<dyn TokenIssuer>,
        credentials: CredentialSource,
        status_policy: UpstreamStatusPolicy,
    ) -> Self {
        Self {
            issuer,
            credentials,
            status_policy,
        }
    }

    /// Run one invocation up to the issuer's answer.
    pub async fn issue(&self, method: &Method) -> Result<IssuedToken, RelayError> {
        if *method != Method::POST {
            return Err(RelayError::InvalidMethod(method.clone()));
        }

        let credentials = self.credentials.load().resolve()?;

        let token = self
            .issuer
            .issue_token(&credentials.region, &credentials.subscription_key)
            .await?;

        Ok(token)
    }

    /// Run one invocation and render the HTTP response.
    pub async fn handle(&self, method: &Method) -> Response {
        match self.issue(method).await {
            Ok(token) => {
                tracing::info!(bytes = token.as_bytes().len(), "Access token retrieved");
                token_response(token)
            }
            Err(err) => {
                let status = err.status_code(self.status_policy);
                match &err {
                    RelayError::InvalidMethod(_) => {
                        tracing::warn!(method = %method, error = %err, "Rejected request method")
                    }
                    RelayError::MissingConfiguration(_) | RelayError::InvalidConfiguration(_) => {
                        tracing::warn!(error = %err, "Speech service credentials unusable")
                    }
                    RelayError::UpstreamTransport(_) | RelayError::UpstreamStatus(_) => {
                        tracing::error!(status = %status, error = %err, "Token issuer call failed")
                    }
                }
                err.into_response_with(self.status_policy)
            }
        }
    }
}

fn token_response(token: IssuedToken) -> Response {
    let mut response = Response::new(Body::from(token.into_bytes()));
    *response.status_mut() = StatusCode::OK;
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    response
}
