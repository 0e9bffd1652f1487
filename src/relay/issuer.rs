//! Outbound call to the speech service token endpoint.
//!
//! # Responsibilities
//! - Build the regional endpoint URL from the configured template
//! - POST with the subscription key header and an empty body
//! - Return the body untouched on 200, classify everything else
//!
//! # Design Decisions
//! - One attempt per invocation; callers decide what a failure means
//! - Timeouts come from config and are enforced by the reqwest client

use std::error::Error as _;
use std::time::Duration;

use async_trait::async_trait;
use axum::http::StatusCode;
use bytes::Bytes;
use url::Url;

use crate::config::UpstreamConfig;
use crate::relay::error::IssueError;

pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Opaque bearer token exactly as the issuer returned it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken(Bytes);

impl IssuedToken {
    pub fn new(body: impl Into<Bytes>) -> Self {
        Self(body.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Bytes {
        self.0
    }
}

/// Source of speech service tokens.
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    /// Request one token for `region`, authenticating with `subscription_key`.
    async fn issue_token(
        &self,
        region: &str,
        subscription_key: &str,
    ) -> Result<IssuedToken, IssueError>;
}

/// `TokenIssuer` backed by a real HTTP call.
#[derive(Debug, Clone)]
pub struct HttpTokenIssuer {
    client: reqwest::Client,
    endpoint_template: String,
}

impl HttpTokenIssuer {
    pub fn new(config: &UpstreamConfig) -> Result<Self, IssueError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            // A 3xx is an issuer failure; following it would resend the key elsewhere.
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| IssueError::Client(e.to_string()))?;

        Ok(Self {
            client,
            endpoint_template: config.endpoint_template.clone(),
        })
    }

    /// Token endpoint for a region.
    pub fn endpoint_for(&self, region: &str) -> Result<Url, IssueError> {
        let raw = self.endpoint_template.replace("{region}", region);
        Url::parse(&raw).map_err(|_| IssueError::InvalidEndpoint(raw))
    }
}

#[async_trait]
impl TokenIssuer for HttpTokenIssuer {
    async fn issue_token(
        &self,
        region: &str,
        subscription_key: &str,
    ) -> Result<IssuedToken, IssueError> {
        let endpoint = self.endpoint_for(region)?;

        tracing::debug!(endpoint = %endpoint, region = %region, "Requesting token from issuer");

        let response = self
            .client
            .post(endpoint)
            .header(SUBSCRIPTION_KEY_HEADER, subscription_key)
            .header(reqwest::header::CONTENT_LENGTH, "0")
            .send()
            .await
            .map_err(|e| IssueError::Transport(describe(&e)))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(IssueError::Status(status));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| IssueError::Transport(describe(&e)))?;

        Ok(IssuedToken::new(body))
    }
}

/// Flatten an error and its sources into one line.
fn describe(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
