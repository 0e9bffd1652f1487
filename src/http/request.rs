//! Request identification.
//!
//! Every request gets an `x-request-id` (UUID v4, via tower-http's
//! `MakeRequestUuid`) unless the caller sent one. The id is attached to the
//! trace span and echoed on the response.

use axum::http::{HeaderName, Request};

pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Read the request id assigned to a request, if any.
pub fn request_id_of<B>(request: &Request<B>) -> &str {
    request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}
