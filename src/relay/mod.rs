//! Token relay subsystem.
//!
//! # Data Flow
//! ```text
//! inbound method
//!     → handler.rs (method check)
//!     → credentials.rs (resolve key + region, reject bad regions)
//!     → issuer.rs (one POST to the speech service, never retried)
//!     → handler.rs (token passthrough + CORS headers, or plain-text error)
//! ```
//!
//! # Design Decisions
//! - The relay owns no mutable state; every invocation is independent
//! - The outbound call sits behind `TokenIssuer` so it can be faked
//! - Both deployment adapters share one `TokenRelay`

pub mod credentials;
pub mod error;
pub mod handler;
pub mod issuer;

pub use credentials::{
    CredentialSource, ResolvedCredentials, SpeechCredentials, REGION_ENV, SUBSCRIPTION_KEY_ENV,
};
pub use error::{IssueError, RelayError};
pub use handler::TokenRelay;
pub use issuer::{HttpTokenIssuer, IssuedToken, TokenIssuer, SUBSCRIPTION_KEY_HEADER};
