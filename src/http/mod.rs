//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (assign x-request-id, propagate to response)
//!     → relay::TokenRelay (method check, credentials, issuer call)
//!     → Send to client
//! ```
//!
//! Both deployment shapes run this same server. `function.rs` holds the
//! pieces specific to running under a function host.

pub mod function;
pub mod request;
pub mod server;

pub use request::X_REQUEST_ID;
pub use server::{relay_for_web_server, AppState, HttpServer, ServeMode, TOKEN_ROUTE};
