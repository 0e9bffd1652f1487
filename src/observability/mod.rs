//! Observability subsystem.
//!
//! Structured logging only: every relay outcome is a `tracing` event and
//! every HTTP request a span carrying its request id.

pub mod logging;

pub use logging::init_logging;
