//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//!
//! environment (AZURE_SPEECH_API_KEY, AZURE_SPEECH_REGION)
//!     → relay::SpeechCredentials (resolved at startup or per invocation)
//! ```
//!
//! # Design Decisions
//! - Secrets never live in the config file; they come from the environment
//! - All fields have defaults so the relay runs without a config file
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    ListenerConfig, ObservabilityConfig, RelayConfig, UpstreamConfig, UpstreamStatusPolicy,
    DEFAULT_ENDPOINT_TEMPLATE,
};
pub use validation::{validate_config, ValidationError};
