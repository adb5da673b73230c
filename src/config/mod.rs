//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (environment overrides: BACKEND_URL_1/2, VAL_API_KEY, ...)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → handed to Gateway and HttpServer at construction
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; handlers never read the environment
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    BackendsConfig, GatewayConfig, ListenerConfig, ObservabilityConfig, SecurityConfig,
    TimeoutConfig,
};
pub use validation::ValidationError;
