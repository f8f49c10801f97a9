//! Configuration
//!
//! Figment-layered configuration: compiled defaults, then a `wsspi.toml`
//! file, then `WSSPI__`-prefixed environment variables.

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::{AppConfig, ContextConfig, LoaderConfig, LoggingConfig, SecurityConfig};
