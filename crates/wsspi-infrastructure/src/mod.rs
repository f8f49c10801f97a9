//! # Infrastructure Layer
//!
//! Concrete adapters for the ports declared in `wsspi-domain`, plus the
//! configuration and logging that wire them together.
//!
//! ### Resolution
//! | Module | Description |
//! |--------|-------------|
//! | [`cache`] | Weak-keyed services file lookup cache |
//! | [`context`] | Classpath-style loading contexts and the thread-current context |
//! | [`external`] | Runtime-home configuration file strategy |
//! | [`properties`] | Process-wide property store |
//!
//! ### Security
//! | Module | Description |
//! |--------|-------------|
//! | [`security`] | Direct and sandboxed privileged executors, ambient executor slot |
//!
//! ### Configuration & Bootstrap
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment configuration with TOML file and env overrides |
//! | [`di`] | Composition root building a `ServiceLoader` |
//! | [`constants`] | Centralized configuration constants |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |

pub mod cache;
pub mod config;
pub mod constants;
pub mod context;
pub mod di;
pub mod error_ext;
pub mod external;
pub mod logging;
pub mod properties;
pub mod security;

pub use cache::ResolutionKeyCache;
pub use context::{ClasspathContext, ThreadContextSupplier};
pub use di::{ServiceRuntime, build_runtime, build_service_loader};
pub use error_ext::ErrorContext;
pub use external::RuntimeHomeConfig;
pub use properties::SystemProperties;
pub use security::{AmbientExecutor, DirectExecutor, SandboxPolicy, SandboxedExecutor};
