//! Port traits
//!
//! Boundaries between the resolution services and the adapters that
//! supply resources, privileges, properties and caching.

pub mod cache;
pub mod external;
pub mod loading;
pub mod properties;
pub mod security;

pub use cache::ResolutionCacheProvider;
pub use external::ExternalConfigSource;
pub use loading::{ContextRef, ContextSupplier, LoadingContext};
pub use properties::PropertySource;
pub use security::{OperationKind, PrivilegedExecutor, PrivilegedOperation, run_privileged};
