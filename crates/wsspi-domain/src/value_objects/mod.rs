//! Value objects of the provider-resolution mechanism

pub mod implementation;
pub mod resolution;
pub mod service;

pub use implementation::{BoxError, ImplementationEntry, ProviderConstructor, ProviderHandle};
pub use resolution::{CachedLookup, ResolutionStrategy, ResolvedProvider};
pub use service::{ResourcePath, ServiceName};
