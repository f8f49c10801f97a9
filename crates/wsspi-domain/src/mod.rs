//! # Domain Layer
//!
//! Core types of the provider-resolution mechanism: what is being resolved
//! ([`value_objects`]), how failures are reported ([`error`]) and which
//! collaborators the resolver talks to ([`ports`]).
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`constants`] | Well-known resource paths and property names |
//! | [`error`] | Error taxonomy shared by every layer |
//! | [`ports`] | Loading contexts, privileged execution, property and cache ports |
//! | [`value_objects`] | Service names, resolution outcomes, implementation entries |

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::{
    ContextRef, ContextSupplier, ExternalConfigSource, LoadingContext, OperationKind,
    PrivilegedExecutor, PrivilegedOperation, PropertySource, ResolutionCacheProvider,
    run_privileged,
};
pub use value_objects::{
    BoxError, CachedLookup, ImplementationEntry, ProviderHandle, ResolutionStrategy,
    ResolvedProvider, ResourcePath, ServiceName,
};
