//! Loading contexts
//!
//! A loading context decides which resources and implementations are
//! visible to a resolution attempt. Contexts are shared as [`ContextRef`];
//! the `Arc` allocation is the context's identity.

use std::fmt;
use std::io::Read;
use std::sync::Arc;

use crate::error::Result;
use crate::value_objects::ImplementationEntry;

/// Shared handle to a loading context
pub type ContextRef = Arc<dyn LoadingContext>;

/// Scope of visible resources and implementations
pub trait LoadingContext: Send + Sync + fmt::Debug {
    /// Name used in diagnostics
    fn name(&self) -> &str;

    /// Open a resource by path; `Ok(None)` when the resource does not exist
    fn open_resource(&self, path: &str) -> Result<Option<Box<dyn Read + Send>>>;

    /// Look up an implementation by identifier; `Ok(None)` when not visible
    fn find_implementation(&self, name: &str) -> Result<Option<&'static ImplementationEntry>>;
}

/// Supplier of the ambient loading context
pub trait ContextSupplier: Send + Sync + fmt::Debug {
    /// The current thread's loading context
    fn current(&self) -> Result<ContextRef>;

    /// Replace the current thread's loading context, returning the previous one
    fn replace(&self, context: Option<ContextRef>) -> Result<Option<ContextRef>>;
}
