//! Implementation entries and provider handles

use std::any::Any;
use std::fmt;

/// Boxed error used as the cause of load failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A live provider instance
///
/// Contracts are conventionally exposed as `Arc<dyn Contract>` boxed inside
/// the handle, so consumers downcast to that type.
pub type ProviderHandle = Box<dyn Any + Send + Sync>;

/// Default constructor of an implementation
pub type ProviderConstructor = fn() -> Result<ProviderHandle, BoxError>;

/// A named, default-constructible implementation
///
/// Entries are declared as statics, either in the compile-time registry or
/// attached to a specific loading context.
pub struct ImplementationEntry {
    /// Unique implementation identifier (e.g., "org.example.WidgetImpl")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Default constructor
    pub constructor: ProviderConstructor,
}

impl ImplementationEntry {
    /// Run the default constructor
    pub fn construct(&self) -> Result<ProviderHandle, BoxError> {
        (self.constructor)()
    }
}

impl fmt::Debug for ImplementationEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImplementationEntry")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}
