//! Implementation Registry
//!
//! Compile-time registration of default-constructible implementations.
//! Implementation crates declare entries with `linkme`; loading contexts
//! that expose the registry resolve identifiers against it.
//!
//! ```ignore
//! use wsspi_application::IMPLEMENTATIONS;
//! use wsspi_domain::ImplementationEntry;
//!
//! #[linkme::distributed_slice(IMPLEMENTATIONS)]
//! static CXF_MAP_BUILDER_FACTORY: ImplementationEntry = ImplementationEntry {
//!     name: "org.jboss.wsf.stack.cxf.addressing.CXFMAPBuilderFactory",
//!     description: "CXF addressing properties builder factory",
//!     constructor: || Ok(Box::new(Arc::new(CxfMapBuilderFactory) as Arc<dyn MapBuilderFactory>)),
//! };
//! ```

use wsspi_domain::ImplementationEntry;

// Auto-collection via linkme distributed slices - implementations submit entries at compile time
#[linkme::distributed_slice]
pub static IMPLEMENTATIONS: [ImplementationEntry] = [..];

/// Find a registered implementation by identifier
///
/// When several entries share an identifier the first one linked wins.
pub fn find_registered(name: &str) -> Option<&'static ImplementationEntry> {
    IMPLEMENTATIONS.iter().find(|entry| entry.name == name)
}

/// List all registered implementations
///
/// Returns (name, description) tuples. Useful for diagnostics when an
/// identifier fails to resolve.
pub fn list_registered() -> Vec<(&'static str, &'static str)> {
    IMPLEMENTATIONS
        .iter()
        .map(|entry| (entry.name, entry.description))
        .collect()
}
