//! # Web-Service SPI
//!
//! Stack-independent facades that obtain their stack-specific implementation
//! at runtime through pluggable provider resolution.
//!
//! ## Example
//!
//! ```ignore
//! use wsspi::addressing;
//!
//! if let Some(factory) = addressing::map_builder_factory(None)? {
//!     let mut map = factory.builder_instance().new_map();
//!     map.action = Some("urn:echo".to_string());
//! }
//! ```
//!
//! Implementations register themselves at compile time:
//!
//! ```ignore
//! #[linkme::distributed_slice(wsspi::IMPLEMENTATIONS)]
//! static CXF_MAP_BUILDER_FACTORY: wsspi::ImplementationEntry = wsspi::ImplementationEntry {
//!     name: "org.jboss.wsf.stack.cxf.addressing.CXFMAPBuilderFactory",
//!     description: "CXF addressing properties builder factory",
//!     constructor: || Ok(Box::new(Arc::new(CxfMapBuilderFactory) as Arc<dyn MapBuilderFactory>)),
//! };
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Error taxonomy, resolution value objects and port traits
//! - `application` - Resolution pipeline, instantiator and registry
//! - `infrastructure` - Cache, executors, loading contexts, config and logging
//! - [`addressing`], [`configuration`], [`tools`] - facades built on the loader

pub mod addressing;
pub mod configuration;
pub mod global;
pub mod tools;

/// Domain layer - resolution types and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use wsspi_domain::*;
}

/// Application layer - pipeline, instantiator and registry
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use wsspi_application::*;
}

/// Infrastructure layer - adapters, configuration and bootstrap
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use wsspi_infrastructure::*;
}

// Re-export commonly used types at the crate root
pub use domain::*;

pub use application::{IMPLEMENTATIONS, PipelineProfile, ServiceLoader};
pub use global::{install_service_loader, reset_service_loader, service_loader};
