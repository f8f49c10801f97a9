//! Resolution services

pub mod instantiator;
pub mod pipeline;
pub mod service_loader;

pub use instantiator::{Instantiator, downcast_provider};
pub use pipeline::{PipelineProfile, ResolutionPipeline};
pub use service_loader::{ContextScope, ServiceLoader};
