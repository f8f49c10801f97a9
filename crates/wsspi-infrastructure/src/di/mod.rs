//! Composition root

pub mod bootstrap;

pub use bootstrap::{ServiceRuntime, build_runtime, build_service_loader, load_runtime};
