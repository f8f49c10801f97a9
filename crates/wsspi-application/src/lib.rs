//! # Application Layer
//!
//! Resolution of service names to live provider instances.
//!
//! ```text
//! resolve_and_instantiate(service, default, context)
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────┐
//! │   ResolutionPipeline                 │  services file → external config
//! │                                      │  → system property → default
//! └─────────────────────────────────────┘
//!                    │  ResolvedProvider
//!                    ▼
//! ┌─────────────────────────────────────┐
//! │   Instantiator                       │  ← IMPLEMENTATIONS registry / context
//! └─────────────────────────────────────┘
//!                    │
//!                    ▼
//!             ProviderHandle
//! ```
//!
//! Everything here talks to the outside world through the ports declared in
//! `wsspi-domain`; concrete adapters live in `wsspi-infrastructure`.

pub mod ports;
pub mod services;

pub use ports::registry::{IMPLEMENTATIONS, find_registered, list_registered};
pub use services::{
    ContextScope, Instantiator, PipelineProfile, ResolutionPipeline, ServiceLoader,
    downcast_provider,
};
