//! Service Loader Bootstrap
//!
//! Wires the adapters of this crate into a ready-to-use `ServiceLoader`.
//!
//! ```text
//! AppConfig ─┬─ security ──→ SandboxedExecutor | AmbientExecutor
//!            ├─ properties → SystemProperties ──┐
//!            ├─ loader ────→ RuntimeHomeConfig ─┼─→ ResolutionPipeline ─┐
//!            │               ResolutionKeyCache ┘                       ├─→ ServiceLoader
//!            └─ context ───→ ClasspathContext → ThreadContextSupplier ──┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let runtime = load_runtime()?;
//! let factory: Arc<dyn MapBuilderFactory> =
//!     runtime.loader.require(MAP_BUILDER_FACTORY_SERVICE, None, None)?;
//! ```

use std::sync::Arc;

use tracing::info;
use wsspi_application::{Instantiator, ResolutionPipeline, ServiceLoader};
use wsspi_domain::{ContextRef, PrivilegedExecutor, Result, ResolutionStrategy};

use crate::cache::ResolutionKeyCache;
use crate::config::{AppConfig, ConfigLoader, ContextConfig};
use crate::context::{ClasspathContext, ThreadContextSupplier};
use crate::external::RuntimeHomeConfig;
use crate::properties::SystemProperties;
use crate::security::{AmbientExecutor, SandboxPolicy, SandboxedExecutor};

/// A loader together with the shared state behind it
#[derive(Debug, Clone)]
pub struct ServiceRuntime {
    /// Configuration the runtime was built from
    pub config: Arc<AppConfig>,
    /// Resolve-then-build entry point
    pub loader: ServiceLoader,
    /// Services file lookup cache
    pub cache: Arc<ResolutionKeyCache>,
    /// Process properties read by the system-property strategy
    pub properties: Arc<SystemProperties>,
    /// Context used on threads without a current context
    pub system: ContextRef,
    /// Executor used for every privileged operation
    pub executor: Arc<dyn PrivilegedExecutor>,
}

/// Build a runtime from configuration
pub fn build_runtime(config: &AppConfig) -> Result<ServiceRuntime> {
    let executor: Arc<dyn PrivilegedExecutor> = if config.security.sandbox {
        Arc::new(SandboxedExecutor::new(SandboxPolicy::from_config(
            &config.security,
        )?))
    } else {
        Arc::new(AmbientExecutor)
    };

    let cache = Arc::new(ResolutionKeyCache::new());
    let properties = Arc::new(SystemProperties::from_pairs(config.properties.clone()));
    let system = system_context(&config.context);

    let external = Arc::new(RuntimeHomeConfig::new(
        properties.clone(),
        config.loader.runtime_home.clone(),
    ));
    let pipeline = ResolutionPipeline::new(cache.clone(), executor.clone(), properties.clone())
        .with_external_config(external)
        .with_profile(config.loader.profile);

    info!(
        strategies = %ResolutionStrategy::join(pipeline.strategies()),
        sandboxed = config.security.sandbox,
        system_context = system.name(),
        "Service loader initialized"
    );

    let contexts = Arc::new(ThreadContextSupplier::new(executor.clone(), system.clone()));
    let loader = ServiceLoader::new(pipeline, Instantiator::new(executor.clone()), contexts);

    Ok(ServiceRuntime {
        config: Arc::new(config.clone()),
        loader,
        cache,
        properties,
        system,
        executor,
    })
}

/// Build only the loader
pub fn build_service_loader(config: &AppConfig) -> Result<ServiceLoader> {
    build_runtime(config).map(|runtime| runtime.loader)
}

/// Load configuration from the default sources and build a runtime
pub fn load_runtime() -> Result<ServiceRuntime> {
    build_runtime(&ConfigLoader::new().load()?)
}

fn system_context(config: &ContextConfig) -> ContextRef {
    ClasspathContext::new(config.name.clone())
        .with_roots(&config.resource_roots)
        .with_registry(config.include_registry)
        .into_ref()
}
