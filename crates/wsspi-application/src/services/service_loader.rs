//! Service Loader
//!
//! The entry point used by facades to obtain a stack-specific provider
//! without a compile-time dependency on it.
//!
//! ```text
//! START → strategies 1..N → RESOLVED(name) → INSTANTIATE → READY | ERROR
//!                         ↘ UNRESOLVED
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let factory: Arc<dyn MapBuilderFactory> =
//!     loader.require(MAP_BUILDER_FACTORY_SERVICE, None, None)?;
//! ```

use std::any::Any;
use std::sync::Arc;

use tracing::warn;
use wsspi_domain::{
    ContextRef, ContextSupplier, Error, ProviderHandle, ResolvedProvider, Result, ServiceName,
};

use super::instantiator::{Instantiator, downcast_provider};
use super::pipeline::ResolutionPipeline;

/// Resolve-then-build orchestration over a pipeline and an instantiator
#[derive(Debug, Clone)]
pub struct ServiceLoader {
    pipeline: ResolutionPipeline,
    instantiator: Instantiator,
    contexts: Arc<dyn ContextSupplier>,
}

impl ServiceLoader {
    pub fn new(
        pipeline: ResolutionPipeline,
        instantiator: Instantiator,
        contexts: Arc<dyn ContextSupplier>,
    ) -> Self {
        Self {
            pipeline,
            instantiator,
            contexts,
        }
    }

    pub fn pipeline(&self) -> &ResolutionPipeline {
        &self.pipeline
    }

    /// Supplier of the ambient loading context
    pub fn contexts(&self) -> &Arc<dyn ContextSupplier> {
        &self.contexts
    }

    /// Resolve an implementation identifier without instantiating it
    ///
    /// Without an explicit context the current thread's context is used.
    pub fn resolve(
        &self,
        service: &str,
        default: Option<&str>,
        context: Option<ContextRef>,
    ) -> Result<ResolvedProvider> {
        let service = ServiceName::new(service)?;
        let context = self.context_or_current(context)?;
        self.pipeline.resolve(&service, default, &context)
    }

    /// Resolve `service` and default-construct the winning implementation
    ///
    /// `Ok(None)` means no strategy produced an identifier; a resolved
    /// identifier that cannot be built is always an error.
    pub fn resolve_and_instantiate(
        &self,
        service: &str,
        default: Option<&str>,
        context: Option<ContextRef>,
    ) -> Result<Option<ProviderHandle>> {
        Ok(self
            .build(service, default, context)?
            .map(|(_, _, handle)| handle))
    }

    /// Like [`resolve_and_instantiate`](Self::resolve_and_instantiate), downcast to `T`
    pub fn load<T: Any>(
        &self,
        service: &str,
        default: Option<&str>,
        context: Option<ContextRef>,
    ) -> Result<Option<T>> {
        match self.build(service, default, context)? {
            Some((service, implementation, handle)) => {
                downcast_provider(&service, &implementation, handle).map(Some)
            }
            None => Ok(None),
        }
    }

    /// Like [`load`](Self::load), failing when nothing resolves
    pub fn require<T: Any>(
        &self,
        service: &str,
        default: Option<&str>,
        context: Option<ContextRef>,
    ) -> Result<T> {
        self.load(service, default, context)?.ok_or_else(|| {
            Error::provider_unresolved(service.trim(), self.pipeline.strategies().to_vec())
        })
    }

    /// Run `f` with `context` installed as the current thread's context
    ///
    /// The previous context is restored when `f` returns or unwinds.
    pub fn with_current_context<T, F>(&self, context: ContextRef, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let _scope = ContextScope::enter(Arc::clone(&self.contexts), context)?;
        f()
    }

    fn build(
        &self,
        service: &str,
        default: Option<&str>,
        context: Option<ContextRef>,
    ) -> Result<Option<(ServiceName, String, ProviderHandle)>> {
        let service = ServiceName::new(service)?;
        let context = self.context_or_current(context)?;

        match self.pipeline.resolve(&service, default, &context)? {
            ResolvedProvider::Resolved { implementation, .. } => {
                let handle = self
                    .instantiator
                    .instantiate(&service, &implementation, &context)?;
                Ok(Some((service, implementation, handle)))
            }
            ResolvedProvider::Unresolved => Ok(None),
        }
    }

    fn context_or_current(&self, context: Option<ContextRef>) -> Result<ContextRef> {
        match context {
            Some(context) => Ok(context),
            None => self.contexts.current(),
        }
    }
}

/// Guard that restores the previous thread-current context on drop
#[derive(Debug)]
pub struct ContextScope {
    contexts: Arc<dyn ContextSupplier>,
    previous: Option<Option<ContextRef>>,
}

impl ContextScope {
    /// Install `context` as the current thread's context
    pub fn enter(contexts: Arc<dyn ContextSupplier>, context: ContextRef) -> Result<Self> {
        let previous = contexts.replace(Some(context))?;
        Ok(Self {
            contexts,
            previous: Some(previous),
        })
    }
}

impl Drop for ContextScope {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            if let Err(e) = self.contexts.replace(previous) {
                warn!(error = %e, "Failed to restore previous loading context");
            }
        }
    }
}
