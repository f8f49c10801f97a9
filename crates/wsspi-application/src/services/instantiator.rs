//! Provider instantiation
//!
//! Loads a resolved implementation through its loading context and runs its
//! default constructor. Every failure on the way (not visible, constructor
//! error, constructor panic, wrong contract) becomes a single
//! [`Error::ProviderLoad`] carrying the service, the implementation
//! identifier and the original cause. Sandbox refusals keep their own
//! [`Error::PermissionDenied`] kind.

use std::any::{Any, type_name};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error};
use wsspi_domain::{
    ContextRef, Error, PrivilegedExecutor, PrivilegedOperation, ProviderHandle, Result,
    ServiceName, run_privileged,
};

/// Causes attached to [`Error::ProviderLoad`]
#[derive(Error, Debug)]
pub enum LoadFailure {
    /// The context has no implementation with that identifier
    #[error("implementation {implementation} is not visible from loading context {context}")]
    NotFound {
        /// Implementation identifier
        implementation: String,
        /// Context name
        context: String,
    },

    /// The default constructor panicked
    #[error("constructor panicked: {0}")]
    ConstructorPanicked(String),

    /// The constructed provider is not of the requested type
    #[error("provider does not implement the requested contract {0}")]
    ContractMismatch(&'static str),
}

/// Builds live providers from implementation identifiers
#[derive(Debug, Clone)]
pub struct Instantiator {
    executor: Arc<dyn PrivilegedExecutor>,
}

impl Instantiator {
    pub fn new(executor: Arc<dyn PrivilegedExecutor>) -> Self {
        Self { executor }
    }

    /// Load `implementation` from `context` and default-construct it
    pub fn instantiate(
        &self,
        service: &ServiceName,
        implementation: &str,
        context: &ContextRef,
    ) -> Result<ProviderHandle> {
        let entry = run_privileged(
            self.executor.as_ref(),
            PrivilegedOperation::LoadImplementation {
                context: context.name(),
                name: implementation,
            },
            || context.find_implementation(implementation),
        )
        .map_err(|e| match e {
            Error::PermissionDenied { .. } => e,
            other => Error::provider_load(service.as_str(), implementation, other),
        })?;

        let Some(entry) = entry else {
            error!(
                service = %service,
                implementation,
                context = context.name(),
                "Implementation not visible from loading context"
            );
            return Err(Error::provider_load(
                service.as_str(),
                implementation,
                LoadFailure::NotFound {
                    implementation: implementation.to_string(),
                    context: context.name().to_string(),
                },
            ));
        };

        match panic::catch_unwind(AssertUnwindSafe(|| entry.construct())) {
            Ok(Ok(handle)) => {
                debug!(service = %service, implementation, "Provider instantiated");
                Ok(handle)
            }
            Ok(Err(cause)) => Err(Error::provider_load(service.as_str(), implementation, cause)),
            Err(payload) => Err(Error::provider_load(
                service.as_str(),
                implementation,
                LoadFailure::ConstructorPanicked(panic_message(payload.as_ref())),
            )),
        }
    }
}

/// Downcast a provider handle to the contract type `T`
///
/// Contracts are usually requested as `Arc<dyn Contract>`.
pub fn downcast_provider<T: Any>(
    service: &ServiceName,
    implementation: &str,
    handle: ProviderHandle,
) -> Result<T> {
    handle.downcast::<T>().map(|provider| *provider).map_err(|_| {
        Error::provider_load(
            service.as_str(),
            implementation,
            LoadFailure::ContractMismatch(type_name::<T>()),
        )
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_string())
}
