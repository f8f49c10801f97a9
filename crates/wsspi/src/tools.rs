//! Contract tooling
//!
//! Entry points for generating artifacts from endpoint implementations
//! (provider side) and from service descriptions (consumer side). Both
//! factories are looked up under a property-style service name and fall
//! back to the default stack's tooling.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use wsspi_application::ServiceLoader;
use wsspi_domain::{ContextRef, Result};

use crate::global::service_loader;

/// Service name of the provider-side tooling factory
pub const PROVIDER_FACTORY_PROPERTY: &str = "org.jboss.ws.api.tools.ProviderFactory";

/// Provider-side factory used when nothing else is configured
pub const DEFAULT_PROVIDER_FACTORY: &str = "org.jboss.wsf.stack.cxf.tools.CXFProviderFactoryImpl";

/// Service name of the consumer-side tooling factory
pub const CONSUMER_FACTORY_PROPERTY: &str = "org.jboss.ws.api.tools.ConsumerFactory";

/// Consumer-side factory used when nothing else is configured
pub const DEFAULT_CONSUMER_FACTORY: &str = "org.jboss.wsf.stack.cxf.tools.CXFConsumerFactoryImpl";

/// Settings for generating artifacts from an endpoint implementation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderOptions {
    pub generate_wsdl: bool,
    pub extension: bool,
    pub generate_source: bool,
    pub output_directory: Option<PathBuf>,
    pub resource_directory: Option<PathBuf>,
    pub source_directory: Option<PathBuf>,
    pub port_soap_address: Option<String>,
}

/// Settings for generating artifacts from a service description
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumerOptions {
    pub binding_files: Vec<PathBuf>,
    pub catalog: Option<PathBuf>,
    pub output_directory: Option<PathBuf>,
    pub source_directory: Option<PathBuf>,
    pub extension: bool,
    pub generate_source: bool,
    pub no_compile: bool,
    pub target_package: Option<String>,
    pub wsdl_location: Option<String>,
    pub encoding: Option<String>,
    pub additional_headers: bool,
    pub target: Option<String>,
    pub client_jar: Option<PathBuf>,
}

/// Generates artifacts for an endpoint implementation
pub trait WsContractProvider: Send {
    fn options_mut(&mut self) -> &mut ProviderOptions;

    /// Process the endpoint implementation named `endpoint`
    fn provide(&mut self, endpoint: &str) -> Result<()>;
}

/// Generates client artifacts from a service description
pub trait WsContractConsumer: Send {
    fn options_mut(&mut self) -> &mut ConsumerOptions;

    /// Process the service description at `wsdl`
    fn consume(&mut self, wsdl: &str) -> Result<()>;
}

/// Stack-supplied provider tooling
pub trait WsContractProviderFactory: Send + Sync {
    /// `context` is where endpoint types are discovered
    fn create_provider(&self, context: ContextRef) -> Box<dyn WsContractProvider>;
}

/// Stack-supplied consumer tooling
pub trait WsContractConsumerFactory: Send + Sync {
    fn create_consumer(&self) -> Box<dyn WsContractConsumer>;
}

/// Provider tooling discovering types through `context`, via the process-wide loader
pub fn new_provider(context: Option<ContextRef>) -> Result<Box<dyn WsContractProvider>> {
    new_provider_with(&*service_loader()?, context)
}

/// Provider tooling discovering types through `context`, via `loader`
///
/// The factory is looked up with `context` installed as the thread-current
/// context; the previous one is restored afterwards.
pub fn new_provider_with(
    loader: &ServiceLoader,
    context: Option<ContextRef>,
) -> Result<Box<dyn WsContractProvider>> {
    let context = target_context(loader, context)?;
    let factory: Arc<dyn WsContractProviderFactory> =
        loader.with_current_context(Arc::clone(&context), || {
            loader.require(PROVIDER_FACTORY_PROPERTY, Some(DEFAULT_PROVIDER_FACTORY), None)
        })?;
    Ok(factory.create_provider(context))
}

/// Consumer tooling, via the process-wide loader
pub fn new_consumer(context: Option<ContextRef>) -> Result<Box<dyn WsContractConsumer>> {
    new_consumer_with(&*service_loader()?, context)
}

/// Consumer tooling, looked up with `context` as the thread-current context
pub fn new_consumer_with(
    loader: &ServiceLoader,
    context: Option<ContextRef>,
) -> Result<Box<dyn WsContractConsumer>> {
    let context = target_context(loader, context)?;
    let factory: Arc<dyn WsContractConsumerFactory> =
        loader.with_current_context(context, || {
            loader.require(CONSUMER_FACTORY_PROPERTY, Some(DEFAULT_CONSUMER_FACTORY), None)
        })?;
    Ok(factory.create_consumer())
}

fn target_context(loader: &ServiceLoader, context: Option<ContextRef>) -> Result<ContextRef> {
    match context {
        Some(context) => Ok(context),
        None => loader.contexts().current(),
    }
}
