//! Client configuration
//!
//! Applies a named client configuration (handler chain, properties) to a
//! client binding. The configurer is resolved under
//! [`CLIENT_CONFIGURER_SERVICE`] and falls back to the common
//! implementation [`DEFAULT_CLIENT_CONFIGURER`].

use std::sync::Arc;

use wsspi_application::ServiceLoader;
use wsspi_domain::{ContextRef, Result};

use crate::global::service_loader;

/// Service name of the client configurer
pub const CLIENT_CONFIGURER_SERVICE: &str = "org.jboss.ws.api.configuration.ClientConfigurer";

/// Implementation used when nothing else is configured
pub const DEFAULT_CLIENT_CONFIGURER: &str = "org.jboss.ws.common.configuration.ConfigHelper";

/// Client proxy or dispatch being configured
pub trait ClientBinding {
    fn set_handler_chain(&mut self, handlers: Vec<String>);

    fn set_property(&mut self, name: &str, value: String);
}

/// Reads client configurations and applies them to bindings
pub trait ClientConfigurer: Send + Sync {
    /// Install the handlers of configuration `config_name` from `config_file`
    fn set_config_handlers(
        &self,
        binding: &mut dyn ClientBinding,
        config_file: &str,
        config_name: &str,
    ) -> Result<()>;

    /// Install the properties of configuration `config_name` from `config_file`
    fn set_config_properties(
        &self,
        binding: &mut dyn ClientBinding,
        config_file: &str,
        config_name: &str,
    ) -> Result<()>;
}

/// Resolve the configurer through the process-wide loader
pub fn resolve_client_configurer(
    context: Option<ContextRef>,
) -> Result<Arc<dyn ClientConfigurer>> {
    resolve_client_configurer_with(&*service_loader()?, context)
}

/// Resolve the configurer through `loader`
pub fn resolve_client_configurer_with(
    loader: &ServiceLoader,
    context: Option<ContextRef>,
) -> Result<Arc<dyn ClientConfigurer>> {
    loader.require(
        CLIENT_CONFIGURER_SERVICE,
        Some(DEFAULT_CLIENT_CONFIGURER),
        context,
    )
}

/// Apply the handlers of a named configuration
pub fn set_config_handlers(
    binding: &mut dyn ClientBinding,
    config_file: &str,
    config_name: &str,
) -> Result<()> {
    resolve_client_configurer(None)?.set_config_handlers(binding, config_file, config_name)
}

/// Apply the properties of a named configuration
pub fn set_config_properties(
    binding: &mut dyn ClientBinding,
    config_file: &str,
    config_name: &str,
) -> Result<()> {
    resolve_client_configurer(None)?.set_config_properties(binding, config_file, config_name)
}
