//! Runtime-home configuration strategy
//!
//! Reads `<runtime-home>/lib/wsspi.toml`, a TOML document whose `[services]`
//! table maps service names to implementation identifiers:
//!
//! ```toml
//! [services]
//! "org.jboss.ws.api.tools.ProviderFactory" = "org.jboss.wsf.stack.cxf.tools.CXFProviderFactoryImpl"
//! ```
//!
//! The runtime home is the `wsspi.home` property when set, else the
//! configured directory. The file is read on every lookup.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use figment::Figment;
use figment::providers::{Format, Toml};
use serde::Deserialize;
use tracing::{debug, trace};
use wsspi_domain::constants::{EXTERNAL_CONFIG_RELATIVE_PATH, RUNTIME_HOME_PROPERTY};
use wsspi_domain::{
    ExternalConfigSource, PrivilegedExecutor, PrivilegedOperation, PropertySource, Result,
    ServiceName, run_privileged,
};

use crate::error_ext::ErrorContext;

#[derive(Debug, Default, Deserialize)]
struct ExternalServices {
    #[serde(default)]
    services: HashMap<String, String>,
}

/// [`ExternalConfigSource`] reading the runtime-home services table
#[derive(Debug, Clone)]
pub struct RuntimeHomeConfig {
    properties: Arc<dyn PropertySource>,
    configured_home: Option<PathBuf>,
}

impl RuntimeHomeConfig {
    pub fn new(properties: Arc<dyn PropertySource>, configured_home: Option<PathBuf>) -> Self {
        Self {
            properties,
            configured_home,
        }
    }

    /// Location of the services file, if a runtime home is known
    pub fn config_path(&self, executor: &dyn PrivilegedExecutor) -> Result<Option<PathBuf>> {
        let from_property = run_privileged(
            executor,
            PrivilegedOperation::ReadProperty {
                name: RUNTIME_HOME_PROPERTY,
            },
            || Ok(self.properties.property(RUNTIME_HOME_PROPERTY)),
        )?;

        Ok(from_property
            .map(PathBuf::from)
            .or_else(|| self.configured_home.clone())
            .map(|home| home.join(EXTERNAL_CONFIG_RELATIVE_PATH)))
    }
}

impl ExternalConfigSource for RuntimeHomeConfig {
    fn lookup(
        &self,
        service: &ServiceName,
        executor: &dyn PrivilegedExecutor,
    ) -> Result<Option<String>> {
        let Some(path) = self.config_path(executor)? else {
            trace!("No runtime home, skipping external configuration");
            return Ok(None);
        };

        let services = run_privileged(
            executor,
            PrivilegedOperation::ReadFile { path: &path },
            || read_services(&path),
        )?;
        Ok(services.and_then(|mut services| services.remove(service.as_str())))
    }
}

fn read_services(path: &Path) -> Result<Option<HashMap<String, String>>> {
    if !path.is_file() {
        debug!(path = %path.display(), "External configuration file not present");
        return Ok(None);
    }

    let parsed: ExternalServices = Figment::from(Toml::file(path))
        .extract()
        .config_context(format!("Cannot load properties from {}", path.display()))?;
    Ok(Some(parsed.services))
}
