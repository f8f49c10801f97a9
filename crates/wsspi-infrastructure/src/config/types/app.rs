//! Main application configuration

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{ContextConfig, LoaderConfig, LoggingConfig, SecurityConfig};

/// Root configuration
///
/// ```toml
/// [loader]
/// profile = "spi"
/// runtime_home = "/opt/jbossws"
///
/// [security]
/// sandbox = true
/// granted = [
///     "read_resource",
///     "load_implementation",
///     "get_context_loader",
///     "set_context_loader",
///     "read_property",
///     "read_file",
/// ]
/// property_patterns = ["org.jboss.ws.*", "wsspi.home"]
/// resource_patterns = ["META-INF/services/**"]
///
/// [properties]
/// "org.jboss.ws.api.tools.ConsumerFactory" = "org.example.ConsumerFactory"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Resolution pipeline configuration
    #[serde(default)]
    pub loader: LoaderConfig,
    /// Sandbox configuration
    #[serde(default)]
    pub security: SecurityConfig,
    /// System loading context configuration
    #[serde(default)]
    pub context: ContextConfig,
    /// Initial process properties
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}
