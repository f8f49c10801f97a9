//! Domain constants
//!
//! Resource locations and property names that are part of the provider
//! resolution contract, independent of any particular adapter.

/// Resource directory holding one services file per service name
pub const SERVICES_RESOURCE_PREFIX: &str = "META-INF/services/";

/// Process property naming the runtime home directory
pub const RUNTIME_HOME_PROPERTY: &str = "wsspi.home";

/// Location of the external services configuration, relative to the runtime home
pub const EXTERNAL_CONFIG_RELATIVE_PATH: &str = "lib/wsspi.toml";

/// Table of the external configuration mapping service names to implementations
pub const EXTERNAL_CONFIG_SERVICES_TABLE: &str = "services";
