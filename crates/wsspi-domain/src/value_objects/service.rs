//! Service names and the resource paths derived from them

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::SERVICES_RESOURCE_PREFIX;
use crate::error::{Error, Result};

/// Logical name of a service contract, conventionally a fully-qualified
/// interface name such as `org.jboss.ws.api.addressing.MAPBuilderFactory`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceName(String);

impl ServiceName {
    /// Create a service name, rejecting blank input
    pub fn new<S: Into<String>>(name: S) -> Result<Self> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(Error::invalid_argument("Service name cannot be empty"));
        }
        if trimmed.contains(['/', '\\']) {
            return Err(Error::invalid_argument(format!(
                "Service name cannot contain path separators: {trimmed}"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path of the services file naming this service's implementation
    pub fn services_path(&self) -> ResourcePath {
        ResourcePath(format!("{SERVICES_RESOURCE_PREFIX}{}", self.0))
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for ServiceName {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

/// Path of a resource visible through a loading context
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourcePath(String);

impl ResourcePath {
    /// Wrap an arbitrary resource path
    pub fn new<S: Into<String>>(path: S) -> Self {
        Self(path.into())
    }

    /// The path as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
