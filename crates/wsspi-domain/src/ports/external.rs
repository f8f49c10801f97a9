//! External configuration lookup

use std::fmt;

use crate::error::Result;
use crate::ports::security::PrivilegedExecutor;
use crate::value_objects::ServiceName;

/// Configuration source living outside any loading context
pub trait ExternalConfigSource: Send + Sync + fmt::Debug {
    /// Implementation configured for `service`, if any
    fn lookup(
        &self,
        service: &ServiceName,
        executor: &dyn PrivilegedExecutor,
    ) -> Result<Option<String>>;
}
