//! Process property store

use std::fmt;

/// Read access to process-wide named properties
pub trait PropertySource: Send + Sync + fmt::Debug {
    /// Value of the named property, if set
    fn property(&self, name: &str) -> Option<String>;
}
