//! System loading context configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::SYSTEM_CONTEXT_NAME;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Context name used in logs and sandbox messages
    pub name: String,

    /// Directories searched for `META-INF/services` files
    pub resource_roots: Vec<PathBuf>,

    /// Expose implementations registered at compile time
    pub include_registry: bool,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            name: SYSTEM_CONTEXT_NAME.to_string(),
            resource_roots: Vec::new(),
            include_registry: true,
        }
    }
}
