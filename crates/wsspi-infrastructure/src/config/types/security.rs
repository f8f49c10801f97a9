//! Sandbox configuration types

use serde::{Deserialize, Serialize};
use wsspi_domain::OperationKind;

use crate::constants::MATCH_ALL_PATTERN;

/// Sandbox configuration
///
/// With `sandbox = false` the process-wide ambient executor is used and the
/// remaining fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Enforce a sandbox policy for this loader
    pub sandbox: bool,

    /// Operation kinds the sandbox grants
    pub granted: Vec<OperationKind>,

    /// Glob allow-list of readable property names
    pub property_patterns: Vec<String>,

    /// Glob allow-list of readable resource paths
    pub resource_patterns: Vec<String>,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            sandbox: false,
            granted: OperationKind::ALL.to_vec(),
            property_patterns: vec![MATCH_ALL_PATTERN.to_string()],
            resource_patterns: vec![MATCH_ALL_PATTERN.to_string()],
        }
    }
}
