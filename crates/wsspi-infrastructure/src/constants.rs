//! Infrastructure layer constants
//!
//! Resolution constants (resource prefixes, property names) live in
//! `wsspi_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "wsspi.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "wsspi";

/// Environment variable prefix for configuration
///
/// Nested keys are separated by a double underscore, e.g.
/// `WSSPI__LOADER__PROFILE=api`.
pub const CONFIG_ENV_PREFIX: &str = "WSSPI";

/// Separator between the prefix and nested key segments
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "WSSPI_LOG";

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// File stem used when the configured log file has none
pub const DEFAULT_LOG_FILE_STEM: &str = "wsspi";

// ============================================================================
// CONTEXT CONSTANTS
// ============================================================================

/// Name of the process-wide system loading context
pub const SYSTEM_CONTEXT_NAME: &str = "system";

/// Glob matching every property name or resource path
pub const MATCH_ALL_PATTERN: &str = "*";
