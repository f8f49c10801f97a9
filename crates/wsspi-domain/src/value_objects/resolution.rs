//! Resolution strategies and outcomes

use std::fmt;

use serde::{Deserialize, Serialize};

/// A source consulted when resolving a service name to an implementation
///
/// Declaration order is precedence order: the most deployment-specific
/// source comes first, the compiled-in default last.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStrategy {
    /// First line of `META-INF/services/<service>` in the loading context
    ServicesFile,
    /// `[services]` table of the runtime-home configuration file
    ExternalConfig,
    /// Process property named after the service
    SystemProperty,
    /// Default implementation supplied by the caller
    Default,
}

impl ResolutionStrategy {
    /// Every strategy, in precedence order
    pub const ORDER: [Self; 4] = [
        Self::ServicesFile,
        Self::ExternalConfig,
        Self::SystemProperty,
        Self::Default,
    ];

    /// Stable identifier used in configuration and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ServicesFile => "services_file",
            Self::ExternalConfig => "external_config",
            Self::SystemProperty => "system_property",
            Self::Default => "default",
        }
    }

    /// Comma-separated list of strategy names
    pub fn join(strategies: &[Self]) -> String {
        strategies
            .iter()
            .map(Self::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ResolutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a resolution pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedProvider {
    /// An implementation identifier and the strategy that produced it
    Resolved {
        /// Implementation identifier
        implementation: String,
        /// Strategy that yielded the identifier
        strategy: ResolutionStrategy,
    },
    /// No strategy produced an identifier
    Unresolved,
}

impl ResolvedProvider {
    /// Implementation identifier, if resolved
    pub fn implementation(&self) -> Option<&str> {
        match self {
            Self::Resolved { implementation, .. } => Some(implementation),
            Self::Unresolved => None,
        }
    }

    /// Strategy that produced the identifier, if resolved
    pub fn strategy(&self) -> Option<ResolutionStrategy> {
        match self {
            Self::Resolved { strategy, .. } => Some(*strategy),
            Self::Unresolved => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }
}

/// Cached result of probing a services file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachedLookup {
    /// The file named this implementation
    Found(String),
    /// The file is absent, or its first line is blank
    Absent,
}

impl CachedLookup {
    /// Convert into the implementation identifier, if any
    pub fn into_option(self) -> Option<String> {
        match self {
            Self::Found(name) => Some(name),
            Self::Absent => None,
        }
    }
}

impl From<Option<String>> for CachedLookup {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Absent, Self::Found)
    }
}
