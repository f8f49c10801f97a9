//! Error handling types

use thiserror::Error;

use crate::value_objects::{BoxError, ResolutionStrategy};

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for provider resolution
///
/// An unresolved service is not an error by itself; the pipeline reports it
/// as [`ResolvedProvider::Unresolved`](crate::ResolvedProvider). Only callers
/// that require a provider turn it into [`Error::ProviderUnresolved`].
#[derive(Error, Debug)]
pub enum Error {
    /// The execution sandbox refused a resource, implementation or property access
    #[error("Permission denied: {operation}")]
    PermissionDenied {
        /// Description of the refused operation
        operation: String,
    },

    /// A services file could not be read as UTF-8 text
    #[error("Malformed resource {path}: {source}")]
    MalformedResource {
        /// Resource path inside the loading context
        path: String,
        /// The read failure
        #[source]
        source: std::io::Error,
    },

    /// A resolved implementation could not be loaded or constructed
    #[error("Failed to load {implementation} for service {service}: {source}")]
    ProviderLoad {
        /// Service being resolved
        service: String,
        /// Implementation identifier that failed
        implementation: String,
        /// Original cause
        #[source]
        source: BoxError,
    },

    /// A required provider could not be resolved by any strategy
    #[error(
        "No provider resolved for service {service} (attempted: {})",
        ResolutionStrategy::join(.attempted)
    )]
    ProviderUnresolved {
        /// Service being resolved
        service: String,
        /// Strategies that were consulted, in order
        attempted: Vec<ResolutionStrategy>,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Resolution error creation methods
impl Error {
    /// Create a permission denied error
    pub fn permission_denied<S: Into<String>>(operation: S) -> Self {
        Self::PermissionDenied {
            operation: operation.into(),
        }
    }

    /// Create a malformed resource error
    pub fn malformed_resource<S: Into<String>>(path: S, source: std::io::Error) -> Self {
        Self::MalformedResource {
            path: path.into(),
            source,
        }
    }

    /// Create a provider load error
    pub fn provider_load<S, I, E>(service: S, implementation: I, source: E) -> Self
    where
        S: Into<String>,
        I: Into<String>,
        E: Into<BoxError>,
    {
        Self::ProviderLoad {
            service: service.into(),
            implementation: implementation.into(),
            source: source.into(),
        }
    }

    /// Create an unresolved provider error
    pub fn provider_unresolved<S: Into<String>>(
        service: S,
        attempted: Vec<ResolutionStrategy>,
    ) -> Self {
        Self::ProviderUnresolved {
            service: service.into(),
            attempted,
        }
    }

    /// Implementation identifier carried by a provider load error
    pub fn failed_implementation(&self) -> Option<&str> {
        match self {
            Self::ProviderLoad { implementation, .. } => Some(implementation),
            _ => None,
        }
    }
}

// Basic error creation methods
impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<S: Into<String>, E: Into<BoxError>>(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
