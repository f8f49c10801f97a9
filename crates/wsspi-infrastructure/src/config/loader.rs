//! Configuration loader
//!
//! Handles loading configuration from various sources including
//! TOML files, environment variables, and default values.

use std::env;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use tracing::warn;
use wsspi_application::PipelineProfile;
use wsspi_domain::{Error, OperationKind, Result};

use crate::config::{AppConfig, ContextConfig, LoaderConfig, LoggingConfig, SecurityConfig};
use crate::constants::{
    CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME,
};
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};
use crate::security::SandboxPolicy;

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Configuration sources are merged in this order (later sources override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. TOML configuration file (if exists)
    /// 3. Environment variables with prefix (e.g., `WSSPI__LOADER__PROFILE`)
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if let Some(config_path) = &self.config_path {
            if config_path.exists() {
                figment = figment.merge(Toml::file(config_path));
                log_config_loaded(config_path, true);
            } else {
                log_config_loaded(config_path, false);
            }
        } else if let Some(default_path) = Self::find_default_config_path() {
            figment = figment.merge(Toml::file(&default_path));
            log_config_loaded(&default_path, true);
        }

        // Nested keys are joined with a double underscore: WSSPI__LOADER__RUNTIME_HOME
        figment = figment.merge(
            Env::prefixed(&format!("{}{CONFIG_ENV_SEPARATOR}", self.env_prefix))
                .split(CONFIG_ENV_SEPARATOR),
        );

        let app_config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_app_config(&app_config)?;

        Ok(app_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).config_context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).io_context(format!(
            "Failed to write config file {}",
            path.as_ref().display()
        ))?;

        Ok(())
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Find the first default configuration file that exists
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = [
            Some(current_dir.join(DEFAULT_CONFIG_FILENAME)),
            Some(
                current_dir
                    .join(DEFAULT_CONFIG_DIR)
                    .join(DEFAULT_CONFIG_FILENAME),
            ),
            dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
            dirs::home_dir().map(|d| {
                d.join(format!(".{DEFAULT_CONFIG_DIR}"))
                    .join(DEFAULT_CONFIG_FILENAME)
            }),
        ];

        candidates.into_iter().flatten().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate application configuration
///
/// Run after extraction; the loader never hands out an invalid config.
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    validate_logging_config(&config.logging)?;
    validate_security_config(&config.security, &config.loader)?;
    validate_context_config(&config.context)?;
    validate_properties(config)?;
    Ok(())
}

fn validate_logging_config(config: &LoggingConfig) -> Result<()> {
    parse_log_level(&config.level).map(|_| ())
}

fn validate_security_config(config: &SecurityConfig, loader: &LoaderConfig) -> Result<()> {
    SandboxPolicy::from_config(config)?;
    if !config.sandbox {
        return Ok(());
    }
    if config.granted.is_empty() {
        return Err(Error::configuration(
            "Sandbox is enabled but grants no operations",
        ));
    }
    let grants = |kind: OperationKind| config.granted.contains(&kind);
    if grants(OperationKind::ReadProperty) && config.property_patterns.is_empty() {
        return Err(Error::configuration(
            "Sandbox grants read_property but property_patterns is empty",
        ));
    }
    if grants(OperationKind::ReadResource) && config.resource_patterns.is_empty() {
        return Err(Error::configuration(
            "Sandbox grants read_resource but resource_patterns is empty",
        ));
    }
    if !grants(OperationKind::GetContextLoader) {
        warn!(
            "Sandbox does not grant get_context_loader, lookups without an explicit context will be refused"
        );
    }
    if loader.profile == PipelineProfile::Spi && !grants(OperationKind::ReadFile) {
        warn!(
            "Sandbox does not grant read_file, the runtime-home configuration strategy will be refused"
        );
    }
    Ok(())
}

fn validate_context_config(config: &ContextConfig) -> Result<()> {
    if config.name.trim().is_empty() {
        return Err(Error::configuration("Context name cannot be empty"));
    }
    if let Some(root) = config.resource_roots.iter().find(|root| !root.is_dir()) {
        return Err(Error::configuration(format!(
            "Resource root is not a directory: {}",
            root.display()
        )));
    }
    Ok(())
}

fn validate_properties(config: &AppConfig) -> Result<()> {
    if config.properties.keys().any(|name| name.trim().is_empty()) {
        return Err(Error::configuration("Property names cannot be empty"));
    }
    Ok(())
}

/// Configuration builder for programmatic configuration
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: AppConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set logging configuration
    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.config.logging = logging;
        self
    }

    /// Set pipeline configuration
    pub fn with_loader(mut self, loader: LoaderConfig) -> Self {
        self.config.loader = loader;
        self
    }

    /// Set sandbox configuration
    pub fn with_security(mut self, security: SecurityConfig) -> Self {
        self.config.security = security;
        self
    }

    /// Set system context configuration
    pub fn with_context(mut self, context: ContextConfig) -> Self {
        self.config.context = context;
        self
    }

    /// Add an initial process property
    pub fn with_property<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.config.properties.insert(name.into(), value.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> AppConfig {
        self.config
    }
}
