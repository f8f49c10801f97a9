//! Configuration Loader Tests

use std::env;

use tempfile::TempDir;
use wsspi_application::PipelineProfile;
use wsspi_domain::{Error, OperationKind};
use wsspi_infrastructure::config::{
    ConfigBuilder, ConfigLoader, ContextConfig, LoaderConfig, SecurityConfig,
};
use wsspi_infrastructure::constants::{DEFAULT_LOG_LEVEL, SYSTEM_CONTEXT_NAME};
use wsspi_infrastructure::build_service_loader;

use crate::test_utils::{WIDGET_SERVICE, Widget};

fn load_toml(content: &str) -> wsspi_domain::Result<wsspi_infrastructure::config::AppConfig> {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("wsspi.toml");
    std::fs::write(&config_path, content).unwrap();
    ConfigLoader::new().with_config_path(&config_path).load()
}

#[test]
fn test_config_loader_default() {
    let temp_dir = TempDir::new().unwrap();
    let config = ConfigLoader::new()
        .with_config_path(temp_dir.path().join("missing.toml"))
        .load()
        .unwrap();

    assert_eq!(config.logging.level, DEFAULT_LOG_LEVEL);
    assert_eq!(config.loader.profile, PipelineProfile::Spi);
    assert!(config.loader.runtime_home.is_none());
    assert!(!config.security.sandbox);
    assert_eq!(config.security.granted, OperationKind::ALL.to_vec());
    assert_eq!(config.context.name, SYSTEM_CONTEXT_NAME);
    assert!(config.context.include_registry);
    assert!(config.properties.is_empty());
}

#[test]
fn test_config_file_overrides_defaults() {
    let config = load_toml(
        r#"
[logging]
level = "debug"

[loader]
profile = "api"
runtime_home = "/opt/jbossws"

[security]
sandbox = true
granted = ["read_resource", "load_implementation"]

[context]
name = "server"
include_registry = false

[properties]
"com.example.Widget" = "com.example.WidgetImplB"
"#,
    )
    .unwrap();

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.loader.profile, PipelineProfile::Api);
    assert_eq!(
        config.loader.runtime_home.as_deref(),
        Some(std::path::Path::new("/opt/jbossws"))
    );
    assert!(config.security.sandbox);
    assert_eq!(
        config.security.granted,
        vec![OperationKind::ReadResource, OperationKind::LoadImplementation]
    );
    assert_eq!(config.security.property_patterns, vec!["*".to_string()]);
    assert_eq!(config.context.name, "server");
    assert!(!config.context.include_registry);
    assert_eq!(
        config.properties.get("com.example.Widget").map(String::as_str),
        Some("com.example.WidgetImplB")
    );
}

#[test]
fn test_config_builder() {
    let config = ConfigBuilder::new()
        .with_loader(LoaderConfig {
            profile: PipelineProfile::Api,
            runtime_home: None,
        })
        .with_property("com.example.Widget", "com.example.WidgetImplA")
        .build();

    assert_eq!(config.loader.profile, PipelineProfile::Api);
    assert_eq!(config.properties.len(), 1);
}

#[test]
fn test_config_save_load() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("saved.toml");

    let original = ConfigBuilder::new()
        .with_loader(LoaderConfig {
            profile: PipelineProfile::Api,
            runtime_home: Some(temp_dir.path().to_path_buf()),
        })
        .with_security(SecurityConfig {
            sandbox: true,
            granted: vec![OperationKind::ReadResource, OperationKind::ReadProperty],
            property_patterns: vec!["org.jboss.ws.*".to_string()],
            resource_patterns: vec!["META-INF/services/**".to_string()],
        })
        .with_property("org.jboss.ws.api.tools.ProviderFactory", "org.example.Provider")
        .build();

    let loader = ConfigLoader::new().with_config_path(&config_path);
    loader.save_to_file(&original, &config_path).unwrap();
    let loaded = loader.load().unwrap();

    assert_eq!(loaded.loader.profile, PipelineProfile::Api);
    assert_eq!(loaded.loader.runtime_home, original.loader.runtime_home);
    assert_eq!(loaded.security.granted, original.security.granted);
    assert_eq!(loaded.security.resource_patterns, original.security.resource_patterns);
    assert_eq!(loaded.properties, original.properties);
}

#[test]
fn test_invalid_log_level_rejected() {
    let err = load_toml("[logging]\nlevel = \"loud\"\n").unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
}

#[test]
fn test_sandbox_without_grants_rejected() {
    let err = load_toml("[security]\nsandbox = true\ngranted = []\n").unwrap_err();
    match err {
        Error::Configuration { message, .. } => assert!(message.contains("grants no operations")),
        other => panic!("Expected Configuration error, got {other:?}"),
    }
}

#[test]
fn test_invalid_glob_rejected() {
    let err = load_toml("[security]\nproperty_patterns = [\"[unclosed\"]\n").unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
}

#[test]
fn test_missing_resource_root_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("not-there");
    let content = format!(
        "[context]\nresource_roots = [{:?}]\n",
        missing.to_string_lossy()
    );

    let err = load_toml(&content).unwrap_err();
    match err {
        Error::Configuration { message, .. } => assert!(message.contains("not-there")),
        other => panic!("Expected Configuration error, got {other:?}"),
    }
}

#[test]
fn test_unknown_operation_kind_rejected() {
    let err = load_toml("[security]\ngranted = [\"format_disk\"]\n").unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
}

#[test]
fn test_context_config_default() {
    let config = ContextConfig::default();
    assert_eq!(config.name, SYSTEM_CONTEXT_NAME);
    assert!(config.resource_roots.is_empty());
}

/// Env overrides use the `WSSPI__` prefix with `__` between nested keys
///
/// Run with: `cargo test -p wsspi-infrastructure --test integration -- --test-threads=1 --ignored`
#[test]
#[ignore = "requires --test-threads=1 due to env var mutations"]
fn test_env_overrides_file() {
    let temp_dir = TempDir::new().unwrap();
    // SAFETY: Tests must run with --test-threads=1
    unsafe {
        env::set_var("WSSPI__LOADER__PROFILE", "api");
        env::set_var("WSSPI__LOGGING__LEVEL", "warn");
    }

    let config = ConfigLoader::new()
        .with_config_path(temp_dir.path().join("missing.toml"))
        .load();

    // SAFETY: Tests must run with --test-threads=1
    unsafe {
        env::remove_var("WSSPI__LOADER__PROFILE");
        env::remove_var("WSSPI__LOGGING__LEVEL");
    }

    let config = config.unwrap();
    assert_eq!(config.loader.profile, PipelineProfile::Api);
    assert_eq!(config.logging.level, "warn");
}

#[test]
fn test_granted_read_without_patterns_rejected() {
    let err = load_toml(
        "[security]\nsandbox = true\ngranted = [\"read_property\"]\nproperty_patterns = []\n",
    )
    .unwrap_err();
    match err {
        Error::Configuration { message, .. } => assert!(message.contains("property_patterns")),
        other => panic!("Expected Configuration error, got {other:?}"),
    }

    let err = load_toml(
        "[security]\nsandbox = true\ngranted = [\"read_resource\"]\nresource_patterns = []\n",
    )
    .unwrap_err();
    match err {
        Error::Configuration { message, .. } => assert!(message.contains("resource_patterns")),
        other => panic!("Expected Configuration error, got {other:?}"),
    }
}

#[test]
fn test_documented_sandbox_config_resolves_contextless_lookups() {
    let config = load_toml(
        r#"
[security]
sandbox = true
granted = [
    "read_resource",
    "load_implementation",
    "get_context_loader",
    "set_context_loader",
    "read_property",
    "read_file",
]
property_patterns = ["com.example.*", "wsspi.home"]
resource_patterns = ["META-INF/services/**"]

[properties]
"com.example.Widget" = "com.example.WidgetImplB"
"#,
    )
    .unwrap();

    let loader = build_service_loader(&config).unwrap();
    let widget: std::sync::Arc<dyn Widget> = loader.require(WIDGET_SERVICE, None, None).unwrap();

    assert_eq!(widget.label(), "WidgetImplB");
}
