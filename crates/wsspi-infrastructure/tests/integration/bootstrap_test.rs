//! End-to-end tests of a loader built from configuration

use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;
use wsspi_application::PipelineProfile;
use wsspi_domain::{Error, OperationKind, ResolutionStrategy, ServiceName};
use wsspi_infrastructure::config::{
    AppConfig, ConfigBuilder, ContextConfig, LoaderConfig, SecurityConfig,
};
use wsspi_infrastructure::{ClasspathContext, build_runtime, build_service_loader};

use crate::test_utils::{WIDGET_SERVICE, WIDGET_SERVICES_FILE, Widget, write_file};

fn config_with_root(root: &Path) -> ConfigBuilder {
    ConfigBuilder::new().with_context(ContextConfig {
        resource_roots: vec![root.to_path_buf()],
        ..ContextConfig::default()
    })
}

fn widget_label(config: &AppConfig, default: Option<&str>) -> &'static str {
    let loader = build_service_loader(config).unwrap();
    let widget: Arc<dyn Widget> = loader.require(WIDGET_SERVICE, default, None).unwrap();
    widget.label()
}

#[test]
fn test_services_file_on_disk_wins() {
    let root = TempDir::new().unwrap();
    write_file(root.path(), WIDGET_SERVICES_FILE, "com.example.WidgetImplA\n");
    let config = config_with_root(root.path())
        .with_property(WIDGET_SERVICE, "com.example.WidgetImplB")
        .build();

    assert_eq!(widget_label(&config, Some("com.example.WidgetDefault")), "WidgetImplA");
}

#[test]
fn test_configured_property_is_used() {
    let config = ConfigBuilder::new()
        .with_property(WIDGET_SERVICE, "com.example.WidgetImplB")
        .build();

    assert_eq!(widget_label(&config, Some("com.example.WidgetDefault")), "WidgetImplB");
}

#[test]
fn test_runtime_property_change_is_seen() {
    let runtime = build_runtime(&AppConfig::default()).unwrap();
    runtime
        .properties
        .set(WIDGET_SERVICE, "com.example.WidgetImplB");

    let resolved = runtime.loader.resolve(WIDGET_SERVICE, None, None).unwrap();

    assert_eq!(resolved.implementation(), Some("com.example.WidgetImplB"));
    assert_eq!(resolved.strategy(), Some(ResolutionStrategy::SystemProperty));
}

#[test]
fn test_default_is_used_last() {
    assert_eq!(
        widget_label(&AppConfig::default(), Some("com.example.WidgetDefault")),
        "WidgetDefault"
    );
}

#[test]
fn test_unknown_class_is_provider_load_error() {
    let root = TempDir::new().unwrap();
    write_file(root.path(), WIDGET_SERVICES_FILE, "com.example.Missing\n");
    let loader = build_service_loader(&config_with_root(root.path()).build()).unwrap();

    let err = loader
        .resolve_and_instantiate(WIDGET_SERVICE, Some("com.example.WidgetDefault"), None)
        .err()
        .expect("unknown class");

    assert!(matches!(err, Error::ProviderLoad { .. }));
    assert_eq!(err.failed_implementation(), Some("com.example.Missing"));
}

#[test]
fn test_registry_hidden_when_disabled() {
    let config = ConfigBuilder::new()
        .with_context(ContextConfig {
            include_registry: false,
            ..ContextConfig::default()
        })
        .build();
    let loader = build_service_loader(&config).unwrap();

    let err = loader
        .resolve_and_instantiate(WIDGET_SERVICE, Some("com.example.WidgetDefault"), None)
        .err()
        .expect("registry is hidden");
    assert_eq!(err.failed_implementation(), Some("com.example.WidgetDefault"));
}

#[test]
fn test_external_config_follows_profile() {
    let home = TempDir::new().unwrap();
    write_file(
        home.path(),
        "lib/wsspi.toml",
        "[services]\n\"com.example.Widget\" = \"com.example.WidgetImplB\"\n",
    );
    let with_profile = |profile| {
        ConfigBuilder::new()
            .with_loader(LoaderConfig {
                profile,
                runtime_home: Some(home.path().to_path_buf()),
            })
            .with_property(WIDGET_SERVICE, "com.example.WidgetImplA")
            .build()
    };

    assert_eq!(widget_label(&with_profile(PipelineProfile::Spi), None), "WidgetImplB");
    assert_eq!(widget_label(&with_profile(PipelineProfile::Api), None), "WidgetImplA");
}

#[test]
fn test_sandbox_refusal_surfaces() {
    let config = ConfigBuilder::new()
        .with_security(SecurityConfig {
            sandbox: true,
            granted: vec![
                OperationKind::GetContextLoader,
                OperationKind::ReadResource,
                OperationKind::LoadImplementation,
            ],
            ..SecurityConfig::default()
        })
        .build();
    let runtime = build_runtime(&config).unwrap();
    assert!(runtime.executor.is_sandboxed());

    let err = runtime
        .loader
        .resolve(WIDGET_SERVICE, Some("com.example.WidgetDefault"), None)
        .unwrap_err();

    match err {
        Error::PermissionDenied { operation } => assert!(operation.contains("wsspi.home")),
        other => panic!("Expected PermissionDenied, got {other:?}"),
    }
}

#[test]
fn test_services_file_lookup_is_cached_for_system_context() {
    let root = TempDir::new().unwrap();
    write_file(root.path(), WIDGET_SERVICES_FILE, "com.example.WidgetImplA\n");
    let runtime = build_runtime(&config_with_root(root.path()).build()).unwrap();
    let path = ServiceName::new(WIDGET_SERVICE).unwrap().services_path();

    runtime.loader.resolve(WIDGET_SERVICE, None, None).unwrap();
    assert!(runtime.cache.is_cached(&runtime.system, &path));

    // The file is not read again once cached
    write_file(root.path(), WIDGET_SERVICES_FILE, "com.example.WidgetImplB\n");
    let resolved = runtime.loader.resolve(WIDGET_SERVICE, None, None).unwrap();
    assert_eq!(resolved.implementation(), Some("com.example.WidgetImplA"));
}

#[test]
fn test_thread_current_context_scopes_resolution() {
    let runtime = build_runtime(&AppConfig::default()).unwrap();
    let deployment = ClasspathContext::new("deployment.war")
        .with_parent(runtime.system.clone())
        .with_resource(WIDGET_SERVICES_FILE, "com.example.WidgetImplA")
        .into_ref();

    let inside = runtime
        .loader
        .with_current_context(deployment, || {
            runtime.loader.resolve(WIDGET_SERVICE, None, None)
        })
        .unwrap();
    let outside = runtime.loader.resolve(WIDGET_SERVICE, None, None).unwrap();

    assert_eq!(inside.implementation(), Some("com.example.WidgetImplA"));
    assert!(!outside.is_resolved());
}
