//! Contract tooling facade tests

use std::sync::Arc;

use wsspi::infrastructure::ClasspathContext;
use wsspi::infrastructure::context::current_context;
use wsspi::tools::{PROVIDER_FACTORY_PROPERTY, new_consumer_with, new_provider_with};

use crate::test_utils::{
    LOCAL_PROVIDER, LOCAL_PROVIDER_FACTORY, runtime, services_file, take_constructed_under,
};

#[test]
fn test_provider_lookup_runs_under_target_context() {
    let runtime = runtime();
    let target = ClasspathContext::new("deployment")
        .with_registry(true)
        .into_ref();
    take_constructed_under();

    let mut provider = new_provider_with(&runtime.loader, Some(Arc::clone(&target))).unwrap();
    provider.options_mut().generate_wsdl = true;
    provider.provide("org.example.EchoEndpoint").unwrap();

    assert_eq!(take_constructed_under(), vec!["deployment".to_string()]);
    assert!(current_context().is_none());
}

#[test]
fn test_services_file_in_target_context_selects_factory() {
    let runtime = runtime();
    let target = ClasspathContext::new("deployment")
        .with_resource(services_file(PROVIDER_FACTORY_PROPERTY), LOCAL_PROVIDER_FACTORY)
        .with_implementation(&LOCAL_PROVIDER)
        .into_ref();
    take_constructed_under();

    new_provider_with(&runtime.loader, Some(target)).unwrap();
    new_provider_with(&runtime.loader, None).unwrap();

    // The second lookup falls back to the system context and the default factory
    assert_eq!(
        take_constructed_under(),
        vec!["deployment".to_string(), "system".to_string()]
    );
}

#[test]
fn test_previous_context_is_restored_on_failure() {
    let runtime = runtime();
    runtime
        .properties
        .set(PROVIDER_FACTORY_PROPERTY, "org.example.MissingFactory");
    let outer = ClasspathContext::new("outer").into_ref();
    let target = ClasspathContext::new("deployment").into_ref();

    let result = runtime
        .loader
        .with_current_context(Arc::clone(&outer), || {
            let err = new_provider_with(&runtime.loader, Some(target)).err();
            Ok((err, current_context()))
        })
        .unwrap();

    let (err, during) = result;
    assert!(matches!(err, Some(wsspi::Error::ProviderLoad { .. })));
    assert!(during.is_some_and(|context| Arc::ptr_eq(&context, &outer)));
    assert!(current_context().is_none());
}

#[test]
fn test_consumer_uses_default_factory() {
    let runtime = runtime();
    take_constructed_under();

    let mut consumer = new_consumer_with(&runtime.loader, None).unwrap();
    consumer.options_mut().target_package = Some("org.example.client".to_string());
    consumer.consume("file:echo.wsdl").unwrap();

    assert_eq!(take_constructed_under(), vec!["system".to_string()]);
    assert!(current_context().is_none());
}
