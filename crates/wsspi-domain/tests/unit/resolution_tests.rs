//! Unit tests for resolution strategies and outcomes

use wsspi_domain::{CachedLookup, ResolutionStrategy, ResolvedProvider};

#[test]
fn test_strategy_order_is_precedence_order() {
    let mut sorted = ResolutionStrategy::ORDER.to_vec();
    sorted.sort();
    assert_eq!(sorted, ResolutionStrategy::ORDER.to_vec());
    assert_eq!(ResolutionStrategy::ORDER[0], ResolutionStrategy::ServicesFile);
    assert_eq!(ResolutionStrategy::ORDER[3], ResolutionStrategy::Default);
}

#[test]
fn test_strategy_serde_names() {
    #[derive(serde::Deserialize)]
    struct Holder {
        strategy: ResolutionStrategy,
    }
    let holder: Holder = toml::from_str("strategy = \"external_config\"").unwrap();
    assert_eq!(holder.strategy, ResolutionStrategy::ExternalConfig);
    assert_eq!(holder.strategy.to_string(), "external_config");
}

#[test]
fn test_resolved_provider_accessors() {
    let resolved = ResolvedProvider::Resolved {
        implementation: "com.example.WidgetImplA".to_string(),
        strategy: ResolutionStrategy::ServicesFile,
    };
    assert!(resolved.is_resolved());
    assert_eq!(resolved.implementation(), Some("com.example.WidgetImplA"));
    assert_eq!(resolved.strategy(), Some(ResolutionStrategy::ServicesFile));

    let unresolved = ResolvedProvider::Unresolved;
    assert!(!unresolved.is_resolved());
    assert_eq!(unresolved.implementation(), None);
    assert_eq!(unresolved.strategy(), None);
}

#[test]
fn test_cached_lookup_conversions() {
    assert_eq!(CachedLookup::from(None), CachedLookup::Absent);
    assert_eq!(
        CachedLookup::from(Some("x".to_string())).into_option(),
        Some("x".to_string())
    );
    assert_eq!(CachedLookup::Absent.into_option(), None);
}
