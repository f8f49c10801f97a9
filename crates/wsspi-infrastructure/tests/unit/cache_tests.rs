//! Resolution key cache tests

use std::sync::Arc;
use std::thread;

use wsspi_domain::{CachedLookup, ContextRef, ResolutionCacheProvider, ServiceName};
use wsspi_infrastructure::{ClasspathContext, ResolutionKeyCache};

fn context(name: &str) -> ContextRef {
    ClasspathContext::new(name).into_ref()
}

fn widget_path() -> wsspi_domain::ResourcePath {
    ServiceName::new("com.example.Widget").unwrap().services_path()
}

#[test]
fn test_put_then_get() {
    let cache = ResolutionKeyCache::new();
    let ctx = context("app");
    let path = widget_path();

    assert!(cache.get(&ctx, &path).is_none());
    cache.put(&ctx, &path, CachedLookup::Found("com.example.WidgetImplA".into()));

    assert_eq!(
        cache.get(&ctx, &path),
        Some(CachedLookup::Found("com.example.WidgetImplA".into()))
    );
    assert!(cache.is_cached(&ctx, &path));
}

#[test]
fn test_negative_lookup_is_kept() {
    let cache = ResolutionKeyCache::new();
    let ctx = context("app");
    let path = widget_path();

    cache.put(&ctx, &path, CachedLookup::Absent);

    assert_eq!(cache.get(&ctx, &path), Some(CachedLookup::Absent));
}

#[test]
fn test_contexts_are_isolated() {
    let cache = ResolutionKeyCache::new();
    let first = context("first");
    let second = context("second");
    let path = widget_path();

    cache.put(&first, &path, CachedLookup::Found("com.example.WidgetImplA".into()));

    assert!(cache.get(&second, &path).is_none());
    assert_eq!(cache.context_count(), 1);
}

#[test]
fn test_clones_share_the_same_entry() {
    let cache = ResolutionKeyCache::new();
    let ctx = context("app");
    let alias = Arc::clone(&ctx);
    let path = widget_path();

    cache.put(&ctx, &path, CachedLookup::Absent);

    assert_eq!(cache.get(&alias, &path), Some(CachedLookup::Absent));
}

#[test]
fn test_cache_does_not_keep_context_alive() {
    let cache = ResolutionKeyCache::new();
    let ctx = context("short-lived");
    let liveness = Arc::downgrade(&ctx);
    cache.put(&ctx, &widget_path(), CachedLookup::Absent);

    drop(ctx);

    assert!(liveness.upgrade().is_none());
    assert_eq!(cache.context_count(), 1);
    assert_eq!(cache.purge_stale(), 1);
    assert_eq!(cache.context_count(), 0);
}

#[test]
fn test_new_context_sweeps_dropped_ones() {
    let cache = ResolutionKeyCache::new();
    let path = widget_path();
    for i in 0..4 {
        let ctx = context(&format!("module-{i}"));
        cache.put(&ctx, &path, CachedLookup::Absent);
    }

    let survivor = context("survivor");
    cache.put(&survivor, &path, CachedLookup::Absent);

    assert_eq!(cache.context_count(), 1);
    assert!(cache.is_cached(&survivor, &path));
}

#[test]
fn test_purge_keeps_live_contexts() {
    let cache = ResolutionKeyCache::new();
    let ctx = context("live");
    cache.put(&ctx, &widget_path(), CachedLookup::Absent);

    assert_eq!(cache.purge_stale(), 0);
    assert!(cache.is_cached(&ctx, &widget_path()));
}

#[test]
fn test_concurrent_access_converges() {
    let cache = ResolutionKeyCache::new();
    let ctx = context("shared");
    let path = widget_path();

    thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                for _ in 0..100 {
                    if cache.get(&ctx, &path).is_none() {
                        cache.put(&ctx, &path, CachedLookup::Found("com.example.WidgetImplA".into()));
                    }
                }
            });
        }
    });

    assert_eq!(cache.context_count(), 1);
    assert_eq!(
        cache.get(&ctx, &path),
        Some(CachedLookup::Found("com.example.WidgetImplA".into()))
    );
}
