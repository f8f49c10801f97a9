//! Resolution Key Cache
//!
//! Memoizes services file lookups per loading context.
//!
//! ```text
//! ResolutionKeyCache
//!   contexts: address(Arc<dyn LoadingContext>) → ContextEntry
//!                                                  owner:   Weak<dyn LoadingContext>
//!                                                  lookups: resource path → Found | Absent
//! ```
//!
//! The cache never holds a strong reference to a context. Each entry keeps a
//! `Weak` to its owner, which pins the allocation address (but not the
//! context value) so the address cannot be reused by another context while
//! the entry exists. Entries whose owner has been dropped are swept whenever
//! a new context is first seen, or explicitly with
//! [`purge_stale`](ResolutionKeyCache::purge_stale).

use std::sync::{Arc, Weak};

use dashmap::DashMap;
use tracing::{debug, trace};
use wsspi_domain::{
    CachedLookup, ContextRef, LoadingContext, ResolutionCacheProvider, ResourcePath,
};

#[derive(Debug)]
struct ContextEntry {
    owner: Weak<dyn LoadingContext>,
    lookups: DashMap<String, CachedLookup>,
}

impl ContextEntry {
    fn new(context: &ContextRef) -> Self {
        Self {
            owner: Arc::downgrade(context),
            lookups: DashMap::new(),
        }
    }

    fn is_live(&self) -> bool {
        self.owner.strong_count() > 0
    }
}

/// Weak-keyed (context, resource path) → lookup cache
#[derive(Debug, Default)]
pub struct ResolutionKeyCache {
    contexts: DashMap<usize, Arc<ContextEntry>>,
}

impl ResolutionKeyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the entries of every context that is no longer alive
    ///
    /// Returns the number of contexts removed.
    pub fn purge_stale(&self) -> usize {
        let before = self.contexts.len();
        self.contexts.retain(|_, entry| entry.is_live());
        let removed = before.saturating_sub(self.contexts.len());
        if removed > 0 {
            debug!(removed, "Purged cache entries of dropped loading contexts");
        }
        removed
    }

    /// Number of contexts with cached lookups, live or not yet purged
    pub fn context_count(&self) -> usize {
        self.contexts.len()
    }

    /// Whether `context` has a cached lookup for `path`
    pub fn is_cached(&self, context: &ContextRef, path: &ResourcePath) -> bool {
        self.get(context, path).is_some()
    }

    fn entry_for(&self, context: &ContextRef) -> Option<Arc<ContextEntry>> {
        Some(Arc::clone(self.contexts.get(&context_key(context))?.value()))
    }

    fn entry_or_insert(&self, context: &ContextRef) -> Arc<ContextEntry> {
        if let Some(entry) = self.entry_for(context) {
            return entry;
        }

        // First time this context is seen: the sweep keeps the outer map
        // bounded by the number of live contexts
        self.purge_stale();
        Arc::clone(
            self.contexts
                .entry(context_key(context))
                .or_insert_with(|| Arc::new(ContextEntry::new(context)))
                .value(),
        )
    }
}

impl ResolutionCacheProvider for ResolutionKeyCache {
    fn get(&self, context: &ContextRef, path: &ResourcePath) -> Option<CachedLookup> {
        let entry = self.entry_for(context)?;
        let lookup = entry.lookups.get(path.as_str())?.value().clone();
        trace!(path = %path, context = context.name(), "Cache hit");
        Some(lookup)
    }

    fn put(&self, context: &ContextRef, path: &ResourcePath, lookup: CachedLookup) {
        self.entry_or_insert(context)
            .lookups
            .insert(path.as_str().to_string(), lookup);
    }
}

fn context_key(context: &ContextRef) -> usize {
    Arc::as_ptr(context).cast::<()>() as usize
}
