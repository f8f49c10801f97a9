//! Services file lookup cache

use std::fmt;

use crate::ports::loading::ContextRef;
use crate::value_objects::{CachedLookup, ResourcePath};

/// Per-context memo of services file lookups
///
/// Implementations must not keep a context alive because it was used as a
/// key. Individual `get`/`put` calls are atomic; concurrent `put`s for the
/// same key resolve last-write-wins.
pub trait ResolutionCacheProvider: Send + Sync + fmt::Debug {
    /// Cached lookup for `path` in `context`
    fn get(&self, context: &ContextRef, path: &ResourcePath) -> Option<CachedLookup>;

    /// Record the lookup for `path` in `context`
    fn put(&self, context: &ContextRef, path: &ResourcePath, lookup: CachedLookup);
}
