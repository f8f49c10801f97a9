//! Resolution caching

pub mod resolution_key_cache;

pub use resolution_key_cache::ResolutionKeyCache;
