// Cache module for local filesystem caching.
// Wraps the remote fetches and the boundary file read behind a TTL check.

pub mod store;

pub use store::{CacheStore, CachedData, DEFAULT_MAX_ENTRIES};
