//! Player Cache - in-memory NFL player directory
//!
//! Holds the full Sleeper player directory as an immutable snapshot that is
//! refreshed wholesale once it is older than its TTL, together with the
//! current NFL state, which is refreshed on every call.

pub mod cache;
pub mod source;
pub mod types;

pub use cache::PlayerCache;
pub use source::PlayerSource;
pub use types::{CacheConfig, PlayerMap, PlayerSnapshot, RefreshOutcome};
