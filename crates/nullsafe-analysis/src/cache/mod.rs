//! Error diffing and impact caches.

pub mod downstream;
pub mod error_store;
pub mod impact;
pub mod target_cache;

pub use downstream::{DownstreamImpactCache, DownstreamImpactCacheImpl, VoidDownstreamImpactCache};
pub use error_store::{ErrorDiff, ErrorSnapshot, ErrorStore};
pub use impact::Impact;
pub use target_cache::ImpactCache;
