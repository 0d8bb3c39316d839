pub mod cache;
pub mod merge;
pub mod store;

pub use cache::{CacheEntry, CacheStats, SectionCache};
pub use merge::merge_context;
pub use store::{ContextError, ContextStore, StoreConfig};
