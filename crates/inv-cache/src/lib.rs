//! # Inventory Cache
//!
//! 篩選面板資料緩存與異動追蹤

pub mod dirty_tracking;
pub mod facet_cache;

// Re-export 主要類型
pub use dirty_tracking::{DirtyTracker, SourceTable};
pub use facet_cache::{CachedFacets, FacetCache};
