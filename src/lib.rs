//! # Inventory Search
//!
//! 聚合物庫存可用量與搜尋引擎
//!
//! - [`model`]：資料模型
//! - [`calc`]：可用量計算、篩選與兩階段查詢
//! - [`cache`]：篩選面板資料緩存

pub use inv_cache as cache;
pub use inv_calc as calc;
pub use inv_core as model;

pub use inv_cache::{FacetCache, SourceTable};
pub use inv_calc::{InventorySearch, ItemLookup, MemoryStore, SearchPage};
pub use inv_core::{InventoryError, Result, SearchConfig, SearchCriteria, SortSpec};

pub mod telemetry;
