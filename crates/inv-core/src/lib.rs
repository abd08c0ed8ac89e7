//! # Inventory Core
//!
//! 核心資料模型與類型定義

pub mod allocation;
pub mod config;
pub mod criteria;
pub mod item;
pub mod sort;
pub mod view;

// Re-export 主要類型
pub use allocation::{AllocationRecord, AllocationStatus};
pub use config::SearchConfig;
pub use criteria::{LooseBound, RangeCriteria, SearchCriteria};
pub use item::{Compartment, InventoryItem, SpecKind, SpecReadings};
pub use sort::{SortDirection, SortField, SortSpec};
pub use view::{AllocationRollup, InventoryRow, InventoryView};

/// 庫存錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("找不到庫存項目: PanID {pan_id}")]
    NotFound { pan_id: i64 },

    #[error("無法解析規格值: 庫存 {inventory_id} 的 {kind} = {raw:?}")]
    InvalidSpecValue {
        inventory_id: i64,
        kind: SpecKind,
        raw: String,
    },

    #[error("無效的查詢條件: {0}")]
    InvalidCriteria(String),

    #[error("儲存層錯誤: {0}")]
    Storage(String),

    #[error("其他錯誤: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, InventoryError>;
