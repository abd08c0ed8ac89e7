//! # Inventory Calculation Engine
//!
//! 可用量計算、規格解析、動態篩選與兩階段查詢

pub mod allocation;
pub mod executor;
pub mod facets;
pub mod filter;
pub mod sort;
pub mod spec;
pub mod store;
pub mod text;
pub mod view;

// Re-export 主要類型
pub use allocation::{AllocationLedger, AllocationResolver, AllocationSummary};
pub use executor::{InventorySearch, ItemLookup};
pub use facets::{FacetAggregator, FilterFacets, SpecRanges};
pub use filter::{FilterTarget, NumericField, Predicate, PredicateBuilder, TextField};
pub use spec::SpecResolver;
pub use store::{InventoryStore, MemoryStore};
pub use text::TextQuery;
pub use view::ViewBuilder;

use inv_core::InventoryView;
use serde::Serialize;

/// 搜尋結果（單頁）
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    /// 依排序的完整視圖
    pub items: Vec<InventoryView>,

    /// 符合條件的總筆數
    pub total_count: usize,

    pub page: usize,
    pub size: usize,

    /// 資料品質警告
    pub warnings: Vec<DataQualityWarning>,
}

impl SearchPage {
    /// 創建空的結果頁
    pub fn empty(page: usize, size: usize, total_count: usize) -> Self {
        Self {
            items: Vec::new(),
            total_count,
            page,
            size,
            warnings: Vec::new(),
        }
    }

    /// 總頁數
    pub fn total_pages(&self) -> usize {
        if self.size == 0 {
            0
        } else {
            self.total_count.div_ceil(self.size)
        }
    }
}

/// 資料品質警告（不中斷計算）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataQualityWarning {
    pub inventory_id: i64,
    pub kind: AnomalyKind,
    pub message: String,
}

impl DataQualityWarning {
    pub fn new(inventory_id: i64, kind: AnomalyKind, message: String) -> Self {
        Self {
            inventory_id,
            kind,
            message,
        }
    }

    /// 寫入日誌
    pub fn emit(&self) {
        tracing::warn!(
            inventory_id = self.inventory_id,
            kind = ?self.kind,
            "資料品質警告: {}",
            self.message
        );
    }

    pub fn missing_weight(inventory_id: i64) -> Self {
        Self::new(
            inventory_id,
            AnomalyKind::MissingWeight,
            "缺少現有重量，以 0 計算".to_string(),
        )
    }

    pub fn unparsable_spec(inventory_id: i64, message: String) -> Self {
        Self::new(inventory_id, AnomalyKind::UnparsableSpec, message)
    }

    pub fn missing_hydrated_row(inventory_id: i64) -> Self {
        Self::new(
            inventory_id,
            AnomalyKind::MissingHydratedRow,
            "第二階段找不到該列，已略過".to_string(),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AnomalyKind {
    MissingWeight,
    UnparsableSpec,
    MissingHydratedRow,
}
