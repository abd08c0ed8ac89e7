//! 庫存視圖模型（讀取時推導，不持久化）

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AllocationStatus, InventoryItem, SpecKind};

/// 輕量投影：只帶篩選與排序所需的推導欄位
///
/// 查詢第一階段使用，不含分配明細彙總。
#[derive(Debug, Clone)]
pub struct InventoryRow {
    pub item: InventoryItem,
    pub lot_name: Option<String>,
    pub available_qty: Decimal,
    pub melt_index: Option<Decimal>,
    pub density: Option<Decimal>,
    pub izod_impact: Option<Decimal>,
}

impl InventoryRow {
    /// 取得已解析的規格值
    pub fn spec(&self, kind: SpecKind) -> Option<Decimal> {
        match kind {
            SpecKind::MeltIndex => self.melt_index,
            SpecKind::Density => self.density,
            SpecKind::Izod => self.izod_impact,
        }
    }
}

/// 分配明細彙總（逗號串接的不重複值）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationRollup {
    pub allocated_customer_codes: Option<String>,
    pub allocated_pos: Option<String>,
    pub allocated_container_nums: Option<String>,
    pub allocated_book_nums: Option<String>,
    pub allocated_so_types: Option<String>,
    pub allocated_allocation_ids: Option<String>,

    /// 整批分配的採購單號
    pub pan_level_pos: Option<String>,
    pub pan_level_customer_codes: Option<String>,

    /// 單項分配的採購單號
    pub inventory_level_pos: Option<String>,
    pub inventory_level_customer_codes: Option<String>,
}

/// 完整庫存視圖（每個庫存項目一列）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryView {
    #[serde(flatten)]
    pub item: InventoryItem,

    pub lot_name: Option<String>,

    /// 可用數量（超額分配時為負）
    pub available_qty: Decimal,
    pub total_allocated: Decimal,
    pub pan_level_allocated: Decimal,
    pub inventory_level_allocated: Decimal,
    pub allocation_count: u32,
    pub allocation_status: AllocationStatus,
    pub over_allocated_by: Decimal,

    /// 依隔間解析後的規格
    pub melt_index: Option<Decimal>,
    pub density: Option<Decimal>,
    pub izod_impact: Option<Decimal>,

    #[serde(flatten)]
    pub rollup: AllocationRollup,
}

impl InventoryView {
    /// 前端使用的顯示鍵
    pub fn display_id(&self) -> String {
        format!("pan-{}-inv-{}", self.item.pan_id, self.item.inventory_id)
    }

    /// 取得已解析的規格值
    pub fn spec(&self, kind: SpecKind) -> Option<Decimal> {
        match kind {
            SpecKind::MeltIndex => self.melt_index,
            SpecKind::Density => self.density,
            SpecKind::Izod => self.izod_impact,
        }
    }

    pub fn inventory_id(&self) -> i64 {
        self.item.inventory_id
    }
}
