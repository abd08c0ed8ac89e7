//! 可用量計算

use inv_core::{AllocationRecord, AllocationStatus, InventoryItem};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// 單一庫存項目的分配結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationSummary {
    /// 可用數量（可能為負）
    pub available_qty: Decimal,
    /// 總分配量 = 整批分配 + 單項分配
    pub total_allocated: Decimal,
    /// 整批分配量
    pub batch_allocated: Decimal,
    /// 單項分配量
    pub item_allocated: Decimal,
    /// 參與計算的分配記錄數
    pub allocation_count: u32,
    pub status: AllocationStatus,
    /// 超額分配量（未超額時為 0）
    pub over_allocated_by: Decimal,
    /// 現有重量缺失（以 0 計算）
    pub missing_weight: bool,
}

/// 可用量計算器
pub struct AllocationResolver;

impl AllocationResolver {
    /// 依原始分配記錄計算可用量
    ///
    /// # 參數
    /// * `batch_total_weight` - 同批次所有項目的現有重量總和
    /// * `allocations` - 可包含無關記錄，僅取同批次的整批分配與本項目的單項分配
    pub fn resolve(
        item: &InventoryItem,
        batch_total_weight: Decimal,
        allocations: &[AllocationRecord],
    ) -> AllocationSummary {
        let mut batch_allocated = Decimal::ZERO;
        let mut item_allocated = Decimal::ZERO;
        let mut count = 0u32;

        for record in allocations {
            if record.is_batch_level() && record.pan_id == item.pan_id {
                batch_allocated += record.qty;
                count += 1;
            } else if record.inventory_id == Some(item.inventory_id) {
                item_allocated += record.qty;
                count += 1;
            }
        }

        Self::from_totals(item, batch_total_weight, batch_allocated, item_allocated, count)
    }

    /// 依預先彙總的數量計算可用量
    ///
    /// 輕量路徑與完整視圖共用此公式，兩者結果必須一致。
    pub fn from_totals(
        item: &InventoryItem,
        batch_total_weight: Decimal,
        batch_allocated: Decimal,
        item_allocated: Decimal,
        allocation_count: u32,
    ) -> AllocationSummary {
        let weight_left = item.weight_left.unwrap_or(Decimal::ZERO);

        // 整批分配優先：整批重量扣除兩種分配
        let available_qty = if batch_allocated > Decimal::ZERO {
            batch_total_weight - batch_allocated - item_allocated
        } else {
            weight_left - (batch_allocated + item_allocated)
        };

        let total_allocated = batch_allocated + item_allocated;
        let status = AllocationStatus::classify(available_qty, total_allocated);
        let over_allocated_by = if available_qty < Decimal::ZERO {
            -available_qty
        } else {
            Decimal::ZERO
        };

        AllocationSummary {
            available_qty,
            total_allocated,
            batch_allocated,
            item_allocated,
            allocation_count,
            status,
            over_allocated_by,
            missing_weight: item.weight_left.is_none(),
        }
    }

    /// 計算批次重量總和（缺失重量以 0 計）
    pub fn batch_weights<'a, I>(items: I) -> HashMap<i64, Decimal>
    where
        I: IntoIterator<Item = &'a InventoryItem>,
    {
        let mut weights = HashMap::new();
        for item in items {
            *weights.entry(item.pan_id).or_insert(Decimal::ZERO) +=
                item.weight_left.unwrap_or(Decimal::ZERO);
        }
        weights
    }
}

/// 預先彙總的分配帳
///
/// 以雜湊彙總取代逐列子查詢，供第一階段的輕量投影使用。
#[derive(Debug, Clone, Default)]
pub struct AllocationLedger {
    batch_weights: HashMap<i64, Decimal>,
    batch_allocations: HashMap<i64, (Decimal, u32)>,
    item_allocations: HashMap<i64, (Decimal, u32)>,
}

impl AllocationLedger {
    /// 從全表項目與分配記錄建立
    pub fn build(items: &[InventoryItem], allocations: &[AllocationRecord]) -> Self {
        let batch_weights = AllocationResolver::batch_weights(items);

        let mut batch_allocations: HashMap<i64, (Decimal, u32)> = HashMap::new();
        let mut item_allocations: HashMap<i64, (Decimal, u32)> = HashMap::new();

        for record in allocations {
            let slot = match record.inventory_id {
                None => batch_allocations.entry(record.pan_id),
                Some(inventory_id) => item_allocations.entry(inventory_id),
            }
            .or_insert((Decimal::ZERO, 0));
            slot.0 += record.qty;
            slot.1 += 1;
        }

        Self {
            batch_weights,
            batch_allocations,
            item_allocations,
        }
    }

    /// 計算某項目的可用量
    pub fn summarize(&self, item: &InventoryItem) -> AllocationSummary {
        let batch_total_weight = self
            .batch_weights
            .get(&item.pan_id)
            .copied()
            .unwrap_or(Decimal::ZERO);
        let (batch_allocated, batch_count) = self
            .batch_allocations
            .get(&item.pan_id)
            .copied()
            .unwrap_or((Decimal::ZERO, 0));
        let (item_allocated, item_count) = self
            .item_allocations
            .get(&item.inventory_id)
            .copied()
            .unwrap_or((Decimal::ZERO, 0));

        AllocationResolver::from_totals(
            item,
            batch_total_weight,
            batch_allocated,
            item_allocated,
            batch_count + item_count,
        )
    }
}
