//! 視圖組裝
//!
//! 輕量投影與完整視圖共用同一套可用量與規格解析邏輯。

use inv_core::{AllocationRecord, AllocationRollup, InventoryItem, InventoryRow, InventoryView};
use rust_decimal::Decimal;
use std::collections::BTreeSet;

use crate::allocation::{AllocationLedger, AllocationResolver, AllocationSummary};
use crate::spec::SpecResolver;
use crate::DataQualityWarning;

/// 視圖組裝器
pub struct ViewBuilder;

impl ViewBuilder {
    /// 組裝第一階段的輕量投影
    pub fn build_row(
        item: InventoryItem,
        ledger: &AllocationLedger,
    ) -> (InventoryRow, Vec<DataQualityWarning>) {
        let summary = ledger.summarize(&item);
        let (specs, warnings) = SpecResolver::resolve_all(&item);

        let row = InventoryRow {
            lot_name: item.lot_name(),
            item,
            available_qty: summary.available_qty,
            melt_index: specs.melt_index,
            density: specs.density,
            izod_impact: specs.izod_impact,
        };
        (row, warnings)
    }

    /// 組裝完整視圖
    ///
    /// # 參數
    /// * `batch_total_weight` - 同批次所有項目的現有重量總和
    /// * `allocations` - 至少包含同批次的整批分配與本項目的單項分配
    pub fn build_view(
        item: InventoryItem,
        batch_total_weight: Decimal,
        allocations: &[AllocationRecord],
    ) -> (InventoryView, Vec<DataQualityWarning>) {
        let summary = AllocationResolver::resolve(&item, batch_total_weight, allocations);
        let (specs, mut warnings) = SpecResolver::resolve_all(&item);
        if summary.missing_weight {
            warnings.push(DataQualityWarning::missing_weight(item.inventory_id));
        }

        let relevant: Vec<&AllocationRecord> = allocations
            .iter()
            .filter(|r| {
                (r.is_batch_level() && r.pan_id == item.pan_id)
                    || r.inventory_id == Some(item.inventory_id)
            })
            .collect();
        let rollup = Self::rollup(&relevant);

        let AllocationSummary {
            available_qty,
            total_allocated,
            batch_allocated,
            item_allocated,
            allocation_count,
            status,
            over_allocated_by,
            ..
        } = summary;

        let view = InventoryView {
            lot_name: item.lot_name(),
            item,
            available_qty,
            total_allocated,
            pan_level_allocated: batch_allocated,
            inventory_level_allocated: item_allocated,
            allocation_count,
            allocation_status: status,
            over_allocated_by,
            melt_index: specs.melt_index,
            density: specs.density,
            izod_impact: specs.izod_impact,
            rollup,
        };
        (view, warnings)
    }

    /// 彙總分配明細
    fn rollup(records: &[&AllocationRecord]) -> AllocationRollup {
        let all = || records.iter().copied();
        let batch = || all().filter(|r| r.is_batch_level());
        let single = || all().filter(|r| !r.is_batch_level());

        AllocationRollup {
            allocated_customer_codes: join(all().map(|r| r.customer_code.clone())),
            allocated_pos: join(all().map(|r| r.purchase_order.clone())),
            allocated_container_nums: join(all().map(|r| r.container_num.clone())),
            allocated_book_nums: join(all().map(|r| r.book_num.clone())),
            allocated_so_types: join(all().map(|r| r.so_type.clone())),
            allocated_allocation_ids: join_ids(all().filter_map(|r| r.allocation_id)),
            pan_level_pos: join(batch().map(|r| r.purchase_order.clone())),
            pan_level_customer_codes: join(batch().map(|r| r.customer_code.clone())),
            inventory_level_pos: join(single().map(|r| r.purchase_order.clone())),
            inventory_level_customer_codes: join(single().map(|r| r.customer_code.clone())),
        }
    }
}

/// 不重複、排序後以 ", " 串接；全空返回 `None`
fn join<I>(values: I) -> Option<String>
where
    I: Iterator<Item = Option<String>>,
{
    let distinct: BTreeSet<String> = values
        .flatten()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect();
    if distinct.is_empty() {
        None
    } else {
        Some(distinct.into_iter().collect::<Vec<_>>().join(", "))
    }
}

fn join_ids<I: Iterator<Item = i64>>(ids: I) -> Option<String> {
    let distinct: BTreeSet<i64> = ids.collect();
    if distinct.is_empty() {
        None
    } else {
        Some(
            distinct
                .iter()
                .map(i64::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}
