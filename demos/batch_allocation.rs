//! 整批分配與單項分配示例

use inv::calc::{AllocationLedger, AllocationResolver, ViewBuilder};
use inv::model::{AllocationRecord, InventoryItem};
use rust_decimal::Decimal;

fn main() -> anyhow::Result<()> {
    inv::telemetry::init();
    println!("=== 整批分配示例 ===\n");

    // 同一批次的三個項目
    let items = vec![
        InventoryItem::new(1, 500).with_lot("PSD", "1").with_weight_left(Decimal::from(1200)),
        InventoryItem::new(2, 500).with_lot("PSD", "2").with_weight_left(Decimal::from(800)),
        InventoryItem::new(3, 500).with_lot("PSD", "3"),
    ];
    let allocations = vec![
        AllocationRecord::batch(500, Decimal::from(1500)).with_customer("ACME"),
        AllocationRecord::item(500, 2, Decimal::from(600)).with_customer("BETA"),
    ];

    let batch_weights = AllocationResolver::batch_weights(&items);
    let ledger = AllocationLedger::build(&items, &allocations);

    println!("批次總重: {}", batch_weights.get(&500).copied().unwrap_or_default());
    println!("{:<10} {:>8} {:>8} {:>10}  狀態", "批名", "現有", "可用", "超額");

    for item in &items {
        let weight = batch_weights.get(&item.pan_id).copied().unwrap_or_default();
        let (view, warnings) = ViewBuilder::build_view(item.clone(), weight, &allocations);

        // 輕量路徑與完整視圖一致
        anyhow::ensure!(
            ledger.summarize(item).available_qty == view.available_qty,
            "可用量不一致: {}",
            view.display_id()
        );

        println!(
            "{:<10} {:>8} {:>8} {:>10}  {}",
            view.lot_name.as_deref().unwrap_or("-"),
            item.weight_left.map(|w| w.to_string()).unwrap_or_else(|| "-".to_string()),
            view.available_qty,
            view.over_allocated_by,
            view.allocation_status
        );
        for warning in &warnings {
            println!("  ! {}", warning.message);
        }
    }

    Ok(())
}
