//! 聚合物庫存搜尋示例

use chrono::NaiveDate;
use inv::calc::InventoryStore;
use inv::model::{AllocationRecord, Compartment, InventoryItem, SortField, SpecKind};
use inv::{InventorySearch, ItemLookup, MemoryStore, SearchConfig, SearchCriteria, SortSpec};
use rust_decimal::Decimal;

fn main() -> anyhow::Result<()> {
    inv::telemetry::init();
    println!("=== 聚合物庫存搜尋示例 ===\n");

    let store = sample_store()?;
    let search = InventorySearch::new(store, SearchConfig::default());
    println!("庫存項目: {} 筆\n", search.store().scan_items()?.len());

    // 1. 組合代碼搜尋："pepel" = PE + PEL
    let criteria = SearchCriteria::default().with_search_text("pepel");
    let page = search.search(&criteria, 0, 10, search.resolve_sort(Some("quantity-high")))?;
    println!("搜尋 \"pepel\"：共 {} 筆", page.total_count);
    for view in &page.items {
        println!(
            "  {}  {:<12} 可用 {:>8}  狀態 {}",
            view.display_id(),
            view.lot_name.as_deref().unwrap_or("-"),
            view.available_qty,
            view.allocation_status
        );
    }

    // 2. 規格範圍：MI 在 [2, 5] 或未檢驗
    let criteria = SearchCriteria::default()
        .with_range(SpecKind::MeltIndex, Some(Decimal::from(2)), Some(Decimal::from(5)))
        .with_include_na(SpecKind::MeltIndex);
    let page = search.search(&criteria, 0, 10, SortSpec::asc(SortField::MeltIndex))?;
    println!("\nMI 2~5（含未檢驗）：共 {} 筆", page.total_count);
    for view in &page.items {
        let mi = view
            .melt_index
            .map(|v| v.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        println!("  {}  MI {}", view.display_id(), mi);
    }

    // 3. 請求層 JSON 條件
    let criteria = SearchCriteria::from_json(
        r#"{ "suppliers": ["SABIC"], "minQty": "100", "maxQty": "not-a-number" }"#,
    )?;
    let page = search.search(&criteria, 0, 0, search.resolve_sort(None))?;
    println!("\nSABIC 且可用量 >= 100：共 {} 筆", page.total_count);

    // 4. 單筆查詢與篩選面板
    let view = search.find_item(&ItemLookup::new(100).with_product("PE", "PEL"))?;
    println!("\n批次 100 首筆: {}", serde_json::to_string_pretty(&view)?);

    let today = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap_or_default();
    let facets = search.facets(today)?;
    println!("\n篩選面板: {}", serde_json::to_string_pretty(&facets)?);

    if !page.warnings.is_empty() {
        println!("\n資料品質警告 {} 筆", page.warnings.len());
    }

    Ok(())
}

fn sample_store() -> anyhow::Result<MemoryStore> {
    let at = |month: u32, day: u32| {
        NaiveDate::from_ymd_opt(2025, month, day)
            .and_then(|d| d.and_hms_opt(9, 0, 0))
            .ok_or_else(|| anyhow::anyhow!("無效日期: 2025-{month}-{day}"))
    };

    let store = MemoryStore::new();
    store.upsert_item(
        InventoryItem::new(1, 100)
            .with_pan_date(at(5, 2)?)
            .with_product("PE", "PEL", "HD")
            .with_lot("PSD", "2250281")
            .with_supplier("SABIC")
            .with_brand("Marlex")
            .with_location("Main", "Bay-1")
            .with_weight_left(Decimal::from(400))
            .with_spec(SpecKind::MeltIndex, Compartment::A, "3.2")
            .with_spec(SpecKind::Density, Compartment::A, "0.952"),
    )?;
    store.upsert_item(
        InventoryItem::new(2, 100)
            .with_pan_date(at(5, 2)?)
            .with_product("PE", "PEL", "HD")
            .with_lot("PSD", "2250282")
            .with_supplier("SABIC")
            .with_location("Main", "Bay-1")
            .with_compartment("B")
            .with_weight_left(Decimal::from(600))
            .with_spec(SpecKind::MeltIndex, Compartment::A, "3.2")
            .with_spec(SpecKind::MeltIndex, Compartment::B, "1.1"),
    )?;
    store.upsert_item(
        InventoryItem::new(3, 101)
            .with_pan_date(at(6, 11)?)
            .with_product("PP", "REG", "HO")
            .with_lot("RPP", "118")
            .with_supplier("DOW")
            .with_location("Annex", "Yard")
            .with_shipment("PO-7781", "MSCU 1234567")
            .with_weight_left(Decimal::from(250)),
    )?;
    store.upsert_item(
        InventoryItem::new(4, 102)
            .with_pan_date(at(6, 20)?)
            .with_product("PE", "PEL", "LL")
            .with_supplier("SABIC")
            .with_weight_left(Decimal::from(80))
            .with_spec(SpecKind::MeltIndex, Compartment::A, "n/a"),
    )?;

    store.add_allocation(
        AllocationRecord::batch(100, Decimal::from(300))
            .with_allocation_id(11)
            .with_customer("ACME")
            .with_purchase_order("PO-1001"),
    )?;
    store.add_allocation(
        AllocationRecord::item(102, 4, Decimal::from(95))
            .with_allocation_id(12)
            .with_customer("ZETA")
            .with_booking("BK-77", "EXPORT"),
    )?;

    Ok(store)
}
