//! 排序比較
//!
//! 缺值在升冪時排最前、降冪時排最後；同值以庫存ID升冪決勝，保證分頁穩定。

use inv_core::{SortDirection, SortField, SortSpec, SpecKind};
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::str::FromStr;

use crate::filter::{FilterTarget, TextField};

/// 依排序規格比較兩列
pub fn compare<T: FilterTarget + ?Sized>(a: &T, b: &T, sort: SortSpec) -> Ordering {
    let primary = compare_field(a, b, sort.field);
    let primary = match sort.direction {
        SortDirection::Ascending => primary,
        SortDirection::Descending => primary.reverse(),
    };
    primary.then_with(|| a.item().inventory_id.cmp(&b.item().inventory_id))
}

/// 依排序規格就地排序
pub fn sort_rows<T: FilterTarget + Send>(rows: &mut [T], sort: SortSpec, parallel: bool) {
    if parallel {
        use rayon::prelude::*;
        rows.par_sort_by(|a, b| compare(a, b, sort));
    } else {
        rows.sort_by(|a, b| compare(a, b, sort));
    }
}

fn compare_field<T: FilterTarget + ?Sized>(a: &T, b: &T, field: SortField) -> Ordering {
    match field {
        SortField::PanDate => a.item().pan_date.cmp(&b.item().pan_date),
        SortField::AvailableQty => a.available_qty().cmp(&b.available_qty()),
        SortField::WeightLeft => a.item().weight_left.cmp(&b.item().weight_left),
        SortField::MeltIndex => a.spec(SpecKind::MeltIndex).cmp(&b.spec(SpecKind::MeltIndex)),
        SortField::Density => a.spec(SpecKind::Density).cmp(&b.spec(SpecKind::Density)),
        SortField::IzodImpact => a.spec(SpecKind::Izod).cmp(&b.spec(SpecKind::Izod)),
        SortField::InventoryId => a.item().inventory_id.cmp(&b.item().inventory_id),
        SortField::SupplierCode => text(a, b, TextField::SupplierCode),
        SortField::PolymerCode => text(a, b, TextField::PolymerCode),
        SortField::FormCode => text(a, b, TextField::FormCode),
        SortField::GradeCode => text(a, b, TextField::GradeCode),
        SortField::LotName => text(a, b, TextField::LotName),
        SortField::Lot => lot(a.text(TextField::Lot), b.text(TextField::Lot)),
    }
}

// Option 的自然順序即 None 在前
fn text<T: FilterTarget + ?Sized>(a: &T, b: &T, field: TextField) -> Ordering {
    a.text(field).cmp(&b.text(field))
}

/// 批號排序：數字批號在前並依數值比較，其餘依字串比較
fn lot(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => lot_key(x).cmp(&lot_key(y)),
        _ => a.cmp(&b),
    }
}

/// (非數字, 數值, 原字串)
fn lot_key(raw: &str) -> (bool, Option<Decimal>, &str) {
    let value = Decimal::from_str(raw.trim()).ok();
    (value.is_none(), value, raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use inv_core::{InventoryItem, InventoryRow};
    use rstest::rstest;

    fn row(inventory_id: i64, qty: i64) -> InventoryRow {
        let item = InventoryItem::new(inventory_id, 1);
        InventoryRow {
            lot_name: None,
            item,
            available_qty: Decimal::from(qty),
            melt_index: None,
            density: None,
            izod_impact: None,
        }
    }

    fn ids(rows: &[InventoryRow]) -> Vec<i64> {
        rows.iter().map(|r| r.item.inventory_id).collect()
    }

    #[rstest]
    #[case(false)]
    #[case(true)]
    fn test_ties_break_on_inventory_id(#[case] parallel: bool) {
        let mut rows = vec![row(3, 10), row(1, 10), row(2, 20), row(4, 10)];
        sort_rows(&mut rows, SortSpec::desc(SortField::AvailableQty), parallel);
        assert_eq!(ids(&rows), vec![2, 1, 3, 4]);
    }

    #[test]
    fn test_missing_values_first_ascending_last_descending() {
        let with_date = |id: i64, day: Option<u32>| {
            let mut r = row(id, 0);
            r.item.pan_date = day
                .and_then(|d| NaiveDate::from_ymd_opt(2025, 1, d))
                .and_then(|d| d.and_hms_opt(8, 0, 0));
            r
        };
        let rows = vec![with_date(1, Some(5)), with_date(2, None), with_date(3, Some(9))];

        let mut asc = rows.clone();
        sort_rows(&mut asc, SortSpec::asc(SortField::PanDate), false);
        assert_eq!(ids(&asc), vec![2, 1, 3]);

        let mut desc = rows;
        sort_rows(&mut desc, SortSpec::desc(SortField::PanDate), false);
        assert_eq!(ids(&desc), vec![3, 1, 2]);
    }

    #[rstest]
    #[case(Some("9"), Some("10"), Ordering::Less)]
    #[case(Some("100"), Some("20"), Ordering::Greater)]
    #[case(Some("A10"), Some("A9"), Ordering::Less)]
    #[case(None, Some("1"), Ordering::Less)]
    #[case(Some("7"), Some("7"), Ordering::Equal)]
    #[case(Some("10"), Some("1A"), Ordering::Less)]
    #[case(Some("1A"), Some("9"), Ordering::Greater)]
    fn test_lot_ordering(#[case] a: Option<&str>, #[case] b: Option<&str>, #[case] expected: Ordering) {
        assert_eq!(lot(a, b), expected);
    }

    #[rstest]
    #[case(false)]
    #[case(true)]
    fn test_mixed_lots_sort_into_consistent_order(#[case] parallel: bool) {
        let lots = [
            "9", "1A", "10", "A9", "007", "7", "A10", "2.5", "1A", "x", "100", "B", "10",
        ];
        let mut rows: Vec<InventoryRow> = lots
            .iter()
            .enumerate()
            .map(|(i, l)| {
                let mut r = row(i as i64 + 1, 0);
                r.item.lot = Some(l.to_string());
                r
            })
            .collect();
        rows.push(row(99, 0));

        let sort = SortSpec::asc(SortField::Lot);
        sort_rows(&mut rows, sort, parallel);

        for (i, earlier) in rows.iter().enumerate() {
            for later in &rows[i + 1..] {
                assert_ne!(
                    compare(earlier, later, sort),
                    Ordering::Greater,
                    "{:?} 排在 {:?} 之前",
                    earlier.item.lot,
                    later.item.lot
                );
            }
        }
        let sorted: Vec<Option<&str>> = rows.iter().map(|r| r.item.lot.as_deref()).collect();
        assert_eq!(&sorted[..4], &[None, Some("2.5"), Some("007"), Some("7")]);
        assert_eq!(sorted.last(), Some(&Some("x")));
    }

    #[test]
    fn test_sort_by_spec_value() {
        let mut rows = vec![row(1, 0), row(2, 0), row(3, 0)];
        rows[0].melt_index = Some(Decimal::from(5));
        rows[2].melt_index = Some(Decimal::from(2));

        sort_rows(&mut rows, SortSpec::desc(SortField::MeltIndex), false);
        assert_eq!(ids(&rows), vec![1, 3, 2]);
    }
}
