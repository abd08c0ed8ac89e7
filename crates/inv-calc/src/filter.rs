//! 動態篩選條件
//!
//! 搜尋條件先轉為明確的條件樹，再由查詢層在輕量投影或完整視圖上求值。
//! 類別之間為 AND，類別內為 OR。

use chrono::NaiveDate;
use inv_core::{InventoryItem, InventoryRow, InventoryView, LooseBound, SearchCriteria, SpecKind};
use rust_decimal::Decimal;
use std::collections::HashSet;

use crate::text::TextQuery;

/// 文字欄位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    PolymerCode,
    FormCode,
    GradeCode,
    SupplierCode,
    Brand,
    FolderCode,
    Lot,
    LotName,
    WarehouseName,
    LocationGroup,
    PurchaseOrder,
    ContainerNum,
}

/// 數值欄位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericField {
    AvailableQty,
    WeightLeft,
    MeltIndex,
    Density,
    IzodImpact,
}

impl From<SpecKind> for NumericField {
    fn from(kind: SpecKind) -> Self {
        match kind {
            SpecKind::MeltIndex => NumericField::MeltIndex,
            SpecKind::Density => NumericField::Density,
            SpecKind::Izod => NumericField::IzodImpact,
        }
    }
}

/// 可被篩選的資料列
///
/// 輕量投影與完整視圖都實作此介面，兩者對同一項目必須給出相同的值。
pub trait FilterTarget {
    fn item(&self) -> &InventoryItem;
    fn lot_name(&self) -> Option<&str>;
    fn available_qty(&self) -> Decimal;
    fn spec(&self, kind: SpecKind) -> Option<Decimal>;

    fn text(&self, field: TextField) -> Option<&str> {
        let item = self.item();
        match field {
            TextField::PolymerCode => item.polymer_code.as_deref(),
            TextField::FormCode => item.form_code.as_deref(),
            TextField::GradeCode => item.grade_code.as_deref(),
            TextField::SupplierCode => item.supplier_code.as_deref(),
            TextField::Brand => item.brand.as_deref(),
            TextField::FolderCode => item.folder_code.as_deref(),
            TextField::Lot => item.lot.as_deref(),
            TextField::LotName => self.lot_name(),
            TextField::WarehouseName => item.warehouse_name.as_deref(),
            TextField::LocationGroup => item.location_group.as_deref(),
            TextField::PurchaseOrder => item.purchase_order.as_deref(),
            TextField::ContainerNum => item.container_num.as_deref(),
        }
    }

    fn number(&self, field: NumericField) -> Option<Decimal> {
        match field {
            NumericField::AvailableQty => Some(self.available_qty()),
            NumericField::WeightLeft => self.item().weight_left,
            NumericField::MeltIndex => self.spec(SpecKind::MeltIndex),
            NumericField::Density => self.spec(SpecKind::Density),
            NumericField::IzodImpact => self.spec(SpecKind::Izod),
        }
    }
}

impl FilterTarget for InventoryRow {
    fn item(&self) -> &InventoryItem {
        &self.item
    }

    fn lot_name(&self) -> Option<&str> {
        self.lot_name.as_deref()
    }

    fn available_qty(&self) -> Decimal {
        self.available_qty
    }

    fn spec(&self, kind: SpecKind) -> Option<Decimal> {
        InventoryRow::spec(self, kind)
    }
}

impl FilterTarget for InventoryView {
    fn item(&self) -> &InventoryItem {
        &self.item
    }

    fn lot_name(&self) -> Option<&str> {
        self.lot_name.as_deref()
    }

    fn available_qty(&self) -> Decimal {
        self.available_qty
    }

    fn spec(&self, kind: SpecKind) -> Option<Decimal> {
        InventoryView::spec(self, kind)
    }
}

/// 條件樹
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// 全部成立（空集合恆真）
    And(Vec<Predicate>),
    /// 任一成立
    Or(Vec<Predicate>),
    /// 自由文字
    Text(TextQuery),
    /// 欄位值屬於集合
    InList {
        field: TextField,
        values: HashSet<String>,
    },
    /// 數值範圍（含邊界），缺值不成立
    Range {
        field: NumericField,
        min: Option<Decimal>,
        max: Option<Decimal>,
    },
    /// 數值大於某值
    GreaterThan { field: NumericField, value: Decimal },
    /// 欄位缺值
    IsNull(NumericField),
    /// 入庫日期區間（含兩端整日）
    PanDate {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
}

impl Predicate {
    /// 不設限的條件
    pub fn all() -> Self {
        Predicate::And(Vec::new())
    }

    /// 是否不設任何限制
    pub fn is_unconstrained(&self) -> bool {
        matches!(self, Predicate::And(clauses) if clauses.iter().all(Predicate::is_unconstrained))
    }

    /// 對資料列求值
    pub fn matches<T: FilterTarget + ?Sized>(&self, target: &T) -> bool {
        match self {
            Predicate::And(clauses) => clauses.iter().all(|c| c.matches(target)),
            Predicate::Or(clauses) => clauses.iter().any(|c| c.matches(target)),
            Predicate::Text(query) => query.matches(target),
            Predicate::InList { field, values } => target
                .text(*field)
                .is_some_and(|value| values.contains(value)),
            Predicate::Range { field, min, max } => match target.number(*field) {
                Some(value) => {
                    min.map_or(true, |lo| value >= lo) && max.map_or(true, |hi| value <= hi)
                }
                None => false,
            },
            Predicate::GreaterThan { field, value } => {
                target.number(*field).is_some_and(|v| v > *value)
            }
            Predicate::IsNull(field) => target.number(*field).is_none(),
            Predicate::PanDate { start, end } => match target.item().pan_date {
                Some(pan_date) => {
                    let day = pan_date.date();
                    start.map_or(true, |s| day >= s) && end.map_or(true, |e| day <= e)
                }
                None => false,
            },
        }
    }
}

/// 條件樹建構器
pub struct PredicateBuilder;

impl PredicateBuilder {
    /// 將搜尋條件轉為條件樹
    pub fn build(criteria: &SearchCriteria) -> Predicate {
        let mut clauses = Vec::new();

        // 1. 自由文字
        if let Some(query) = criteria.text().and_then(TextQuery::new) {
            clauses.push(Predicate::Text(query));
        }

        // 2. 多選條件
        let lists = [
            (TextField::PolymerCode, &criteria.polymer_codes),
            (TextField::FormCode, &criteria.form_codes),
            (TextField::GradeCode, &criteria.grade_codes),
            (TextField::SupplierCode, &criteria.suppliers),
            (TextField::WarehouseName, &criteria.warehouse_names),
            (TextField::LocationGroup, &criteria.location_groups),
            (TextField::LotName, &criteria.lots),
        ];
        for (field, values) in lists {
            if !values.is_empty() {
                clauses.push(Predicate::InList {
                    field,
                    values: values.iter().cloned().collect(),
                });
            }
        }

        // 3. 規格範圍
        for kind in SpecKind::ALL {
            if let Some(clause) = Self::spec_clause(criteria, kind) {
                clauses.push(clause);
            }
        }

        // 4. 數量
        let min_qty = Self::qty_bound("minQty", criteria.min_qty.as_ref());
        let max_qty = Self::qty_bound("maxQty", criteria.max_qty.as_ref());
        if min_qty.is_some() || max_qty.is_some() {
            clauses.push(Predicate::Range {
                field: NumericField::AvailableQty,
                min: min_qty,
                max: max_qty,
            });
        }
        if criteria.only_available == Some(true) {
            clauses.push(Predicate::GreaterThan {
                field: NumericField::AvailableQty,
                value: Decimal::ZERO,
            });
        }

        // 5. 日期
        if criteria.start_date.is_some() || criteria.end_date.is_some() {
            clauses.push(Predicate::PanDate {
                start: criteria.start_date,
                end: criteria.end_date,
            });
        }

        Predicate::And(clauses)
    }

    /// 規格範圍條件
    ///
    /// QC 旗標只看缺值並忽略上下限；否則依上下限建立範圍，
    /// 有設上下限且要求包含缺值時，與缺值條件取 OR。
    fn spec_clause(criteria: &SearchCriteria, kind: SpecKind) -> Option<Predicate> {
        let range = criteria.range(kind);
        let field = NumericField::from(kind);

        if range.qc_only {
            return Some(Predicate::IsNull(field));
        }
        if range.min.is_none() && range.max.is_none() {
            return None;
        }

        let bounded = Predicate::Range {
            field,
            min: range.min,
            max: range.max,
        };
        if range.include_na {
            Some(Predicate::Or(vec![bounded, Predicate::IsNull(field)]))
        } else {
            Some(bounded)
        }
    }

    /// 數量邊界；無法解析時略過該條件
    fn qty_bound(name: &str, bound: Option<&LooseBound>) -> Option<Decimal> {
        let bound = bound?;
        let parsed = bound.parse();
        if parsed.is_none() {
            tracing::warn!("數量條件 {} 無法解析，略過: {:?}", name, bound);
        }
        parsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use inv_core::Compartment;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn row(inventory_id: i64, mi: Option<&str>, qty: i64) -> InventoryRow {
        let item = InventoryItem::new(inventory_id, 1)
            .with_product("PE", "PEL", "HD")
            .with_supplier("SABIC")
            .with_location("Main", "Bay-1")
            .with_lot("PSD", &inventory_id.to_string());
        InventoryRow {
            lot_name: item.lot_name(),
            item,
            available_qty: Decimal::from(qty),
            melt_index: mi.map(dec),
            density: None,
            izod_impact: None,
        }
    }

    #[test]
    fn test_empty_criteria_is_unconstrained() {
        let predicate = PredicateBuilder::build(&SearchCriteria::default());
        assert!(predicate.is_unconstrained());
        assert!(predicate.matches(&row(1, None, 0)));
        assert!(predicate.matches(&row(2, Some("1.0"), -5)));
    }

    #[test]
    fn test_range_with_include_na() {
        let criteria = SearchCriteria::default()
            .with_range(SpecKind::MeltIndex, Some(dec("2.0")), Some(dec("5.0")))
            .with_include_na(SpecKind::MeltIndex);
        let predicate = PredicateBuilder::build(&criteria);

        assert!(predicate.matches(&row(1, Some("2.0"), 10)));
        assert!(predicate.matches(&row(2, Some("5.0"), 10)));
        assert!(predicate.matches(&row(3, None, 10)));
        assert!(!predicate.matches(&row(4, Some("1.0"), 10)));
        assert!(!predicate.matches(&row(5, Some("5.1"), 10)));
    }

    #[test]
    fn test_range_without_include_na_excludes_missing() {
        let criteria = SearchCriteria::default().with_range(SpecKind::MeltIndex, Some(dec("2")), None);
        let predicate = PredicateBuilder::build(&criteria);

        assert!(predicate.matches(&row(1, Some("100"), 10)));
        assert!(!predicate.matches(&row(2, None, 10)));
    }

    #[test]
    fn test_include_na_without_bounds_adds_nothing() {
        let criteria = SearchCriteria::default().with_include_na(SpecKind::MeltIndex);
        assert!(PredicateBuilder::build(&criteria).is_unconstrained());
    }

    #[test]
    fn test_qc_flag_ignores_bounds() {
        let criteria = SearchCriteria::default()
            .with_range(SpecKind::MeltIndex, Some(dec("2")), Some(dec("5")))
            .with_qc_only(SpecKind::MeltIndex);
        let predicate = PredicateBuilder::build(&criteria);

        assert!(predicate.matches(&row(1, None, 10)));
        assert!(!predicate.matches(&row(2, Some("3"), 10)));
    }

    #[test]
    fn test_multi_select_is_or_within_and_across() {
        let criteria = SearchCriteria {
            polymer_codes: vec!["PP".to_string(), "PE".to_string()],
            suppliers: vec!["DOW".to_string()],
            ..Default::default()
        };
        let predicate = PredicateBuilder::build(&criteria);
        assert!(!predicate.matches(&row(1, None, 10)));

        let criteria = SearchCriteria {
            polymer_codes: vec!["PP".to_string(), "PE".to_string()],
            suppliers: vec!["DOW".to_string(), "SABIC".to_string()],
            location_groups: vec!["Bay-1".to_string()],
            ..Default::default()
        };
        assert!(PredicateBuilder::build(&criteria).matches(&row(1, None, 10)));
    }

    #[test]
    fn test_lots_filter_matches_lot_name() {
        let criteria = SearchCriteria {
            lots: vec!["PSD-7".to_string()],
            ..Default::default()
        };
        let predicate = PredicateBuilder::build(&criteria);

        assert!(predicate.matches(&row(7, None, 10)));
        assert!(!predicate.matches(&row(8, None, 10)));
    }

    #[test]
    fn test_missing_field_fails_in_list() {
        let item = InventoryItem::new(1, 1);
        let bare = InventoryRow {
            lot_name: None,
            item,
            available_qty: Decimal::ZERO,
            melt_index: None,
            density: None,
            izod_impact: None,
        };
        let criteria = SearchCriteria {
            grade_codes: vec!["HD".to_string()],
            ..Default::default()
        };
        assert!(!PredicateBuilder::build(&criteria).matches(&bare));
    }

    #[test]
    fn test_quantity_bounds_and_lenient_parsing() {
        let criteria = SearchCriteria::default()
            .with_qty_bounds(Some(LooseBound::from("not-a-number")), Some(Decimal::from(100).into()));
        let predicate = PredicateBuilder::build(&criteria);

        // 下限無法解析被略過，只剩上限
        assert!(predicate.matches(&row(1, None, -50)));
        assert!(predicate.matches(&row(2, None, 100)));
        assert!(!predicate.matches(&row(3, None, 101)));
    }

    #[test]
    fn test_only_available() {
        let criteria = SearchCriteria {
            only_available: Some(true),
            ..Default::default()
        };
        let predicate = PredicateBuilder::build(&criteria);

        assert!(predicate.matches(&row(1, None, 1)));
        assert!(!predicate.matches(&row(2, None, 0)));
        assert!(!predicate.matches(&row(3, None, -4)));
    }

    #[test]
    fn test_date_bounds_are_inclusive_days() {
        let criteria = SearchCriteria::default().with_date_range(
            NaiveDate::from_ymd_opt(2025, 3, 1),
            NaiveDate::from_ymd_opt(2025, 3, 31),
        );
        let predicate = PredicateBuilder::build(&criteria);

        let at = |s: &str| {
            let mut r = row(1, None, 10);
            r.item.pan_date = Some(NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap());
            r
        };

        assert!(predicate.matches(&at("2025-03-01 00:00:00")));
        assert!(predicate.matches(&at("2025-03-31 23:59:59")));
        assert!(!predicate.matches(&at("2025-02-28 23:59:59")));
        assert!(!predicate.matches(&at("2025-04-01 00:00:00")));

        let mut undated = row(2, None, 10);
        undated.item.pan_date = None;
        assert!(!predicate.matches(&undated));
    }

    #[test]
    fn test_text_clause_on_view_and_row_agree() {
        let item = InventoryItem::new(1, 1)
            .with_product("PE", "PEL", "HD")
            .with_compartment("A")
            .with_spec(SpecKind::MeltIndex, Compartment::A, "3");
        let view = crate::ViewBuilder::build_view(item.clone(), Decimal::ZERO, &[]).0;
        let row = crate::ViewBuilder::build_row(item, &crate::AllocationLedger::default()).0;

        let criteria = SearchCriteria::default()
            .with_search_text("pepel")
            .with_range(SpecKind::MeltIndex, Some(dec("2")), Some(dec("5")));
        let predicate = PredicateBuilder::build(&criteria);

        assert!(predicate.matches(&view));
        assert!(predicate.matches(&row));
    }
}
