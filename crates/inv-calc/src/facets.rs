//! 篩選面板資料
//!
//! 對全表計算各類別的不重複值與規格、日期範圍。

use chrono::NaiveDate;
use inv_core::{SearchConfig, SpecKind};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::filter::{FilterTarget, TextField};

/// 類別名稱與來源欄位
const CATEGORIES: [(&str, TextField); 7] = [
    ("suppliers", TextField::SupplierCode),
    ("grades", TextField::GradeCode),
    ("forms", TextField::FormCode),
    ("polymers", TextField::PolymerCode),
    ("warehouses", TextField::WarehouseName),
    ("locations", TextField::LocationGroup),
    ("lots", TextField::LotName),
];

/// 規格與日期範圍（閉區間）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecRanges {
    pub mi_range: (Decimal, Decimal),
    pub density_range: (Decimal, Decimal),
    pub izod_range: (Decimal, Decimal),
    pub date_range: (NaiveDate, NaiveDate),
}

impl SpecRanges {
    pub fn for_kind(&self, kind: SpecKind) -> (Decimal, Decimal) {
        match kind {
            SpecKind::MeltIndex => self.mi_range,
            SpecKind::Density => self.density_range,
            SpecKind::Izod => self.izod_range,
        }
    }
}

/// 篩選面板資料
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterFacets {
    /// 類別 → 排序後的不重複值
    pub categories: BTreeMap<String, Vec<String>>,
    #[serde(flatten)]
    pub ranges: SpecRanges,
}

impl FilterFacets {
    /// 取得某類別的值（未知類別返回空）
    pub fn values(&self, category: &str) -> &[String] {
        self.categories
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// 面板資料彙總器
pub struct FacetAggregator;

impl FacetAggregator {
    /// 彙總全表
    ///
    /// # 參數
    /// * `today` - 無任何入庫日期時日期範圍的預設值
    pub fn aggregate<T: FilterTarget>(
        rows: &[T],
        config: &SearchConfig,
        today: NaiveDate,
    ) -> FilterFacets {
        let mut distinct: Vec<BTreeSet<&str>> = vec![BTreeSet::new(); CATEGORIES.len()];
        let mut spec_bounds = [MinMax::default(); 3];
        let mut dates: MinMax<NaiveDate> = MinMax::default();

        for row in rows {
            for (slot, (_, field)) in distinct.iter_mut().zip(CATEGORIES) {
                if let Some(value) = row.text(field).filter(|v| !v.trim().is_empty()) {
                    slot.insert(value);
                }
            }
            for (bounds, kind) in spec_bounds.iter_mut().zip(SpecKind::ALL) {
                if let Some(value) = row.spec(kind) {
                    bounds.push(value);
                }
            }
            if let Some(pan_date) = row.item().pan_date {
                dates.push(pan_date.date());
            }
        }

        let categories = CATEGORIES
            .iter()
            .zip(distinct)
            .map(|((name, _), values)| {
                (
                    name.to_string(),
                    values.into_iter().map(str::to_string).collect(),
                )
            })
            .collect();

        let [mi, density, izod] = spec_bounds;
        let ranges = SpecRanges {
            mi_range: mi.or(config.default_range(SpecKind::MeltIndex)),
            density_range: density.or(config.default_range(SpecKind::Density)),
            izod_range: izod.or(config.default_range(SpecKind::Izod)),
            date_range: dates.or((today, today)),
        };

        tracing::debug!("面板資料彙總完成: {} 列", rows.len());

        FilterFacets { categories, ranges }
    }
}

#[derive(Debug, Clone, Copy)]
struct MinMax<T> {
    min: Option<T>,
    max: Option<T>,
}

impl<T> Default for MinMax<T> {
    fn default() -> Self {
        Self { min: None, max: None }
    }
}

impl<T: Copy + Ord> MinMax<T> {
    fn push(&mut self, value: T) {
        self.min = Some(self.min.map_or(value, |m| m.min(value)));
        self.max = Some(self.max.map_or(value, |m| m.max(value)));
    }

    /// 缺少的一端以預設值補上
    fn or(self, default: (T, T)) -> (T, T) {
        (self.min.unwrap_or(default.0), self.max.unwrap_or(default.1))
    }
}
