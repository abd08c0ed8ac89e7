//! 排序參數

use serde::{Deserialize, Serialize};

/// 可排序欄位
///
/// 皆能在輕量投影上取得，因此第一階段的排序與完整視圖一致。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortField {
    PanDate,
    AvailableQty,
    SupplierCode,
    PolymerCode,
    FormCode,
    GradeCode,
    Lot,
    LotName,
    WeightLeft,
    MeltIndex,
    Density,
    IzodImpact,
    InventoryId,
}

impl SortField {
    /// 依欄位名稱解析（與請求層的欄位名一致）
    pub fn from_name(name: &str) -> Option<Self> {
        let field = match name.trim() {
            "panDate" => SortField::PanDate,
            "availableQty" => SortField::AvailableQty,
            "supplierCode" => SortField::SupplierCode,
            "polymerCode" => SortField::PolymerCode,
            "formCode" => SortField::FormCode,
            "gradeCode" => SortField::GradeCode,
            "lot" => SortField::Lot,
            "lotName" => SortField::LotName,
            "weightLeft" => SortField::WeightLeft,
            "meltIndex" => SortField::MeltIndex,
            "density" => SortField::Density,
            "izodImpact" => SortField::IzodImpact,
            "inventoryId" => SortField::InventoryId,
            _ => return None,
        };
        Some(field)
    }
}

/// 排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// 排序規格
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Ascending,
        }
    }

    pub fn desc(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Descending,
        }
    }

    /// 解析排序參數
    ///
    /// 支援 `field,direction` 格式與舊版關鍵字；無法辨識時退回預設（入庫日期新到舊）。
    pub fn parse(param: Option<&str>) -> Self {
        let Some(param) = param.map(str::trim).filter(|p| !p.is_empty()) else {
            return Self::default();
        };

        if let Some((property, direction)) = param.split_once(',') {
            let Some(field) = SortField::from_name(property) else {
                return Self::default();
            };
            return if direction.trim().eq_ignore_ascii_case("desc") {
                Self::desc(field)
            } else {
                Self::asc(field)
            };
        }

        match param {
            "quantity-high" => Self::desc(SortField::AvailableQty),
            "quantity-low" => Self::asc(SortField::AvailableQty),
            "supplier" => Self::asc(SortField::SupplierCode),
            "polymer" => Self::asc(SortField::PolymerCode),
            "lot" => Self::asc(SortField::Lot),
            "recent" => Self::desc(SortField::PanDate),
            _ => Self::default(),
        }
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::desc(SortField::PanDate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, SortSpec::desc(SortField::PanDate))]
    #[case(Some(""), SortSpec::desc(SortField::PanDate))]
    #[case(Some("recent"), SortSpec::desc(SortField::PanDate))]
    #[case(Some("quantity-high"), SortSpec::desc(SortField::AvailableQty))]
    #[case(Some("quantity-low"), SortSpec::asc(SortField::AvailableQty))]
    #[case(Some("supplier"), SortSpec::asc(SortField::SupplierCode))]
    #[case(Some("polymer"), SortSpec::asc(SortField::PolymerCode))]
    #[case(Some("lot"), SortSpec::asc(SortField::Lot))]
    #[case(Some("availableQty,desc"), SortSpec::desc(SortField::AvailableQty))]
    #[case(Some("gradeCode,ASC"), SortSpec::asc(SortField::GradeCode))]
    #[case(Some("meltIndex,"), SortSpec::asc(SortField::MeltIndex))]
    #[case(Some("colour,desc"), SortSpec::desc(SortField::PanDate))]
    #[case(Some("newest"), SortSpec::desc(SortField::PanDate))]
    fn test_parse_sort(#[case] param: Option<&str>, #[case] expected: SortSpec) {
        assert_eq!(SortSpec::parse(param), expected);
    }
}
