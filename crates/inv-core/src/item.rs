//! 庫存項目模型

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 儲位隔間
///
/// 決定該項目採用哪一組實驗室規格。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Compartment {
    A,
    B,
    CA,
    CB,
}

impl Compartment {
    /// 解析隔間字串（區分大小寫）
    ///
    /// 空字串、`None` 或無法辨識的值一律視為 `A`。
    pub fn resolve(raw: Option<&str>) -> Self {
        match raw {
            Some("B") => Compartment::B,
            Some("CA") => Compartment::CA,
            Some("CB") => Compartment::CB,
            _ => Compartment::A,
        }
    }
}

/// 規格種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecKind {
    /// 熔融指數（MI）
    MeltIndex,
    /// 密度
    Density,
    /// 懸臂樑衝擊強度（Izod）
    Izod,
}

impl SpecKind {
    pub const ALL: [SpecKind; 3] = [SpecKind::MeltIndex, SpecKind::Density, SpecKind::Izod];

    pub fn as_str(&self) -> &'static str {
        match self {
            SpecKind::MeltIndex => "meltIndex",
            SpecKind::Density => "density",
            SpecKind::Izod => "izod",
        }
    }
}

impl fmt::Display for SpecKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 單一規格在各隔間的原始讀值（文字，可能為空白）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecReadings {
    pub a: Option<String>,
    pub b: Option<String>,
    pub ca: Option<String>,
    pub cb: Option<String>,
}

impl SpecReadings {
    /// 取得指定隔間的原始讀值
    pub fn for_compartment(&self, compartment: Compartment) -> Option<&str> {
        match compartment {
            Compartment::A => self.a.as_deref(),
            Compartment::B => self.b.as_deref(),
            Compartment::CA => self.ca.as_deref(),
            Compartment::CB => self.cb.as_deref(),
        }
    }

    fn slot_mut(&mut self, compartment: Compartment) -> &mut Option<String> {
        match compartment {
            Compartment::A => &mut self.a,
            Compartment::B => &mut self.b,
            Compartment::CA => &mut self.ca,
            Compartment::CB => &mut self.cb,
        }
    }
}

/// 庫存項目（倉儲系統的原始記錄）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    /// 庫存ID（唯一）
    pub inventory_id: i64,

    /// 批次（Pan）ID
    pub pan_id: i64,

    /// 入庫日期
    pub pan_date: Option<NaiveDateTime>,

    /// 批號
    pub lot: Option<String>,

    pub polymer_code: Option<String>,
    pub form_code: Option<String>,
    pub grade_code: Option<String>,
    pub supplier_code: Option<String>,
    pub brand: Option<String>,
    pub descriptor: Option<String>,

    /// 資料夾代碼（與批號組成批名）
    pub folder_code: Option<String>,

    pub container_num: Option<String>,
    pub purchase_order: Option<String>,

    /// 倉庫
    pub warehouse_name: Option<String>,
    pub location_group: Option<String>,

    /// 隔間原始字串（""、"A"、"B"、"CA"、"CB"）
    pub compartment: Option<String>,

    /// 現有重量
    pub weight_left: Option<Decimal>,

    pub packing: Option<String>,
    pub comment: Option<String>,

    #[serde(rename = "meltIndexReadings")]
    pub melt_index: SpecReadings,
    #[serde(rename = "densityReadings")]
    pub density: SpecReadings,
    #[serde(rename = "izodReadings")]
    pub izod: SpecReadings,
}

impl InventoryItem {
    /// 創建新的庫存項目
    pub fn new(inventory_id: i64, pan_id: i64) -> Self {
        Self {
            inventory_id,
            pan_id,
            ..Default::default()
        }
    }

    /// 建構器模式：設置入庫日期
    pub fn with_pan_date(mut self, pan_date: NaiveDateTime) -> Self {
        self.pan_date = Some(pan_date);
        self
    }

    /// 建構器模式：設置產品代碼
    pub fn with_product(mut self, polymer_code: &str, form_code: &str, grade_code: &str) -> Self {
        self.polymer_code = Some(polymer_code.to_string());
        self.form_code = Some(form_code.to_string());
        self.grade_code = Some(grade_code.to_string());
        self
    }

    /// 建構器模式：設置資料夾與批號
    pub fn with_lot(mut self, folder_code: &str, lot: &str) -> Self {
        self.folder_code = Some(folder_code.to_string());
        self.lot = Some(lot.to_string());
        self
    }

    /// 建構器模式：設置供應商
    pub fn with_supplier(mut self, supplier_code: &str) -> Self {
        self.supplier_code = Some(supplier_code.to_string());
        self
    }

    /// 建構器模式：設置品牌
    pub fn with_brand(mut self, brand: &str) -> Self {
        self.brand = Some(brand.to_string());
        self
    }

    /// 建構器模式：設置倉庫位置
    pub fn with_location(mut self, warehouse_name: &str, location_group: &str) -> Self {
        self.warehouse_name = Some(warehouse_name.to_string());
        self.location_group = Some(location_group.to_string());
        self
    }

    /// 建構器模式：設置隔間
    pub fn with_compartment(mut self, compartment: &str) -> Self {
        self.compartment = Some(compartment.to_string());
        self
    }

    /// 建構器模式：設置現有重量
    pub fn with_weight_left(mut self, weight_left: Decimal) -> Self {
        self.weight_left = Some(weight_left);
        self
    }

    /// 建構器模式：設置採購單與貨櫃號
    pub fn with_shipment(mut self, purchase_order: &str, container_num: &str) -> Self {
        self.purchase_order = Some(purchase_order.to_string());
        self.container_num = Some(container_num.to_string());
        self
    }

    /// 建構器模式：設置某隔間的規格讀值
    pub fn with_spec(mut self, kind: SpecKind, compartment: Compartment, raw: &str) -> Self {
        *self.readings_mut(kind).slot_mut(compartment) = Some(raw.to_string());
        self
    }

    /// 取得某規格的各隔間讀值
    pub fn readings(&self, kind: SpecKind) -> &SpecReadings {
        match kind {
            SpecKind::MeltIndex => &self.melt_index,
            SpecKind::Density => &self.density,
            SpecKind::Izod => &self.izod,
        }
    }

    fn readings_mut(&mut self, kind: SpecKind) -> &mut SpecReadings {
        match kind {
            SpecKind::MeltIndex => &mut self.melt_index,
            SpecKind::Density => &mut self.density,
            SpecKind::Izod => &mut self.izod,
        }
    }

    /// 解析後的隔間
    pub fn resolved_compartment(&self) -> Compartment {
        Compartment::resolve(self.compartment.as_deref())
    }

    /// 批名：資料夾代碼 + "-" + 批號，任一缺值時為 `None`
    pub fn lot_name(&self) -> Option<String> {
        match (&self.folder_code, &self.lot) {
            (Some(folder), Some(lot)) => Some(format!("{folder}-{lot}")),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, Compartment::A)]
    #[case(Some(""), Compartment::A)]
    #[case(Some("A"), Compartment::A)]
    #[case(Some("B"), Compartment::B)]
    #[case(Some("CA"), Compartment::CA)]
    #[case(Some("CB"), Compartment::CB)]
    #[case(Some("b"), Compartment::A)]
    #[case(Some("C"), Compartment::A)]
    fn test_resolve_compartment(#[case] raw: Option<&str>, #[case] expected: Compartment) {
        assert_eq!(Compartment::resolve(raw), expected);
    }

    #[test]
    fn test_lot_name() {
        let item = InventoryItem::new(1, 10).with_lot("PSD", "2250281");
        assert_eq!(item.lot_name(), Some("PSD-2250281".to_string()));

        let bare = InventoryItem::new(2, 10);
        assert_eq!(bare.lot_name(), None);
    }

    #[rstest]
    #[case(Some("PSD"), None)]
    #[case(None, Some("7"))]
    fn test_lot_name_needs_both_parts(#[case] folder: Option<&str>, #[case] lot: Option<&str>) {
        let item = InventoryItem {
            folder_code: folder.map(str::to_string),
            lot: lot.map(str::to_string),
            ..InventoryItem::new(3, 10)
        };
        assert_eq!(item.lot_name(), None);
    }

    #[test]
    fn test_spec_builder_writes_single_slot() {
        let item = InventoryItem::new(1, 10)
            .with_spec(SpecKind::Density, Compartment::CB, "0.952");

        assert_eq!(item.density.cb.as_deref(), Some("0.952"));
        assert_eq!(item.density.a, None);
        assert_eq!(item.melt_index, SpecReadings::default());
    }
}
