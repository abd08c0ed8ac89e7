//! 搜尋條件模型

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::{InventoryError, SpecKind};

/// 寬鬆型別的數值邊界
///
/// 請求層可能傳入數字或任意字串，無法解析時由呼叫端略過該條件。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LooseBound {
    Number(Decimal),
    Text(String),
}

impl LooseBound {
    /// 嘗試轉為數值，失敗返回 `None`
    pub fn parse(&self) -> Option<Decimal> {
        match self {
            LooseBound::Number(value) => Some(*value),
            LooseBound::Text(text) => {
                let trimmed = text.trim();
                Decimal::from_str(trimmed)
                    .or_else(|_| Decimal::from_scientific(trimmed))
                    .ok()
            }
        }
    }
}

impl From<Decimal> for LooseBound {
    fn from(value: Decimal) -> Self {
        LooseBound::Number(value)
    }
}

impl From<&str> for LooseBound {
    fn from(text: &str) -> Self {
        LooseBound::Text(text.to_string())
    }
}

/// 單一規格的範圍條件
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RangeCriteria {
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
    /// 只要缺少該規格的項目
    pub qc_only: bool,
    /// 範圍之外，也包含缺少該規格的項目
    pub include_na: bool,
}

/// 搜尋條件
///
/// 所有欄位皆為選填，缺少的條件不排除任何資料。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchCriteria {
    /// 自由文字（比對代碼、等級、品牌、批名等）
    pub search_text: Option<String>,

    // 多選條件
    pub polymer_codes: Vec<String>,
    pub form_codes: Vec<String>,
    pub grade_codes: Vec<String>,
    pub suppliers: Vec<String>,
    pub warehouse_names: Vec<String>,
    pub location_groups: Vec<String>,
    pub lots: Vec<String>,

    // 範圍條件
    pub min_mi: Option<Decimal>,
    pub max_mi: Option<Decimal>,
    pub min_density: Option<Decimal>,
    pub max_density: Option<Decimal>,
    pub min_izod: Option<Decimal>,
    pub max_izod: Option<Decimal>,

    pub qc_mi: Option<bool>,
    pub qc_density: Option<bool>,
    pub qc_izod: Option<bool>,

    #[serde(rename = "includeNAMI")]
    pub include_na_mi: Option<bool>,
    #[serde(rename = "includeNADensity")]
    pub include_na_density: Option<bool>,
    #[serde(rename = "includeNAIzod")]
    pub include_na_izod: Option<bool>,

    // 數量條件
    pub min_qty: Option<LooseBound>,
    pub max_qty: Option<LooseBound>,
    /// 舊版參數：只要可用量大於 0
    pub only_available: Option<bool>,

    // 日期條件（含邊界）
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl SearchCriteria {
    /// 從請求層的 JSON 解析
    pub fn from_json(json: &str) -> crate::Result<Self> {
        serde_json::from_str(json).map_err(|e| InventoryError::InvalidCriteria(e.to_string()))
    }

    /// 建構器模式：設置自由文字
    pub fn with_search_text(mut self, text: &str) -> Self {
        self.search_text = Some(text.to_string());
        self
    }

    /// 建構器模式：設置規格範圍
    pub fn with_range(mut self, kind: SpecKind, min: Option<Decimal>, max: Option<Decimal>) -> Self {
        let (lo, hi) = match kind {
            SpecKind::MeltIndex => (&mut self.min_mi, &mut self.max_mi),
            SpecKind::Density => (&mut self.min_density, &mut self.max_density),
            SpecKind::Izod => (&mut self.min_izod, &mut self.max_izod),
        };
        *lo = min;
        *hi = max;
        self
    }

    /// 建構器模式：範圍之外也包含缺值
    pub fn with_include_na(mut self, kind: SpecKind) -> Self {
        match kind {
            SpecKind::MeltIndex => self.include_na_mi = Some(true),
            SpecKind::Density => self.include_na_density = Some(true),
            SpecKind::Izod => self.include_na_izod = Some(true),
        }
        self
    }

    /// 建構器模式：只看缺少該規格的項目
    pub fn with_qc_only(mut self, kind: SpecKind) -> Self {
        match kind {
            SpecKind::MeltIndex => self.qc_mi = Some(true),
            SpecKind::Density => self.qc_density = Some(true),
            SpecKind::Izod => self.qc_izod = Some(true),
        }
        self
    }

    /// 建構器模式：設置數量邊界
    pub fn with_qty_bounds(mut self, min: Option<LooseBound>, max: Option<LooseBound>) -> Self {
        self.min_qty = min;
        self.max_qty = max;
        self
    }

    /// 建構器模式：設置日期區間
    pub fn with_date_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    /// 取得某規格的範圍條件
    pub fn range(&self, kind: SpecKind) -> RangeCriteria {
        let (min, max, qc, include_na) = match kind {
            SpecKind::MeltIndex => (self.min_mi, self.max_mi, self.qc_mi, self.include_na_mi),
            SpecKind::Density => (
                self.min_density,
                self.max_density,
                self.qc_density,
                self.include_na_density,
            ),
            SpecKind::Izod => (self.min_izod, self.max_izod, self.qc_izod, self.include_na_izod),
        };
        RangeCriteria {
            min,
            max,
            qc_only: qc.unwrap_or(false),
            include_na: include_na.unwrap_or(false),
        }
    }

    /// 有效的自由文字（去除空白後非空）
    pub fn text(&self) -> Option<&str> {
        self.search_text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}
