//! 搜尋配置

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{SortSpec, SpecKind};

/// 搜尋引擎配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// 預設每頁筆數（頁大小為 0 時使用）
    pub default_page_size: usize,

    /// 每頁筆數上限（匯出用）
    pub max_page_size: usize,

    /// 預設排序
    pub default_sort: SortSpec,

    /// 無資料時的規格範圍預設值
    pub mi_default_range: (Decimal, Decimal),
    pub density_default_range: (Decimal, Decimal),
    pub izod_default_range: (Decimal, Decimal),

    /// 超過此筆數時以 rayon 並行篩選與組裝
    pub parallel_threshold: usize,
}

impl SearchConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self {
            default_page_size: 100,
            max_page_size: 100_000,
            default_sort: SortSpec::default(),
            mi_default_range: (Decimal::ZERO, Decimal::from(100)),
            density_default_range: (Decimal::ZERO, Decimal::from(2)),
            izod_default_range: (Decimal::ZERO, Decimal::from(20)),
            parallel_threshold: 2_000,
        }
    }

    /// 建構器模式：設置預設每頁筆數
    pub fn with_default_page_size(mut self, size: usize) -> Self {
        self.default_page_size = size.max(1);
        self
    }

    /// 建構器模式：設置每頁筆數上限
    pub fn with_max_page_size(mut self, size: usize) -> Self {
        self.max_page_size = size.max(1);
        self
    }

    /// 建構器模式：設置預設排序
    pub fn with_default_sort(mut self, sort: SortSpec) -> Self {
        self.default_sort = sort;
        self
    }

    /// 建構器模式：設置並行門檻
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// 建構器模式：設置某規格的預設範圍
    pub fn with_default_range(mut self, kind: SpecKind, min: Decimal, max: Decimal) -> Self {
        match kind {
            SpecKind::MeltIndex => self.mi_default_range = (min, max),
            SpecKind::Density => self.density_default_range = (min, max),
            SpecKind::Izod => self.izod_default_range = (min, max),
        }
        self
    }

    /// 取得某規格的預設範圍
    pub fn default_range(&self, kind: SpecKind) -> (Decimal, Decimal) {
        match kind {
            SpecKind::MeltIndex => self.mi_default_range,
            SpecKind::Density => self.density_default_range,
            SpecKind::Izod => self.izod_default_range,
        }
    }

    /// 正規化頁大小：0 使用預設值，超過上限則截斷
    pub fn effective_page_size(&self, size: usize) -> usize {
        if size == 0 {
            self.default_page_size.min(self.max_page_size)
        } else {
            size.min(self.max_page_size)
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new()
    }
}
