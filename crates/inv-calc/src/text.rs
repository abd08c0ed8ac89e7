//! 自由文字比對

use crate::filter::{FilterTarget, TextField};

/// 組合代碼時嘗試的分隔符號
const JOINERS: [&str; 3] = ["", "-", " "];

/// 兩欄組合比對的欄位對
///
/// 使用者常輸入跨欄位的組合代碼（如 "PEPEL"、"PSD-2250281"）。
const COMPOSITES: [(TextField, TextField); 5] = [
    (TextField::PolymerCode, TextField::FormCode),
    (TextField::FolderCode, TextField::LotName),
    (TextField::FolderCode, TextField::Lot),
    (TextField::PolymerCode, TextField::LotName),
    (TextField::PolymerCode, TextField::GradeCode),
];

/// 單欄比對的欄位
const SINGLES: [TextField; 7] = [
    TextField::PolymerCode,
    TextField::GradeCode,
    TextField::Brand,
    TextField::SupplierCode,
    TextField::LotName,
    TextField::PurchaseOrder,
    TextField::ContainerNum,
];

/// 正規化：移除 `-`、`/`、`.`、空白並轉小寫
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '-' | '/' | '.' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

/// 已正規化的搜尋文字
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextQuery {
    normalized: String,
}

impl TextQuery {
    /// 創建搜尋文字；正規化後為空則返回 `None`
    pub fn new(raw: &str) -> Option<Self> {
        let normalized = normalize(raw);
        if normalized.is_empty() {
            None
        } else {
            Some(Self { normalized })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    /// 檢查是否命中任一單欄或組合欄位
    pub fn matches<T: FilterTarget + ?Sized>(&self, target: &T) -> bool {
        let hit = |candidate: &str| normalize(candidate).contains(&self.normalized);

        if SINGLES
            .iter()
            .filter_map(|field| target.text(*field))
            .any(hit)
        {
            return true;
        }

        COMPOSITES.iter().any(|(left, right)| {
            match (target.text(*left), target.text(*right)) {
                (Some(l), Some(r)) => JOINERS
                    .iter()
                    .any(|joiner| hit(&format!("{l}{joiner}{r}"))),
                _ => false,
            }
        })
    }
}
