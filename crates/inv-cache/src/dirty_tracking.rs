//! 髒標記追蹤

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 面板資料的來源資料表
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SourceTable {
    /// 庫存項目
    Inventory,
    /// 分配記錄
    Allocation,
}

/// 髒標記追蹤器
#[derive(Debug, Default)]
pub struct DirtyTracker {
    dirty_tables: BTreeSet<SourceTable>,
}

impl DirtyTracker {
    /// 創建新的追蹤器
    pub fn new() -> Self {
        Self::default()
    }

    /// 標記資料表為髒
    pub fn mark_dirty(&mut self, table: SourceTable) {
        self.dirty_tables.insert(table);
    }

    /// 檢查資料表是否為髒
    pub fn is_dirty(&self, table: SourceTable) -> bool {
        self.dirty_tables.contains(&table)
    }

    /// 是否沒有任何待處理的異動
    pub fn is_clean(&self) -> bool {
        self.dirty_tables.is_empty()
    }

    /// 清除所有髒標記
    pub fn clear(&mut self) {
        self.dirty_tables.clear();
    }

    /// 獲取所有髒資料表（依固定順序）
    pub fn dirty_tables(&self) -> Vec<SourceTable> {
        self.dirty_tables.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&[], &[])]
    #[case(&[SourceTable::Allocation], &[SourceTable::Allocation])]
    #[case(
        &[SourceTable::Allocation, SourceTable::Inventory, SourceTable::Allocation],
        &[SourceTable::Inventory, SourceTable::Allocation]
    )]
    fn test_dirty_tables(#[case] marked: &[SourceTable], #[case] expected: &[SourceTable]) {
        let mut tracker = DirtyTracker::new();
        for table in marked {
            tracker.mark_dirty(*table);
        }
        assert_eq!(tracker.dirty_tables(), expected);
        assert_eq!(tracker.is_clean(), expected.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut tracker = DirtyTracker::new();
        tracker.mark_dirty(SourceTable::Inventory);
        assert!(tracker.is_dirty(SourceTable::Inventory));
        assert!(!tracker.is_dirty(SourceTable::Allocation));

        tracker.clear();
        assert!(tracker.is_clean());
    }
}
