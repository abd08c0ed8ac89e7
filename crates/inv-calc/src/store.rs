//! 資料來源介面
//!
//! 查詢層只透過此介面讀取庫存與分配記錄。

use inv_core::{AllocationRecord, InventoryError, InventoryItem, Result};
use std::collections::HashSet;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// 庫存資料來源
pub trait InventoryStore: Send + Sync {
    /// 全部庫存項目
    fn scan_items(&self) -> Result<Vec<InventoryItem>>;

    /// 依庫存ID取得項目（不保證順序）
    fn items_by_ids(&self, inventory_ids: &[i64]) -> Result<Vec<InventoryItem>>;

    /// 指定批次下的全部項目
    fn items_in_pans(&self, pan_ids: &[i64]) -> Result<Vec<InventoryItem>>;

    /// 全部分配記錄
    fn scan_allocations(&self) -> Result<Vec<AllocationRecord>>;

    /// 與指定批次或項目相關的分配記錄
    ///
    /// 返回指定批次的整批分配，以及指定項目的單項分配。
    fn allocations_for(
        &self,
        pan_ids: &[i64],
        inventory_ids: &[i64],
    ) -> Result<Vec<AllocationRecord>>;
}

#[derive(Debug, Default)]
struct Tables {
    items: Vec<InventoryItem>,
    allocations: Vec<AllocationRecord>,
}

/// 記憶體資料來源
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以初始資料建立
    pub fn with_data(items: Vec<InventoryItem>, allocations: Vec<AllocationRecord>) -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables { items, allocations })),
        }
    }

    /// 新增或覆蓋庫存項目（依庫存ID）
    pub fn upsert_item(&self, item: InventoryItem) -> Result<()> {
        let mut tables = self.write()?;
        match tables
            .items
            .iter_mut()
            .find(|existing| existing.inventory_id == item.inventory_id)
        {
            Some(existing) => *existing = item,
            None => tables.items.push(item),
        }
        Ok(())
    }

    /// 移除庫存項目，返回是否存在
    pub fn remove_item(&self, inventory_id: i64) -> Result<bool> {
        let mut tables = self.write()?;
        let before = tables.items.len();
        tables.items.retain(|item| item.inventory_id != inventory_id);
        Ok(tables.items.len() != before)
    }

    /// 新增分配記錄
    pub fn add_allocation(&self, allocation: AllocationRecord) -> Result<()> {
        self.write()?.allocations.push(allocation);
        Ok(())
    }

    /// 庫存項目數
    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.items.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.items.is_empty())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|e| InventoryError::Storage(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|e| InventoryError::Storage(e.to_string()))
    }
}

impl InventoryStore for MemoryStore {
    fn scan_items(&self) -> Result<Vec<InventoryItem>> {
        Ok(self.read()?.items.clone())
    }

    fn items_by_ids(&self, inventory_ids: &[i64]) -> Result<Vec<InventoryItem>> {
        let wanted: HashSet<i64> = inventory_ids.iter().copied().collect();
        Ok(self
            .read()?
            .items
            .iter()
            .filter(|item| wanted.contains(&item.inventory_id))
            .cloned()
            .collect())
    }

    fn items_in_pans(&self, pan_ids: &[i64]) -> Result<Vec<InventoryItem>> {
        let wanted: HashSet<i64> = pan_ids.iter().copied().collect();
        Ok(self
            .read()?
            .items
            .iter()
            .filter(|item| wanted.contains(&item.pan_id))
            .cloned()
            .collect())
    }

    fn scan_allocations(&self) -> Result<Vec<AllocationRecord>> {
        Ok(self.read()?.allocations.clone())
    }

    fn allocations_for(
        &self,
        pan_ids: &[i64],
        inventory_ids: &[i64],
    ) -> Result<Vec<AllocationRecord>> {
        let pans: HashSet<i64> = pan_ids.iter().copied().collect();
        let inventories: HashSet<i64> = inventory_ids.iter().copied().collect();
        Ok(self
            .read()?
            .allocations
            .iter()
            .filter(|record| match record.inventory_id {
                None => pans.contains(&record.pan_id),
                Some(id) => inventories.contains(&id),
            })
            .cloned()
            .collect())
    }
}
