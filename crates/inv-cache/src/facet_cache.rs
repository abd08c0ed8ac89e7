//! 篩選面板資料緩存
//!
//! 全表彙總成本高，結果緩存到明確失效或來源資料表被標記為髒為止。

use chrono::{DateTime, NaiveDate, Utc};
use inv_calc::{FilterFacets, InventorySearch, InventoryStore};
use inv_core::{InventoryError, Result};
use std::sync::{Mutex, MutexGuard};

use crate::dirty_tracking::{DirtyTracker, SourceTable};

/// 緩存快照
#[derive(Debug, Clone)]
pub struct CachedFacets {
    pub facets: FilterFacets,
    pub refreshed_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct CacheState {
    snapshot: Option<CachedFacets>,
    tracker: DirtyTracker,
}

/// 篩選面板資料緩存
#[derive(Debug, Default)]
pub struct FacetCache {
    state: Mutex<CacheState>,
}

impl FacetCache {
    /// 創建空的緩存
    pub fn new() -> Self {
        Self::default()
    }

    /// 取得面板資料，緩存失效時重新彙總
    pub fn get_or_refresh<S: InventoryStore>(
        &self,
        search: &InventorySearch<S>,
        today: NaiveDate,
    ) -> Result<FilterFacets> {
        let mut state = self.lock()?;

        if state.tracker.is_clean() {
            if let Some(cached) = &state.snapshot {
                tracing::debug!("使用面板緩存（{}）", cached.refreshed_at);
                return Ok(cached.facets.clone());
            }
        }

        tracing::info!(
            "重新彙總面板資料，異動資料表: {:?}",
            state.tracker.dirty_tables()
        );
        let facets = search.facets(today)?;
        state.snapshot = Some(CachedFacets {
            facets: facets.clone(),
            refreshed_at: Utc::now(),
        });
        state.tracker.clear();
        Ok(facets)
    }

    /// 清除緩存
    pub fn invalidate(&self) -> Result<()> {
        self.lock()?.snapshot = None;
        tracing::debug!("面板緩存已清除");
        Ok(())
    }

    /// 標記來源資料表已異動
    pub fn mark_dirty(&self, table: SourceTable) -> Result<()> {
        self.lock()?.tracker.mark_dirty(table);
        Ok(())
    }

    /// 上次彙總後異動的資料表
    pub fn dirty_tables(&self) -> Result<Vec<SourceTable>> {
        Ok(self.lock()?.tracker.dirty_tables())
    }

    /// 快照時間（無快照返回 `None`）
    pub fn refreshed_at(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(self.lock()?.snapshot.as_ref().map(|c| c.refreshed_at))
    }

    fn lock(&self) -> Result<MutexGuard<'_, CacheState>> {
        self.state
            .lock()
            .map_err(|e| InventoryError::Other(format!("面板緩存鎖失效: {e}")))
    }
}
