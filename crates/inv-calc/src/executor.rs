//! 兩階段查詢
//!
//! 第一階段在輕量投影上篩選、排序並計數，只取得當頁的庫存ID；
//! 第二階段僅為當頁ID組裝完整視圖，依第一階段順序輸出。

use chrono::NaiveDate;
use inv_core::{
    InventoryError, InventoryItem, InventoryRow, InventoryView, SearchConfig, SearchCriteria,
    SortSpec,
};
use rayon::prelude::*;
use rust_decimal::Decimal;
use std::collections::{BTreeSet, HashMap};

use crate::allocation::{AllocationLedger, AllocationResolver};
use crate::facets::{FacetAggregator, FilterFacets};
use crate::filter::{Predicate, PredicateBuilder};
use crate::store::InventoryStore;
use crate::view::ViewBuilder;
use crate::{DataQualityWarning, SearchPage};

/// 單筆查詢的識別資料
///
/// 批次ID必填；產品代碼與批名用於同批次多項目時的辨識。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemLookup {
    pub pan_id: i64,
    pub polymer_code: Option<String>,
    pub form_code: Option<String>,
    pub folder_code: Option<String>,
    pub lot_name: Option<String>,
}

impl ItemLookup {
    pub fn new(pan_id: i64) -> Self {
        Self {
            pan_id,
            ..Default::default()
        }
    }

    pub fn with_product(mut self, polymer_code: &str, form_code: &str) -> Self {
        self.polymer_code = Some(polymer_code.to_string());
        self.form_code = Some(form_code.to_string());
        self
    }

    pub fn with_lot(mut self, folder_code: &str, lot_name: &str) -> Self {
        self.folder_code = Some(folder_code.to_string());
        self.lot_name = Some(lot_name.to_string());
        self
    }

    /// 產品代碼齊全時才做精確比對
    fn has_product(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        present(&self.polymer_code) && present(&self.form_code)
    }

    fn matches(&self, item: &InventoryItem, lot_name: Option<&str>) -> bool {
        let supplied = |wanted: &Option<String>, actual: Option<&str>| {
            wanted.as_deref().map_or(true, |w| Some(w) == actual)
        };
        supplied(&self.polymer_code, item.polymer_code.as_deref())
            && supplied(&self.form_code, item.form_code.as_deref())
            && supplied(&self.folder_code, item.folder_code.as_deref())
            && supplied(&self.lot_name, lot_name)
    }
}

/// 庫存搜尋服務
pub struct InventorySearch<S: InventoryStore> {
    store: S,
    config: SearchConfig,
}

impl<S: InventoryStore> InventorySearch<S> {
    pub fn new(store: S, config: SearchConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// 解析請求層的排序參數，未提供時使用配置的預設排序
    pub fn resolve_sort(&self, param: Option<&str>) -> SortSpec {
        match param.map(str::trim).filter(|p| !p.is_empty()) {
            Some(param) => SortSpec::parse(Some(param)),
            None => self.config.default_sort,
        }
    }

    /// 分頁搜尋
    ///
    /// # 參數
    /// * `page` - 從 0 起算
    /// * `size` - 0 表示使用預設頁大小，超過上限時截斷
    pub fn search(
        &self,
        criteria: &SearchCriteria,
        page: usize,
        size: usize,
        sort: SortSpec,
    ) -> inv_core::Result<SearchPage> {
        let size = self.config.effective_page_size(size);
        tracing::info!(
            "開始庫存搜尋：第 {} 頁，每頁 {} 筆，排序 {:?}，文字 {:?}",
            page,
            size,
            sort,
            criteria.text()
        );
        let start_time = std::time::Instant::now();

        // Phase 1: 輕量投影上篩選、排序、計數
        tracing::debug!("Phase 1: 篩選與排序");
        let predicate = PredicateBuilder::build(criteria);
        let rows = self.matching_rows(&predicate, sort)?;
        let total_count = rows.len();

        let offset = page.saturating_mul(size);
        if offset >= total_count {
            tracing::info!(
                "庫存搜尋完成，耗時 {:?}：共 {} 筆，第 {} 頁無資料",
                start_time.elapsed(),
                total_count,
                page
            );
            return Ok(SearchPage::empty(page, size, total_count));
        }
        let end = offset.saturating_add(size).min(total_count);
        let page_ids: Vec<i64> = rows[offset..end]
            .iter()
            .map(|row| row.item.inventory_id)
            .collect();
        drop(rows);
        tracing::debug!("當頁庫存ID: {:?}", page_ids);

        // Phase 2: 只為當頁組裝完整視圖
        tracing::debug!("Phase 2: 組裝完整視圖");
        let (items, warnings) = self.hydrate(&page_ids)?;
        for warning in &warnings {
            warning.emit();
        }

        tracing::info!(
            "庫存搜尋完成，耗時 {:?}：共 {} 筆，本頁 {} 筆",
            start_time.elapsed(),
            total_count,
            items.len()
        );

        Ok(SearchPage {
            items,
            total_count,
            page,
            size,
            warnings,
        })
    }

    /// 不分頁搜尋（匯出用），以設定的最大頁大小取第一頁
    pub fn search_all(
        &self,
        criteria: &SearchCriteria,
        sort: SortSpec,
    ) -> inv_core::Result<SearchPage> {
        self.search(criteria, 0, self.config.max_page_size, sort)
    }

    /// 單筆查詢
    ///
    /// 產品代碼齊全時先做精確比對；未提供或比對不到時，
    /// 退回該批次庫存ID最小的項目。
    /// 精確比對時，未提供的資料夾代碼或批名視為不限，不要求該欄位為空。
    pub fn find_item(&self, lookup: &ItemLookup) -> inv_core::Result<InventoryView> {
        let pan_items = self.store.items_in_pans(&[lookup.pan_id])?;

        let specific = if lookup.has_product() {
            pan_items
                .iter()
                .filter(|item| lookup.matches(item, item.lot_name().as_deref()))
                .min_by_key(|item| item.inventory_id)
        } else {
            None
        };
        let chosen = match specific {
            Some(item) => item,
            None => {
                if lookup.has_product() {
                    tracing::debug!("批次 {} 無精確符合的項目，改取第一筆", lookup.pan_id);
                }
                pan_items
                    .iter()
                    .min_by_key(|item| item.inventory_id)
                    .ok_or(InventoryError::NotFound {
                        pan_id: lookup.pan_id,
                    })?
            }
        };

        let batch_total_weight: Decimal = pan_items
            .iter()
            .map(|item| item.weight_left.unwrap_or(Decimal::ZERO))
            .sum();
        let allocations = self
            .store
            .allocations_for(&[lookup.pan_id], &[chosen.inventory_id])?;

        let (view, warnings) =
            ViewBuilder::build_view(chosen.clone(), batch_total_weight, &allocations);
        for warning in &warnings {
            warning.emit();
        }
        Ok(view)
    }

    /// 全表篩選面板資料
    ///
    /// # 參數
    /// * `today` - 無入庫日期時日期範圍的預設值
    pub fn facets(&self, today: NaiveDate) -> inv_core::Result<FilterFacets> {
        let (rows, _) = self.project_rows(&Predicate::all())?;
        Ok(FacetAggregator::aggregate(&rows, &self.config, today))
    }

    /// 建立輕量投影並篩選、排序
    fn matching_rows(
        &self,
        predicate: &Predicate,
        sort: SortSpec,
    ) -> inv_core::Result<Vec<InventoryRow>> {
        let (mut rows, parallel) = self.project_rows(predicate)?;
        crate::sort::sort_rows(&mut rows, sort, parallel);
        Ok(rows)
    }

    /// 建立輕量投影並篩選，保留資料來源的順序
    ///
    /// 返回符合的資料列，以及是否達到並行門檻。
    fn project_rows(&self, predicate: &Predicate) -> inv_core::Result<(Vec<InventoryRow>, bool)> {
        let items = self.store.scan_items()?;
        let allocations = self.store.scan_allocations()?;
        let scanned = items.len();
        let ledger = AllocationLedger::build(&items, &allocations);
        let parallel = scanned >= self.config.parallel_threshold;

        // 第一階段的資料品質警告只留給第二階段報告
        let project = |item: InventoryItem| {
            let (row, _) = ViewBuilder::build_row(item, &ledger);
            predicate.matches(&row).then_some(row)
        };
        let rows: Vec<InventoryRow> = if parallel {
            items.into_par_iter().filter_map(project).collect()
        } else {
            items.into_iter().filter_map(project).collect()
        };

        tracing::debug!(
            "掃描 {} 筆，符合 {} 筆（並行: {}）",
            scanned,
            rows.len(),
            parallel
        );
        Ok((rows, parallel))
    }

    /// 依ID組裝完整視圖，輸出順序與 `inventory_ids` 一致
    ///
    /// 讀不到的ID略過並記為警告。
    fn hydrate(
        &self,
        inventory_ids: &[i64],
    ) -> inv_core::Result<(Vec<InventoryView>, Vec<DataQualityWarning>)> {
        let page_items = self.store.items_by_ids(inventory_ids)?;
        let pan_ids: Vec<i64> = page_items
            .iter()
            .map(|item| item.pan_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        // 整批分配需要同批次全部項目的重量
        let siblings = self.store.items_in_pans(&pan_ids)?;
        let batch_weights = AllocationResolver::batch_weights(&siblings);
        let allocations = self.store.allocations_for(&pan_ids, inventory_ids)?;
        tracing::debug!(
            "讀取 {} 筆項目，{} 個批次，{} 筆分配",
            page_items.len(),
            pan_ids.len(),
            allocations.len()
        );

        let by_id: HashMap<i64, InventoryItem> = page_items
            .into_iter()
            .map(|item| (item.inventory_id, item))
            .collect();

        let build = |inventory_id: &i64| match by_id.get(inventory_id) {
            Some(item) => {
                let weight = batch_weights
                    .get(&item.pan_id)
                    .copied()
                    .unwrap_or(Decimal::ZERO);
                let (view, warnings) = ViewBuilder::build_view(item.clone(), weight, &allocations);
                (Some(view), warnings)
            }
            None => (
                None,
                vec![DataQualityWarning::missing_hydrated_row(*inventory_id)],
            ),
        };

        let built: Vec<(Option<InventoryView>, Vec<DataQualityWarning>)> =
            if inventory_ids.len() >= self.config.parallel_threshold {
                inventory_ids.par_iter().map(build).collect()
            } else {
                inventory_ids.iter().map(build).collect()
            };

        let mut views = Vec::with_capacity(built.len());
        let mut warnings = Vec::new();
        for (view, row_warnings) in built {
            views.extend(view);
            warnings.extend(row_warnings);
        }
        Ok((views, warnings))
    }
}
