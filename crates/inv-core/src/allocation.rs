//! 分配記錄模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 分配記錄（外部系統寫入，只增不改）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationRecord {
    /// 分配ID
    pub allocation_id: Option<i64>,

    /// 批次ID
    pub pan_id: i64,

    /// 庫存ID（`None` 表示整批分配）
    pub inventory_id: Option<i64>,

    /// 分配數量
    pub qty: Decimal,

    pub customer_code: Option<String>,
    pub purchase_order: Option<String>,
    pub container_num: Option<String>,
    pub book_num: Option<String>,
    pub so_type: Option<String>,
}

impl AllocationRecord {
    /// 創建整批（Pan 層級）分配
    pub fn batch(pan_id: i64, qty: Decimal) -> Self {
        Self {
            allocation_id: None,
            pan_id,
            inventory_id: None,
            qty,
            customer_code: None,
            purchase_order: None,
            container_num: None,
            book_num: None,
            so_type: None,
        }
    }

    /// 創建單項（庫存層級）分配
    pub fn item(pan_id: i64, inventory_id: i64, qty: Decimal) -> Self {
        Self {
            inventory_id: Some(inventory_id),
            ..Self::batch(pan_id, qty)
        }
    }

    /// 建構器模式：設置分配ID
    pub fn with_allocation_id(mut self, allocation_id: i64) -> Self {
        self.allocation_id = Some(allocation_id);
        self
    }

    /// 建構器模式：設置客戶代碼
    pub fn with_customer(mut self, customer_code: &str) -> Self {
        self.customer_code = Some(customer_code.to_string());
        self
    }

    /// 建構器模式：設置銷售採購單號
    pub fn with_purchase_order(mut self, purchase_order: &str) -> Self {
        self.purchase_order = Some(purchase_order.to_string());
        self
    }

    /// 建構器模式：設置貨櫃號
    pub fn with_container_num(mut self, container_num: &str) -> Self {
        self.container_num = Some(container_num.to_string());
        self
    }

    /// 建構器模式：設置訂艙號與訂單類型
    pub fn with_booking(mut self, book_num: &str, so_type: &str) -> Self {
        self.book_num = Some(book_num.to_string());
        self.so_type = Some(so_type.to_string());
        self
    }

    /// 檢查是否為整批分配
    pub fn is_batch_level(&self) -> bool {
        self.inventory_id.is_none()
    }
}

/// 分配狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AllocationStatus {
    Available,
    PartiallyAllocated,
    FullyAllocated,
    OverAllocated,
}

impl AllocationStatus {
    /// 依可用量與總分配量判定狀態
    pub fn classify(available_qty: Decimal, total_allocated: Decimal) -> Self {
        if available_qty < Decimal::ZERO {
            AllocationStatus::OverAllocated
        } else if available_qty.is_zero() && total_allocated > Decimal::ZERO {
            AllocationStatus::FullyAllocated
        } else if total_allocated > Decimal::ZERO && available_qty > Decimal::ZERO {
            AllocationStatus::PartiallyAllocated
        } else {
            AllocationStatus::Available
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AllocationStatus::Available => "AVAILABLE",
            AllocationStatus::PartiallyAllocated => "PARTIALLY_ALLOCATED",
            AllocationStatus::FullyAllocated => "FULLY_ALLOCATED",
            AllocationStatus::OverAllocated => "OVER_ALLOCATED",
        }
    }
}

impl fmt::Display for AllocationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
