//! 需求明細模型

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 需求類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DemandKind {
    /// 工單用料
    WorkOrder,
    /// 銷售訂單
    Sales,
    /// 保留
    Reservation,
    /// 內部領用
    Internal,
}

impl DemandKind {
    pub fn label(&self) -> &'static str {
        match self {
            DemandKind::WorkOrder => "WorkOrder",
            DemandKind::Sales => "Sales",
            DemandKind::Reservation => "Reservation",
            DemandKind::Internal => "Internal",
        }
    }
}

/// 需求明細（單一出庫需求列）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandLine {
    /// 明細ID
    pub id: Uuid,

    /// 料號
    pub item_id: String,

    /// 站點
    pub site: String,

    /// 需求類型
    pub kind: DemandKind,

    /// 來源單號
    #[serde(default)]
    pub reference: Option<String>,

    /// 數量
    pub qty: Decimal,

    /// 需求日
    #[serde(default)]
    pub need_by: Option<NaiveDate>,
}

impl DemandLine {
    /// 創建新的需求明細
    pub fn new(item_id: String, site: String, kind: DemandKind, qty: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            item_id,
            site,
            kind,
            reference: None,
            qty,
            need_by: None,
        }
    }

    /// 建構器模式：設置來源單號
    pub fn with_reference(mut self, reference: String) -> Self {
        self.reference = Some(reference);
        self
    }

    /// 建構器模式：設置需求日
    pub fn with_need_by(mut self, need_by: NaiveDate) -> Self {
        self.need_by = Some(need_by);
        self
    }

    /// 檢查需求日是否落在期界內（無需求日視為期界外）
    pub fn is_within_horizon(&self, as_of: NaiveDate, horizon_days: u32) -> bool {
        match self.need_by {
            Some(need_by) => {
                need_by >= as_of && need_by <= as_of + Duration::days(i64::from(horizon_days))
            }
            None => false,
        }
    }
}
