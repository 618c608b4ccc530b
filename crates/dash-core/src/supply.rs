//! 在途供應模型

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 供應來源類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SupplySource {
    /// 採購訂單
    #[serde(rename = "PO")]
    PurchaseOrder,
    /// 調撥單
    TransferOrder,
}

impl SupplySource {
    pub fn label(&self) -> &'static str {
        match self {
            SupplySource::PurchaseOrder => "PO",
            SupplySource::TransferOrder => "TransferOrder",
        }
    }
}

/// 在途供應明細（一張採購單或調撥單的單一明細列）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyLine {
    /// 明細ID
    pub id: Uuid,

    /// 料號
    pub item_id: String,

    /// 站點
    pub site: String,

    /// 供應來源
    pub source: SupplySource,

    /// 來源單號
    pub reference: String,

    /// 數量
    pub qty: Decimal,

    /// 預計到貨日
    #[serde(default)]
    pub eta: Option<NaiveDate>,
}

impl SupplyLine {
    /// 創建新的供應明細
    pub fn new(
        item_id: String,
        site: String,
        source: SupplySource,
        reference: String,
        qty: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            item_id,
            site,
            source,
            reference,
            qty,
            eta: None,
        }
    }

    /// 建構器模式：設置預計到貨日
    pub fn with_eta(mut self, eta: NaiveDate) -> Self {
        self.eta = Some(eta);
        self
    }

    /// 檢查到貨日是否落在期界內（無到貨日視為期界外）
    pub fn is_within_horizon(&self, as_of: NaiveDate, horizon_days: u32) -> bool {
        match self.eta {
            Some(eta) => eta >= as_of && eta <= as_of + Duration::days(i64::from(horizon_days)),
            None => false,
        }
    }
}
