//! 庫存快照模型

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 補貨建議動作
///
/// Transfer 與 Reallocate 是保留的分類值：現行規則不會產生，
/// 但序列化與顯示層仍須支援。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlannerAction {
    /// 庫存健康，無需動作
    #[serde(rename = "OK")]
    Ok,
    /// 有在途供應，需要催單
    Expedite,
    /// 無在途供應，需要開立採購單
    #[serde(rename = "RaisePO")]
    RaisePo,
    /// 站間調撥（保留值）
    Transfer,
    /// 重新分配既有庫存（保留值）
    Reallocate,
}

impl PlannerAction {
    pub fn label(&self) -> &'static str {
        match self {
            PlannerAction::Ok => "OK",
            PlannerAction::Expedite => "Expedite",
            PlannerAction::RaisePo => "RaisePO",
            PlannerAction::Transfer => "Transfer",
            PlannerAction::Reallocate => "Reallocate",
        }
    }
}

/// 分類前的庫存快照列（單一料件在單一站點/倉庫的位置）
///
/// 數量欄位缺漏視為 0；`available` 與 `avg_daily_demand` 缺漏時
/// 保持未知（None），不可折算成 0。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotInput {
    /// 料號
    pub item_id: String,

    /// 站點
    pub site: String,

    /// 倉庫
    #[serde(default)]
    pub warehouse: Option<String>,

    /// 現有庫存
    #[serde(default)]
    pub on_hand: Decimal,

    /// 可用庫存（現有 - 保留；缺漏時以現有庫存替代）
    #[serde(default)]
    pub available: Option<Decimal>,

    /// 安全庫存
    #[serde(default)]
    pub safety_stock: Decimal,

    /// 最低在庫量（安全庫存為 0 時的替代門檻）
    #[serde(default)]
    pub min_on_hand: Decimal,

    /// 期界內在途數量
    #[serde(default)]
    pub inbound_qty: Decimal,

    /// 期界內最早到貨日
    #[serde(default)]
    pub next_eta: Option<NaiveDate>,

    /// 期界內需求總量
    #[serde(default)]
    pub demand_qty: Decimal,

    /// 平均日需求
    #[serde(default)]
    pub avg_daily_demand: Option<Decimal>,
}

impl SnapshotInput {
    /// 創建新的快照列
    pub fn new(item_id: String, site: String, on_hand: Decimal, safety_stock: Decimal) -> Self {
        Self {
            item_id,
            site,
            warehouse: None,
            on_hand,
            available: None,
            safety_stock,
            min_on_hand: Decimal::ZERO,
            inbound_qty: Decimal::ZERO,
            next_eta: None,
            demand_qty: Decimal::ZERO,
            avg_daily_demand: None,
        }
    }

    /// 建構器模式：設置倉庫
    pub fn with_warehouse(mut self, warehouse: String) -> Self {
        self.warehouse = Some(warehouse);
        self
    }

    /// 建構器模式：設置可用庫存
    pub fn with_available(mut self, available: Decimal) -> Self {
        self.available = Some(available);
        self
    }

    /// 建構器模式：設置最低在庫量
    pub fn with_min_on_hand(mut self, min_on_hand: Decimal) -> Self {
        self.min_on_hand = min_on_hand;
        self
    }

    /// 建構器模式：設置在途數量
    pub fn with_inbound_qty(mut self, inbound_qty: Decimal) -> Self {
        self.inbound_qty = inbound_qty;
        self
    }

    /// 建構器模式：設置最早到貨日
    pub fn with_next_eta(mut self, next_eta: NaiveDate) -> Self {
        self.next_eta = Some(next_eta);
        self
    }

    /// 建構器模式：設置需求總量
    pub fn with_demand_qty(mut self, demand_qty: Decimal) -> Self {
        self.demand_qty = demand_qty;
        self
    }

    /// 建構器模式：設置平均日需求
    pub fn with_avg_daily_demand(mut self, avg_daily_demand: Decimal) -> Self {
        self.avg_daily_demand = Some(avg_daily_demand);
        self
    }
}

/// 已分類的庫存快照列
///
/// 不變式：`gap = max(0, demand_qty - (on_hand + inbound_qty))`；
/// `cover_days` 在平均日需求缺漏或為 0 時為 None。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRow {
    /// 料號
    pub item_id: String,

    /// 站點
    pub site: String,

    /// 倉庫
    pub warehouse: Option<String>,

    /// 現有庫存
    pub on_hand: Decimal,

    /// 可用庫存（原始值，可能未知）
    pub available: Option<Decimal>,

    /// 安全庫存
    pub safety_stock: Decimal,

    /// 最低在庫量
    pub min_on_hand: Decimal,

    /// 期界內在途數量
    pub inbound_qty: Decimal,

    /// 期界內最早到貨日
    pub next_eta: Option<NaiveDate>,

    /// 期界內需求總量
    pub demand_qty: Decimal,

    /// 需求缺口
    pub gap: Decimal,

    /// 覆蓋天數（現有 + 在途可撐幾天）
    pub cover_days: Option<Decimal>,

    /// 補貨建議動作
    pub action: PlannerAction,
}

impl SnapshotRow {
    /// 檢查是否需要計劃人員處理
    pub fn needs_attention(&self) -> bool {
        self.action != PlannerAction::Ok
    }

    /// 原始庫存是否低於安全庫存（不考慮可用庫存與替代門檻）
    pub fn is_below_safety_raw(&self) -> bool {
        self.on_hand < self.safety_stock
    }

    /// 是否完全沒有在途供應
    pub fn has_no_inbound(&self) -> bool {
        self.inbound_qty == Decimal::ZERO
    }
}
