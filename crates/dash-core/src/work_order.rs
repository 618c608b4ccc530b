//! 工單模型

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 工單狀態
///
/// 只有 Posted 視為財務結算完成；{Unscheduled, Scheduled, InProgress,
/// Completed} 在成本與帳齡統計上都算在製（WIP）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkOrderStatus {
    /// 未排程
    Unscheduled,
    /// 已排程
    Scheduled,
    /// 進行中
    InProgress,
    /// 已完工（尚未過帳）
    Completed,
    /// 已過帳（財務結算）
    Posted,
    /// 已取消
    Canceled,
}

impl WorkOrderStatus {
    /// 全部狀態（固定順序）
    pub const ALL: [WorkOrderStatus; 6] = [
        WorkOrderStatus::Unscheduled,
        WorkOrderStatus::Scheduled,
        WorkOrderStatus::InProgress,
        WorkOrderStatus::Completed,
        WorkOrderStatus::Posted,
        WorkOrderStatus::Canceled,
    ];

    /// 在製狀態（WIP）
    pub const WIP: [WorkOrderStatus; 4] = [
        WorkOrderStatus::Unscheduled,
        WorkOrderStatus::Scheduled,
        WorkOrderStatus::InProgress,
        WorkOrderStatus::Completed,
    ];

    /// 檢查是否為在製狀態
    pub fn is_wip(&self) -> bool {
        matches!(
            self,
            WorkOrderStatus::Unscheduled
                | WorkOrderStatus::Scheduled
                | WorkOrderStatus::InProgress
                | WorkOrderStatus::Completed
        )
    }

    /// 檢查是否已財務結算
    pub fn is_settled(&self) -> bool {
        *self == WorkOrderStatus::Posted
    }

    /// 顯示標籤（與倉儲來源的狀態標籤一致）
    pub fn label(&self) -> &'static str {
        match self {
            WorkOrderStatus::Unscheduled => "Unscheduled",
            WorkOrderStatus::Scheduled => "Scheduled",
            WorkOrderStatus::InProgress => "InProgress",
            WorkOrderStatus::Completed => "Completed",
            WorkOrderStatus::Posted => "Posted",
            WorkOrderStatus::Canceled => "Canceled",
        }
    }

    /// 從標籤解析狀態；未知標籤回傳 None
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Unscheduled" => Some(WorkOrderStatus::Unscheduled),
            "Scheduled" => Some(WorkOrderStatus::Scheduled),
            "InProgress" => Some(WorkOrderStatus::InProgress),
            "Completed" => Some(WorkOrderStatus::Completed),
            "Posted" => Some(WorkOrderStatus::Posted),
            "Canceled" => Some(WorkOrderStatus::Canceled),
            _ => None,
        }
    }

    /// 倉儲系統的狀態代碼
    pub fn warehouse_code(&self) -> u32 {
        match self {
            WorkOrderStatus::Unscheduled => 690_970_000,
            WorkOrderStatus::Scheduled => 690_970_001,
            WorkOrderStatus::InProgress => 690_970_002,
            WorkOrderStatus::Completed => 690_970_003,
            WorkOrderStatus::Posted => 690_970_004,
            WorkOrderStatus::Canceled => 690_970_005,
        }
    }

    /// 從倉儲狀態代碼解析；未知代碼回傳 None
    pub fn from_warehouse_code(code: u32) -> Option<Self> {
        WorkOrderStatus::ALL
            .iter()
            .copied()
            .find(|s| s.warehouse_code() == code)
    }
}

/// 工單優先級
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Critical,
    High,
    Normal,
    Low,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Priority::Critical => "Critical",
            Priority::High => "High",
            Priority::Normal => "Normal",
            Priority::Low => "Low",
        }
    }
}

/// 服務類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceType {
    Internal,
    External,
    Warranty,
}

impl ServiceType {
    pub fn label(&self) -> &'static str {
        match self {
            ServiceType::Internal => "Internal",
            ServiceType::External => "External",
            ServiceType::Warranty => "Warranty",
        }
    }
}

/// 工單（維修/服務作業）
///
/// 本系統只讀取工單快照，不會回寫來源系統。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkOrder {
    /// 工單編號（站點內唯一）
    pub work_order_id: String,

    /// 狀態
    pub status: WorkOrderStatus,

    /// 優先級
    pub priority: Priority,

    /// 服務類型
    pub service_type: ServiceType,

    /// 站點（可能是代碼或顯示名稱，未解析時允許 "UNKNOWN"）
    pub site: String,

    /// 技師
    #[serde(default)]
    pub technician: Option<String>,

    /// 建立時間
    pub created_date: NaiveDateTime,

    /// 首次到場時間
    #[serde(default)]
    pub start_date: Option<NaiveDateTime>,

    /// 承諾完成時間
    #[serde(default)]
    pub promised_date: Option<NaiveDateTime>,

    /// 結案時間（Posted 或 Completed 後才有值）
    #[serde(default)]
    pub closed_date: Option<NaiveDateTime>,

    /// 在製成本
    #[serde(default)]
    pub wip_value: Decimal,

    /// 零件成本合計
    #[serde(default)]
    pub total_parts_cost: Decimal,

    /// 工時成本合計
    #[serde(default)]
    pub total_labour_cost: Decimal,

    /// 毛利率（百分比）
    #[serde(default)]
    pub gross_margin: Decimal,

    /// 過帳營收
    #[serde(default)]
    pub total_amount: Decimal,
}

impl WorkOrder {
    /// 創建新的工單記錄
    pub fn new(
        work_order_id: String,
        status: WorkOrderStatus,
        site: String,
        created_date: NaiveDateTime,
    ) -> Self {
        Self {
            work_order_id,
            status,
            priority: Priority::Normal,
            service_type: ServiceType::Internal,
            site,
            technician: None,
            created_date,
            start_date: None,
            promised_date: None,
            closed_date: None,
            wip_value: Decimal::ZERO,
            total_parts_cost: Decimal::ZERO,
            total_labour_cost: Decimal::ZERO,
            gross_margin: Decimal::ZERO,
            total_amount: Decimal::ZERO,
        }
    }

    /// 建構器模式：設置優先級
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// 建構器模式：設置服務類型
    pub fn with_service_type(mut self, service_type: ServiceType) -> Self {
        self.service_type = service_type;
        self
    }

    /// 建構器模式：設置技師
    pub fn with_technician(mut self, technician: String) -> Self {
        self.technician = Some(technician);
        self
    }

    /// 建構器模式：設置首次到場時間
    pub fn with_start_date(mut self, start_date: NaiveDateTime) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// 建構器模式：設置承諾完成時間
    pub fn with_promised_date(mut self, promised_date: NaiveDateTime) -> Self {
        self.promised_date = Some(promised_date);
        self
    }

    /// 建構器模式：設置結案時間
    pub fn with_closed_date(mut self, closed_date: NaiveDateTime) -> Self {
        self.closed_date = Some(closed_date);
        self
    }

    /// 建構器模式：設置在製成本
    pub fn with_wip_value(mut self, wip_value: Decimal) -> Self {
        self.wip_value = wip_value;
        self
    }

    /// 建構器模式：設置零件成本
    pub fn with_parts_cost(mut self, parts_cost: Decimal) -> Self {
        self.total_parts_cost = parts_cost;
        self
    }

    /// 建構器模式：設置工時成本
    pub fn with_labour_cost(mut self, labour_cost: Decimal) -> Self {
        self.total_labour_cost = labour_cost;
        self
    }

    /// 建構器模式：設置毛利率
    pub fn with_gross_margin(mut self, gross_margin: Decimal) -> Self {
        self.gross_margin = gross_margin;
        self
    }

    /// 建構器模式：設置過帳營收
    pub fn with_total_amount(mut self, total_amount: Decimal) -> Self {
        self.total_amount = total_amount;
        self
    }

    /// 工單帳齡（整數天）
    ///
    /// 以建立時間到結案時間（未結案則到 `as_of`）的天數計算，下限為 0。
    pub fn age_days(&self, as_of: NaiveDateTime) -> i64 {
        let end = self.closed_date.unwrap_or(as_of);
        (end - self.created_date).num_days().max(0)
    }

    /// 檢查是否為在製工單
    pub fn is_wip(&self) -> bool {
        self.status.is_wip()
    }

    /// 工時 + 零件成本合計（成本占比的分母）
    pub fn labour_parts_base(&self) -> Decimal {
        self.total_labour_cost + self.total_parts_cost
    }

    /// 技師標籤（未指派時回傳 "Unassigned"）
    pub fn technician_label(&self) -> &str {
        self.technician.as_deref().unwrap_or("Unassigned")
    }
}
