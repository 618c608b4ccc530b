//! # Dash Core
//!
//! 核心資料模型與類型定義

pub mod config;
pub mod demand;
pub mod kpi;
pub mod snapshot;
pub mod supply;
pub mod work_order;

// Re-export 主要類型
pub use config::PlannerConfig;
pub use demand::{DemandKind, DemandLine};
pub use kpi::{AgeingBucket, DeltaType, KpiResult};
pub use snapshot::{PlannerAction, SnapshotInput, SnapshotRow};
pub use supply::{SupplyLine, SupplySource};
pub use work_order::{Priority, ServiceType, WorkOrder, WorkOrderStatus};

/// 儀表板錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum DashError {
    #[error("無效的帳齡分界: {0}")]
    InvalidAgeingBounds(String),

    #[error("無效的計劃參數: {0}")]
    InvalidConfig(String),

    #[error("其他錯誤: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, DashError>;
