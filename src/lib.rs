//! # Dash
//!
//! 服務工單與庫存儀表板的核心引擎：
//! 接收查詢層交付的工單/庫存集合，算出補貨建議與全部 KPI，
//! 交給渲染層顯示。

// Re-export 各層主要類型
pub use dash_core::{
    AgeingBucket, DashError, DeltaType, DemandKind, DemandLine, KpiResult, PlannerAction,
    PlannerConfig, Priority, Result, ServiceType, SnapshotInput, SnapshotRow, SupplyLine,
    SupplySource, WorkOrder, WorkOrderStatus,
};

pub use dash_calc::{
    BacklogCalculator, Classifier, CostCalculator, CostSplitKpi, DashboardCalculator, KpiReport,
    MarginKpi, ResolutionKpi, RevenueCalculator, RevenueKpi, ServiceLevelCalculator, SlaKpi,
    SnapshotSummary, StockHealthCalculator, TrendCalculator, TrendDirection, WeeklyAverage,
    WeeklyTrend, WipValueKpi, WorstBucket,
};

pub use dash_filter as filter;
pub use dash_view as view;
