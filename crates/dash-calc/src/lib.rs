//! # Dash Calculation Engine
//!
//! 快照分類與 KPI 彙總引擎

pub mod backlog;
pub mod classifier;
pub mod costs;
pub mod engine;
pub mod revenue;
pub mod service_level;
pub mod stock;
pub mod trend;

// Re-export 主要類型
pub use backlog::{BacklogCalculator, WorstBucket};
pub use classifier::Classifier;
pub use costs::{CostCalculator, CostSplitKpi, WipValueKpi};
pub use engine::DashboardCalculator;
pub use revenue::{MarginKpi, RevenueCalculator, RevenueKpi};
pub use service_level::{ResolutionKpi, ServiceLevelCalculator, SlaKpi, WeeklyAverage};
pub use stock::{SnapshotSummary, StockHealthCalculator};
pub use trend::{TrendCalculator, TrendDirection, WeeklyTrend};

use dash_core::{AgeingBucket, KpiResult, SnapshotRow};
use serde::Serialize;

/// 單次計算的完整 KPI 報告
///
/// 每次查詢都重新計算；不緩存、不持久化。
#[derive(Debug, Clone, Serialize)]
pub struct KpiReport {
    /// 已分類的庫存快照
    pub snapshot: Vec<SnapshotRow>,

    /// 未結工單數
    pub open_work_orders: KpiResult,

    /// 帳齡分桶
    pub ageing: Vec<AgeingBucket>,

    /// 最嚴重的帳齡分桶
    pub worst_ageing: WorstBucket,

    /// 週趨勢
    pub weekly_trend: WeeklyTrend,

    /// 在製成本
    pub open_wip_value: WipValueKpi,

    /// 工時成本
    pub labour_and_other_costs: CostSplitKpi,

    /// 零件成本
    pub parts_cost: CostSplitKpi,

    /// 本月營收
    pub month_to_date_revenue: RevenueKpi,

    /// 平均毛利率
    pub average_gross_margin: MarginKpi,

    /// 平均解決時間
    pub average_resolution_time: ResolutionKpi,

    /// SLA 準時率
    pub sla_performance: SlaKpi,

    /// 低於安全庫存
    pub parts_below_safety: KpiResult,

    /// 低於安全庫存且無在途
    pub below_safety_no_supply: KpiResult,

    /// 緊缺料件
    pub critical_items: KpiResult,

    /// 快照摘要
    pub snapshot_summary: SnapshotSummary,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}
