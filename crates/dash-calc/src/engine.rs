//! 儀表板主計算器

use chrono::NaiveDateTime;
use dash_core::{PlannerConfig, SnapshotInput, WorkOrder};

use crate::backlog::BacklogCalculator;
use crate::classifier::Classifier;
use crate::costs::CostCalculator;
use crate::revenue::RevenueCalculator;
use crate::service_level::ServiceLevelCalculator;
use crate::stock::StockHealthCalculator;
use crate::trend::TrendCalculator;
use crate::KpiReport;

/// 儀表板計算器
///
/// 接收查詢層交付的完整集合，一次算出全部 KPI。
/// 本身不做任何 I/O；重新整理時整份結果重算。
pub struct DashboardCalculator {
    /// 計劃參數
    config: PlannerConfig,
}

impl DashboardCalculator {
    /// 創建新的計算器（會驗證配置）
    pub fn new(config: PlannerConfig) -> dash_core::Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// 獲取配置引用
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// 主計算入口
    pub fn compute(
        &self,
        work_orders: &[WorkOrder],
        snapshot_inputs: &[SnapshotInput],
        as_of: NaiveDateTime,
    ) -> KpiReport {
        tracing::info!(
            "開始 KPI 計算：工單 {} 筆，庫存快照 {} 筆",
            work_orders.len(),
            snapshot_inputs.len()
        );

        let start_time = std::time::Instant::now();

        // Step 1: 快照分類
        tracing::debug!("Step 1: 快照分類");
        let snapshot = Classifier::classify_all(snapshot_inputs);

        // Step 2: 工單面 KPI
        tracing::debug!("Step 2: 工單 KPI 彙總");
        let open_work_orders = BacklogCalculator::open_work_orders(work_orders);
        let ageing =
            BacklogCalculator::ageing_buckets(work_orders, &self.config.ageing_bounds, as_of);
        let worst_ageing = BacklogCalculator::worst_bucket(&ageing);
        let weekly_trend =
            TrendCalculator::weekly(work_orders, as_of, self.config.trend_window_days);
        let open_wip_value =
            CostCalculator::open_wip_value(work_orders, as_of, self.config.trend_window_days);
        let labour_and_other_costs = CostCalculator::labour_and_other_costs(work_orders);
        let parts_cost = CostCalculator::parts_cost(work_orders);
        let month_to_date_revenue = RevenueCalculator::month_to_date(work_orders, as_of);
        let average_gross_margin = RevenueCalculator::average_gross_margin(work_orders, as_of);
        let average_resolution_time = ServiceLevelCalculator::average_resolution_time(
            work_orders,
            as_of,
            self.config.resolution_trend_weeks,
        );
        let sla_performance = ServiceLevelCalculator::sla_performance(
            work_orders,
            as_of,
            self.config.trend_window_days,
        );

        // Step 3: 庫存面 KPI
        tracing::debug!("Step 3: 庫存 KPI 彙總");
        let parts_below_safety = StockHealthCalculator::parts_below_safety(&snapshot);
        let below_safety_no_supply = StockHealthCalculator::below_safety_no_supply(&snapshot);
        let critical_items = StockHealthCalculator::critical_items(
            &snapshot,
            as_of.date(),
            self.config.critical_eta_grace_days,
        );
        let snapshot_summary = StockHealthCalculator::snapshot_summary(&snapshot);

        let elapsed = start_time.elapsed();
        tracing::info!(
            "KPI 計算完成，耗時 {:?}；需要處理的料件 {} 筆",
            elapsed,
            snapshot_summary.critical_items
        );

        KpiReport {
            snapshot,
            open_work_orders,
            ageing,
            worst_ageing,
            weekly_trend,
            open_wip_value,
            labour_and_other_costs,
            parts_cost,
            month_to_date_revenue,
            average_gross_margin,
            average_resolution_time,
            sla_performance,
            parts_below_safety,
            below_safety_no_supply,
            critical_items,
            snapshot_summary,
            calculation_time_ms: Some(elapsed.as_millis()),
        }
    }
}
