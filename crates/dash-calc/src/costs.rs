//! 在製成本統計（WIP 價值、工時/零件成本占比）

use chrono::{Duration, NaiveDateTime};
use dash_core::{DeltaType, KpiResult, WorkOrder};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// 在製成本 KPI（主結果 + 多組分組明細）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WipValueKpi {
    /// 主結果：在製成本合計，delta 為趨勢視窗內新建工單數
    pub summary: KpiResult,

    /// 依狀態分組
    pub by_status: BTreeMap<String, Decimal>,

    /// 依站點分組
    pub by_site: BTreeMap<String, Decimal>,

    /// 依優先級分組
    pub by_priority: BTreeMap<String, Decimal>,
}

/// 成本占比 KPI（工時或零件）
///
/// 占比分母固定為「工時 + 零件」，保證兩邊占比合計 100%
/// （不用在製成本欄位當分母）。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostSplitKpi {
    /// 主結果：該成本合計
    pub summary: KpiResult,

    /// 占（工時+零件）的百分比，四捨五入到整數
    pub percentage: Decimal,

    /// 依狀態分組
    pub by_status: BTreeMap<String, Decimal>,

    /// 依站點分組
    pub by_site: BTreeMap<String, Decimal>,

    /// 依優先級分組
    pub by_priority: BTreeMap<String, Decimal>,
}

/// 成本面向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CostSide {
    Labour,
    Parts,
}

/// 在製成本統計器
pub struct CostCalculator;

impl CostCalculator {
    /// 在製成本合計（WIP 狀態工單的 wip_value 總和）
    ///
    /// delta 是趨勢視窗內新建的在製工單數，當作粗略的增長訊號。
    pub fn open_wip_value(
        work_orders: &[WorkOrder],
        as_of: NaiveDateTime,
        trend_window_days: i64,
    ) -> WipValueKpi {
        let wip: Vec<&WorkOrder> = work_orders.iter().filter(|wo| wo.is_wip()).collect();

        if wip.is_empty() {
            return WipValueKpi {
                summary: KpiResult::zero("No work orders in progress"),
                by_status: BTreeMap::new(),
                by_site: BTreeMap::new(),
                by_priority: BTreeMap::new(),
            };
        }

        let total: Decimal = wip.iter().map(|wo| wo.wip_value).sum();

        let mut by_status: BTreeMap<String, Decimal> = BTreeMap::new();
        let mut by_site: BTreeMap<String, Decimal> = BTreeMap::new();
        let mut by_priority: BTreeMap<String, Decimal> = BTreeMap::new();
        for wo in &wip {
            *by_status
                .entry(wo.status.label().to_string())
                .or_insert(Decimal::ZERO) += wo.wip_value;
            *by_site.entry(wo.site.clone()).or_insert(Decimal::ZERO) += wo.wip_value;
            *by_priority
                .entry(wo.priority.label().to_string())
                .or_insert(Decimal::ZERO) += wo.wip_value;
        }

        let window_start = as_of - Duration::days(trend_window_days);
        let created_recently = wip
            .iter()
            .filter(|wo| wo.created_date > window_start && wo.created_date <= as_of)
            .count();

        let mut summary = KpiResult::new(total)
            .with_caption(format!("{} work orders in progress", wip.len()))
            .with_breakdown(by_status.clone());
        if created_recently > 0 {
            summary = summary.with_delta(Decimal::from(created_recently), DeltaType::Increase);
        }

        WipValueKpi {
            summary,
            by_status,
            by_site,
            by_priority,
        }
    }

    /// 工時（及其他）成本合計與占比
    pub fn labour_and_other_costs(work_orders: &[WorkOrder]) -> CostSplitKpi {
        Self::cost_split(work_orders, CostSide::Labour)
    }

    /// 零件成本合計與占比
    pub fn parts_cost(work_orders: &[WorkOrder]) -> CostSplitKpi {
        Self::cost_split(work_orders, CostSide::Parts)
    }

    fn cost_split(work_orders: &[WorkOrder], side: CostSide) -> CostSplitKpi {
        let wip: Vec<&WorkOrder> = work_orders.iter().filter(|wo| wo.is_wip()).collect();

        let total_labour: Decimal = wip.iter().map(|wo| wo.total_labour_cost).sum();
        let total_parts: Decimal = wip.iter().map(|wo| wo.total_parts_cost).sum();
        let base = total_labour + total_parts;

        if wip.is_empty() || base == Decimal::ZERO {
            return CostSplitKpi {
                summary: KpiResult::zero("No work orders in progress with costs"),
                percentage: Decimal::ZERO,
                by_status: BTreeMap::new(),
                by_site: BTreeMap::new(),
                by_priority: BTreeMap::new(),
            };
        }

        let value = match side {
            CostSide::Labour => total_labour,
            CostSide::Parts => total_parts,
        };
        let percentage = (value * Decimal::from(100) / base).round_dp(0);

        let mut by_status: BTreeMap<String, Decimal> = BTreeMap::new();
        let mut by_site: BTreeMap<String, Decimal> = BTreeMap::new();
        let mut by_priority: BTreeMap<String, Decimal> = BTreeMap::new();
        for wo in &wip {
            let cost = match side {
                CostSide::Labour => wo.total_labour_cost,
                CostSide::Parts => wo.total_parts_cost,
            };
            *by_status
                .entry(wo.status.label().to_string())
                .or_insert(Decimal::ZERO) += cost;
            *by_site.entry(wo.site.clone()).or_insert(Decimal::ZERO) += cost;
            *by_priority
                .entry(wo.priority.label().to_string())
                .or_insert(Decimal::ZERO) += cost;
        }

        let summary = KpiResult::new(value)
            .with_caption(format!("{percentage}% of labour and parts cost"))
            .with_breakdown(by_status.clone());

        CostSplitKpi {
            summary,
            percentage,
            by_status,
            by_site,
            by_priority,
        }
    }
}
