//! 服務水準統計（解決時間、SLA 準時率）

use chrono::{Duration, NaiveDateTime};
use dash_core::{DeltaType, KpiResult, WorkOrder, WorkOrderStatus};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// 單一回看週的平均解決時間
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyAverage {
    /// 距今幾週（0 = 最近一週）
    pub weeks_ago: u32,

    /// 該週結案工單的平均解決天數（該週無結案時為 None）
    pub average_days: Option<Decimal>,

    /// 該週結案工單數
    pub count: u64,
}

/// 平均解決時間 KPI
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolutionKpi {
    /// 主結果：平均解決天數（1 位小數），delta 為最近兩週的週對週變化
    pub summary: KpiResult,

    /// 依優先級分組的平均天數
    pub by_priority: BTreeMap<String, Decimal>,

    /// 依站點分組的平均天數
    pub by_site: BTreeMap<String, Decimal>,

    /// 依技師分組的平均天數（未指派歸入 "Unassigned"）
    pub by_technician: BTreeMap<String, Decimal>,

    /// 回看各週的平均（由遠到近）
    pub weekly: Vec<WeeklyAverage>,
}

/// SLA 準時率 KPI
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlaKpi {
    /// 主結果：準時率百分比（1 位小數），delta 為週對週變化（百分點）
    pub summary: KpiResult,

    /// 準時結案數
    pub on_time_count: u64,

    /// 逾期結案數
    pub late_count: u64,

    /// 逾期工單的平均逾期天數（無逾期時為 None）
    pub average_delay_days: Option<Decimal>,

    /// 依優先級分組的準時率
    pub by_priority: BTreeMap<String, Decimal>,

    /// 依站點分組的準時率
    pub by_site: BTreeMap<String, Decimal>,
}

/// 服務水準統計器
pub struct ServiceLevelCalculator;

impl ServiceLevelCalculator {
    /// 平均解決時間（首次到場到結案的整數天）
    ///
    /// 只計 Posted 且同時有到場與結案時間的工單；缺到場時間的工單
    /// 直接排除（不得當 0 天計），結案早於到場的異常列也排除，
    /// 避免單筆壞資料污染整體平均。
    pub fn average_resolution_time(
        work_orders: &[WorkOrder],
        as_of: NaiveDateTime,
        trend_weeks: u32,
    ) -> ResolutionKpi {
        let resolved: Vec<(&WorkOrder, Decimal)> = work_orders
            .iter()
            .filter(|wo| wo.status == WorkOrderStatus::Posted)
            .filter_map(|wo| {
                let start = wo.start_date?;
                let closed = wo.closed_date?;
                let days = (closed - start).num_days();
                if days < 0 {
                    return None;
                }
                Some((wo, Decimal::from(days)))
            })
            .collect();

        if resolved.is_empty() {
            return ResolutionKpi {
                summary: KpiResult::zero("No completed work orders"),
                by_priority: BTreeMap::new(),
                by_site: BTreeMap::new(),
                by_technician: BTreeMap::new(),
                weekly: Self::empty_weeks(trend_weeks),
            };
        }

        let average = Self::mean(resolved.iter().map(|(_, d)| *d));

        let by_priority =
            Self::grouped_mean(&resolved, |wo| wo.priority.label().to_string());
        let by_site = Self::grouped_mean(&resolved, |wo| wo.site.clone());
        let by_technician =
            Self::grouped_mean(&resolved, |wo| wo.technician_label().to_string());

        // 由遠到近的回看週；每週是結束於 as_of - 7n 天的滾動視窗
        let mut weekly = Vec::with_capacity(trend_weeks as usize);
        for weeks_ago in (0..trend_weeks).rev() {
            let window_end = as_of - Duration::weeks(i64::from(weeks_ago));
            let window_start = window_end - Duration::days(7);
            let in_window: Vec<Decimal> = resolved
                .iter()
                .filter(|(wo, _)| {
                    wo.closed_date
                        .is_some_and(|c| c > window_start && c <= window_end)
                })
                .map(|(_, d)| *d)
                .collect();
            weekly.push(WeeklyAverage {
                weeks_ago,
                average_days: if in_window.is_empty() {
                    None
                } else {
                    Some(Self::mean(in_window.iter().copied()))
                },
                count: in_window.len() as u64,
            });
        }

        let mut summary = KpiResult::new(average)
            .with_caption(format!("across {} completed work orders", resolved.len()));

        // 週對週變化：最近一週對前一週，兩週都要有資料
        let latest = weekly.iter().find(|w| w.weeks_ago == 0);
        let previous = weekly.iter().find(|w| w.weeks_ago == 1);
        if let (Some(Some(now)), Some(Some(prev))) = (
            latest.map(|w| w.average_days),
            previous.map(|w| w.average_days),
        ) {
            let delta = (now - prev).round_dp(1);
            if delta > Decimal::ZERO {
                summary = summary.with_delta(delta, DeltaType::Increase);
            } else if delta < Decimal::ZERO {
                summary = summary.with_delta(-delta, DeltaType::Decrease);
            }
        }

        ResolutionKpi {
            summary,
            by_priority,
            by_site,
            by_technician,
            weekly,
        }
    }

    /// SLA 準時率（結案時間對承諾時間）
    ///
    /// 只計 {Completed, Posted} 且同時有結案與承諾時間的工單。
    pub fn sla_performance(
        work_orders: &[WorkOrder],
        as_of: NaiveDateTime,
        window_days: i64,
    ) -> SlaKpi {
        let eligible: Vec<(&WorkOrder, NaiveDateTime, NaiveDateTime)> = work_orders
            .iter()
            .filter(|wo| {
                matches!(
                    wo.status,
                    WorkOrderStatus::Completed | WorkOrderStatus::Posted
                )
            })
            .filter_map(|wo| {
                let closed = wo.closed_date?;
                let promised = wo.promised_date?;
                Some((wo, closed, promised))
            })
            .collect();

        if eligible.is_empty() {
            return SlaKpi {
                summary: KpiResult::zero("No completed work orders with promise dates"),
                on_time_count: 0,
                late_count: 0,
                average_delay_days: None,
                by_priority: BTreeMap::new(),
                by_site: BTreeMap::new(),
            };
        }

        let on_time_count = eligible
            .iter()
            .filter(|(_, closed, promised)| closed <= promised)
            .count() as u64;
        let late: Vec<Decimal> = eligible
            .iter()
            .filter(|(_, closed, promised)| closed > promised)
            .map(|(_, closed, promised)| Decimal::from((*closed - *promised).num_days()))
            .collect();
        let late_count = late.len() as u64;

        let on_time_percent = Self::percent(on_time_count, eligible.len());
        let average_delay_days = if late.is_empty() {
            None
        } else {
            Some(Self::mean(late.iter().copied()))
        };

        let by_priority =
            Self::grouped_on_time(&eligible, |wo| wo.priority.label().to_string());
        let by_site = Self::grouped_on_time(&eligible, |wo| wo.site.clone());

        let mut summary = KpiResult::new(on_time_percent).with_caption(format!(
            "{on_time_count} of {} on time",
            eligible.len()
        ));

        // 週對週變化：以結案時間切滾動視窗
        let this_window = Self::window_percent(&eligible, as_of, window_days, 0);
        let prior_window = Self::window_percent(&eligible, as_of, window_days, 1);
        if let (Some(now), Some(prev)) = (this_window, prior_window) {
            let delta = (now - prev).round_dp(1);
            if delta > Decimal::ZERO {
                summary = summary.with_delta(delta, DeltaType::Increase);
            } else if delta < Decimal::ZERO {
                summary = summary.with_delta(-delta, DeltaType::Decrease);
            }
        }

        SlaKpi {
            summary,
            on_time_count,
            late_count,
            average_delay_days,
            by_priority,
            by_site,
        }
    }

    fn empty_weeks(trend_weeks: u32) -> Vec<WeeklyAverage> {
        (0..trend_weeks)
            .rev()
            .map(|weeks_ago| WeeklyAverage {
                weeks_ago,
                average_days: None,
                count: 0,
            })
            .collect()
    }

    fn mean(values: impl Iterator<Item = Decimal>) -> Decimal {
        let collected: Vec<Decimal> = values.collect();
        if collected.is_empty() {
            return Decimal::ZERO;
        }
        (collected.iter().copied().sum::<Decimal>() / Decimal::from(collected.len())).round_dp(1)
    }

    fn percent(part: u64, total: usize) -> Decimal {
        if total == 0 {
            return Decimal::ZERO;
        }
        (Decimal::from(part) * Decimal::from(100) / Decimal::from(total)).round_dp(1)
    }

    fn grouped_mean(
        resolved: &[(&WorkOrder, Decimal)],
        key: impl Fn(&WorkOrder) -> String,
    ) -> BTreeMap<String, Decimal> {
        let mut groups: BTreeMap<String, Vec<Decimal>> = BTreeMap::new();
        for (wo, days) in resolved {
            groups.entry(key(wo)).or_default().push(*days);
        }
        groups
            .into_iter()
            .map(|(k, days)| (k, Self::mean(days.into_iter())))
            .collect()
    }

    fn grouped_on_time(
        eligible: &[(&WorkOrder, NaiveDateTime, NaiveDateTime)],
        key: impl Fn(&WorkOrder) -> String,
    ) -> BTreeMap<String, Decimal> {
        let mut groups: BTreeMap<String, (u64, usize)> = BTreeMap::new();
        for (wo, closed, promised) in eligible {
            let entry = groups.entry(key(wo)).or_insert((0, 0));
            entry.1 += 1;
            if closed <= promised {
                entry.0 += 1;
            }
        }
        groups
            .into_iter()
            .map(|(k, (on_time, total))| (k, Self::percent(on_time, total)))
            .collect()
    }

    /// 第 n 個滾動視窗（0 = 結束於 as_of）的準時率；視窗內無結案時為 None
    fn window_percent(
        eligible: &[(&WorkOrder, NaiveDateTime, NaiveDateTime)],
        as_of: NaiveDateTime,
        window_days: i64,
        windows_ago: i64,
    ) -> Option<Decimal> {
        let window_end = as_of - Duration::days(window_days * windows_ago);
        let window_start = window_end - Duration::days(window_days);
        let in_window: Vec<&(&WorkOrder, NaiveDateTime, NaiveDateTime)> = eligible
            .iter()
            .filter(|(_, closed, _)| *closed > window_start && *closed <= window_end)
            .collect();
        if in_window.is_empty() {
            return None;
        }
        let on_time = in_window
            .iter()
            .filter(|(_, closed, promised)| closed <= promised)
            .count() as u64;
        Some(Self::percent(on_time, in_window.len()))
    }
}
