//! 營收與毛利統計

use chrono::{Datelike, NaiveDateTime};
use dash_core::{KpiResult, WorkOrder, WorkOrderStatus};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// 本月營收 KPI
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueKpi {
    /// 主結果：本月過帳營收合計，分組明細為月內週次
    pub summary: KpiResult,

    /// 依站點分組
    pub by_site: BTreeMap<String, Decimal>,

    /// 依服務類型分組
    pub by_service_type: BTreeMap<String, Decimal>,
}

/// 平均毛利率 KPI
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarginKpi {
    /// 主結果：全部過帳工單的平均毛利率（百分比，1 位小數）
    pub summary: KpiResult,

    /// 本月結案工單的平均毛利率（本月無結案時為 None）
    pub current_month_average: Option<Decimal>,

    /// 依狀態分組的平均毛利率
    pub by_status: BTreeMap<String, Decimal>,

    /// 依站點分組的平均毛利率
    pub by_site: BTreeMap<String, Decimal>,

    /// 依優先級分組的平均毛利率
    pub by_priority: BTreeMap<String, Decimal>,
}

/// 營收統計器
pub struct RevenueCalculator;

impl RevenueCalculator {
    /// 本月過帳營收
    ///
    /// 只計 Posted 且結案時間落在 `as_of` 當月的工單。
    /// 週次分組為月初起算的連續 7 天區段，最後一段截到月底。
    pub fn month_to_date(work_orders: &[WorkOrder], as_of: NaiveDateTime) -> RevenueKpi {
        let posted: Vec<&WorkOrder> = work_orders
            .iter()
            .filter(|wo| wo.status == WorkOrderStatus::Posted)
            .filter(|wo| {
                wo.closed_date.is_some_and(|closed| {
                    closed.year() == as_of.year() && closed.month() == as_of.month()
                })
            })
            .collect();

        if posted.is_empty() {
            return RevenueKpi {
                summary: KpiResult::zero("No posted work orders this month"),
                by_site: BTreeMap::new(),
                by_service_type: BTreeMap::new(),
            };
        }

        let total: Decimal = posted.iter().map(|wo| wo.total_amount).sum();

        let mut by_week: BTreeMap<String, Decimal> = BTreeMap::new();
        let mut by_site: BTreeMap<String, Decimal> = BTreeMap::new();
        let mut by_service_type: BTreeMap<String, Decimal> = BTreeMap::new();
        for wo in &posted {
            let Some(closed) = wo.closed_date else {
                continue;
            };
            let week = (closed.day() - 1) / 7 + 1;
            *by_week
                .entry(format!("Week {week}"))
                .or_insert(Decimal::ZERO) += wo.total_amount;
            *by_site.entry(wo.site.clone()).or_insert(Decimal::ZERO) += wo.total_amount;
            *by_service_type
                .entry(wo.service_type.label().to_string())
                .or_insert(Decimal::ZERO) += wo.total_amount;
        }

        RevenueKpi {
            summary: KpiResult::new(total)
                .with_caption(format!("{} work orders posted this month", posted.len()))
                .with_breakdown(by_week),
            by_site,
            by_service_type,
        }
    }

    /// 平均毛利率（Posted 工單）
    pub fn average_gross_margin(work_orders: &[WorkOrder], as_of: NaiveDateTime) -> MarginKpi {
        let posted: Vec<&WorkOrder> = work_orders
            .iter()
            .filter(|wo| wo.status == WorkOrderStatus::Posted)
            .collect();

        if posted.is_empty() {
            return MarginKpi {
                summary: KpiResult::zero("No posted work orders"),
                current_month_average: None,
                by_status: BTreeMap::new(),
                by_site: BTreeMap::new(),
                by_priority: BTreeMap::new(),
            };
        }

        let average = Self::mean_margin(posted.iter().copied());

        let this_month: Vec<&WorkOrder> = posted
            .iter()
            .copied()
            .filter(|wo| {
                wo.closed_date.is_some_and(|closed| {
                    closed.year() == as_of.year() && closed.month() == as_of.month()
                })
            })
            .collect();
        let current_month_average = if this_month.is_empty() {
            None
        } else {
            Some(Self::mean_margin(this_month.iter().copied()))
        };

        let by_status = Self::grouped_mean(&posted, |wo| wo.status.label().to_string());
        let by_site = Self::grouped_mean(&posted, |wo| wo.site.clone());
        let by_priority = Self::grouped_mean(&posted, |wo| wo.priority.label().to_string());

        MarginKpi {
            summary: KpiResult::new(average)
                .with_caption(format!("across {} posted work orders", posted.len())),
            current_month_average,
            by_status,
            by_site,
            by_priority,
        }
    }

    fn mean_margin<'a>(orders: impl Iterator<Item = &'a WorkOrder>) -> Decimal {
        let margins: Vec<Decimal> = orders.map(|wo| wo.gross_margin).collect();
        if margins.is_empty() {
            return Decimal::ZERO;
        }
        (margins.iter().copied().sum::<Decimal>() / Decimal::from(margins.len())).round_dp(1)
    }

    fn grouped_mean(
        orders: &[&WorkOrder],
        key: impl Fn(&WorkOrder) -> String,
    ) -> BTreeMap<String, Decimal> {
        let mut groups: BTreeMap<String, Vec<Decimal>> = BTreeMap::new();
        for wo in orders {
            groups.entry(key(wo)).or_default().push(wo.gross_margin);
        }
        groups
            .into_iter()
            .map(|(k, margins)| {
                let mean = (margins.iter().copied().sum::<Decimal>()
                    / Decimal::from(margins.len()))
                .round_dp(1);
                (k, mean)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(15, 0, 0)
            .unwrap()
    }

    fn posted(id: &str, closed: NaiveDateTime, amount: i64, margin: i64) -> WorkOrder {
        WorkOrder::new(
            id.to_string(),
            WorkOrderStatus::Posted,
            "L-QLD".to_string(),
            closed - chrono::Duration::days(10),
        )
        .with_closed_date(closed)
        .with_total_amount(Decimal::from(amount))
        .with_gross_margin(Decimal::from(margin))
    }

    #[test]
    fn test_month_to_date_revenue() {
        let as_of = dt(2025, 11, 18);
        let orders = vec![
            posted("WO-1", dt(2025, 11, 3), 100, 20),
            posted("WO-2", dt(2025, 11, 10), 200, 30),
            posted("WO-3", dt(2025, 11, 17), 300, 40),
            // 上個月結案：不計入
            posted("WO-4", dt(2025, 10, 28), 999, 10),
            // 在製：不計入
            WorkOrder::new(
                "WO-5".to_string(),
                WorkOrderStatus::InProgress,
                "L-QLD".to_string(),
                dt(2025, 11, 1),
            ),
        ];

        let kpi = RevenueCalculator::month_to_date(&orders, as_of);

        assert_eq!(kpi.summary.value, Decimal::from(600));
        // 週次明細合計必等於總營收
        assert_eq!(kpi.summary.breakdown_total(), Decimal::from(600));

        let weeks = kpi.summary.breakdown.unwrap();
        assert_eq!(weeks.get("Week 1"), Some(&Decimal::from(100))); // 11/3
        assert_eq!(weeks.get("Week 2"), Some(&Decimal::from(200))); // 11/10
        assert_eq!(weeks.get("Week 3"), Some(&Decimal::from(300))); // 11/17
    }

    #[test]
    fn test_week_of_month_boundaries() {
        let as_of = dt(2025, 11, 30);
        let orders = vec![
            posted("WO-1", dt(2025, 11, 1), 10, 0),  // 第 1 天 → Week 1
            posted("WO-2", dt(2025, 11, 7), 10, 0),  // 第 7 天 → Week 1
            posted("WO-3", dt(2025, 11, 8), 10, 0),  // 第 8 天 → Week 2
            posted("WO-4", dt(2025, 11, 29), 10, 0), // 月尾截斷段 → Week 5
            posted("WO-5", dt(2025, 11, 30), 10, 0),
        ];

        let kpi = RevenueCalculator::month_to_date(&orders, as_of);
        let weeks = kpi.summary.breakdown.unwrap();

        assert_eq!(weeks.get("Week 1"), Some(&Decimal::from(20)));
        assert_eq!(weeks.get("Week 2"), Some(&Decimal::from(10)));
        assert_eq!(weeks.get("Week 5"), Some(&Decimal::from(20)));
    }

    #[test]
    fn test_month_to_date_empty() {
        let kpi = RevenueCalculator::month_to_date(&[], dt(2025, 11, 18));
        assert_eq!(kpi.summary.value, Decimal::ZERO);
        assert_eq!(
            kpi.summary.caption.as_deref(),
            Some("No posted work orders this month")
        );
    }

    #[test]
    fn test_average_gross_margin() {
        let as_of = dt(2025, 11, 18);
        let orders = vec![
            posted("WO-1", dt(2025, 11, 3), 100, 20),
            posted("WO-2", dt(2025, 10, 20), 100, 40),
        ];

        let kpi = RevenueCalculator::average_gross_margin(&orders, as_of);

        // (20 + 40) / 2 = 30.0
        assert_eq!(kpi.summary.value, Decimal::from(30));
        // 本月只有 WO-1
        assert_eq!(kpi.current_month_average, Some(Decimal::from(20)));
        assert_eq!(kpi.by_site.get("L-QLD"), Some(&Decimal::from(30)));
    }

    #[test]
    fn test_average_gross_margin_empty() {
        let kpi = RevenueCalculator::average_gross_margin(&[], dt(2025, 11, 18));
        assert_eq!(kpi.summary.value, Decimal::ZERO);
        assert_eq!(kpi.current_month_average, None);
        assert_eq!(kpi.summary.caption.as_deref(), Some("No posted work orders"));
    }
}
