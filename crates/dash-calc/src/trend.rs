//! 週趨勢統計

use chrono::{Duration, NaiveDateTime};
use dash_core::WorkOrder;
use serde::Serialize;

/// 趨勢方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrendDirection {
    /// 積壓增加
    Up,
    /// 積壓減少
    Down,
    /// 持平
    Flat,
}

/// 滾動週趨勢（新開單對結案的淨變化）
///
/// 「本週」是結束於 `as_of` 的滾動視窗，不是日曆週。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyTrend {
    /// 視窗內新建工單數
    pub opens_this_week: u64,

    /// 視窗內結案工單數
    pub closed_this_week: u64,

    /// 淨變化（新建 - 結案）
    pub net_change: i64,

    /// 趨勢方向
    pub direction: TrendDirection,
}

/// 週趨勢統計器
pub struct TrendCalculator;

impl TrendCalculator {
    /// 計算滾動視窗內的開結單趨勢
    pub fn weekly(
        work_orders: &[WorkOrder],
        as_of: NaiveDateTime,
        window_days: i64,
    ) -> WeeklyTrend {
        let window_start = as_of - Duration::days(window_days);

        let opens = work_orders
            .iter()
            .filter(|wo| wo.created_date >= window_start && wo.created_date <= as_of)
            .count() as u64;

        let closes = work_orders
            .iter()
            .filter(|wo| {
                wo.closed_date
                    .is_some_and(|closed| closed >= window_start && closed <= as_of)
            })
            .count() as u64;

        let net_change = opens as i64 - closes as i64;
        let direction = if net_change > 0 {
            TrendDirection::Up
        } else if net_change < 0 {
            TrendDirection::Down
        } else {
            TrendDirection::Flat
        };

        WeeklyTrend {
            opens_this_week: opens,
            closed_this_week: closes,
            net_change,
            direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dash_core::WorkOrderStatus;

    fn dt(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn created(id: &str, created: NaiveDateTime) -> WorkOrder {
        WorkOrder::new(
            id.to_string(),
            WorkOrderStatus::Unscheduled,
            "L-QLD".to_string(),
            created,
        )
    }

    #[test]
    fn test_weekly_trend_up() {
        let as_of = dt(2025, 11, 28);
        let orders = vec![
            created("WO-1", dt(2025, 11, 25)),
            created("WO-2", dt(2025, 11, 27)),
            // 視窗外的舊單
            created("WO-3", dt(2025, 11, 1)),
            // 視窗內結案一筆
            created("WO-4", dt(2025, 11, 10)).with_closed_date(dt(2025, 11, 26)),
        ];

        let trend = TrendCalculator::weekly(&orders, as_of, 7);

        assert_eq!(trend.opens_this_week, 2);
        assert_eq!(trend.closed_this_week, 1);
        assert_eq!(trend.net_change, 1);
        assert_eq!(trend.direction, TrendDirection::Up);
    }

    #[test]
    fn test_weekly_trend_down_and_flat() {
        let as_of = dt(2025, 11, 28);
        let closing = vec![
            created("WO-1", dt(2025, 11, 1)).with_closed_date(dt(2025, 11, 27)),
            created("WO-2", dt(2025, 11, 1)).with_closed_date(dt(2025, 11, 26)),
        ];
        let trend = TrendCalculator::weekly(&closing, as_of, 7);
        assert_eq!(trend.net_change, -2);
        assert_eq!(trend.direction, TrendDirection::Down);

        let trend = TrendCalculator::weekly(&[], as_of, 7);
        assert_eq!(trend.net_change, 0);
        assert_eq!(trend.direction, TrendDirection::Flat);
    }

    #[test]
    fn test_rolling_window_not_calendar_week() {
        // 視窗是滾動 7 天：恰好 7 天前的建立時間仍算在內
        let as_of = dt(2025, 11, 28);
        let boundary = vec![created("WO-1", as_of - chrono::Duration::days(7))];

        let trend = TrendCalculator::weekly(&boundary, as_of, 7);
        assert_eq!(trend.opens_this_week, 1);
    }
}
