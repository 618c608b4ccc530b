//! 集成測試

use chrono::{NaiveDate, NaiveDateTime};
use dash::filter::{apply_only_exceptions, normalize_filters, FilterParams};
use dash::view::{KpiCard, ValueStyle};
use dash::{
    DashboardCalculator, DemandKind, DemandLine, PlannerAction, PlannerConfig, Priority,
    SnapshotInput, SupplyLine, SupplySource, WorkOrder, WorkOrderStatus,
};
use rust_decimal::Decimal;

fn dt(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap()
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn test_full_dashboard_pipeline() {
    // 場景：單一站點，混合在製與已過帳工單，三種庫存狀況
    let as_of = dt(2025, 11, 18);
    let calculator = DashboardCalculator::new(PlannerConfig::default()).unwrap();

    let work_orders = vec![
        // 在製：本週新建
        WorkOrder::new(
            "WO-1001".to_string(),
            WorkOrderStatus::Unscheduled,
            "L-QLD".to_string(),
            dt(2025, 11, 16),
        )
        .with_wip_value(Decimal::from(500))
        .with_labour_cost(Decimal::from(120))
        .with_parts_cost(Decimal::from(280)),
        // 在製：帳齡 20 天
        WorkOrder::new(
            "WO-1002".to_string(),
            WorkOrderStatus::InProgress,
            "L-QLD".to_string(),
            dt(2025, 10, 29),
        )
        .with_priority(Priority::High)
        .with_wip_value(Decimal::from(1500))
        .with_labour_cost(Decimal::from(400))
        .with_parts_cost(Decimal::from(600)),
        // 本月過帳三筆：100 + 200 + 300
        WorkOrder::new(
            "WO-2001".to_string(),
            WorkOrderStatus::Posted,
            "L-QLD".to_string(),
            dt(2025, 10, 25),
        )
        .with_start_date(dt(2025, 10, 27))
        .with_closed_date(dt(2025, 11, 3))
        .with_promised_date(dt(2025, 11, 5))
        .with_total_amount(Decimal::from(100))
        .with_gross_margin(Decimal::from(20)),
        WorkOrder::new(
            "WO-2002".to_string(),
            WorkOrderStatus::Posted,
            "L-QLD".to_string(),
            dt(2025, 11, 1),
        )
        .with_start_date(dt(2025, 11, 2))
        .with_closed_date(dt(2025, 11, 10))
        .with_promised_date(dt(2025, 11, 8))
        .with_total_amount(Decimal::from(200))
        .with_gross_margin(Decimal::from(30)),
        WorkOrder::new(
            "WO-2003".to_string(),
            WorkOrderStatus::Posted,
            "L-QLD".to_string(),
            dt(2025, 11, 5),
        )
        .with_start_date(dt(2025, 11, 6))
        .with_closed_date(dt(2025, 11, 17))
        .with_promised_date(dt(2025, 11, 20))
        .with_total_amount(Decimal::from(300))
        .with_gross_margin(Decimal::from(40)),
        // 已取消：不參與任何統計
        WorkOrder::new(
            "WO-9999".to_string(),
            WorkOrderStatus::Canceled,
            "L-QLD".to_string(),
            dt(2025, 11, 1),
        )
        .with_wip_value(Decimal::from(7777)),
    ];

    let snapshot_inputs = vec![
        // 短缺且無在途 → RaisePO
        SnapshotInput::new(
            "FILTER-OIL-01".to_string(),
            "L-QLD".to_string(),
            Decimal::from(5),
            Decimal::from(10),
        )
        .with_demand_qty(Decimal::from(8)),
        // 短缺但有在途 → Expedite
        SnapshotInput::new(
            "BELT-DRIVE-02".to_string(),
            "L-QLD".to_string(),
            Decimal::from(5),
            Decimal::from(10),
        )
        .with_inbound_qty(Decimal::from(4))
        .with_next_eta(d(2025, 11, 22))
        .with_demand_qty(Decimal::from(8)),
        // 健康庫存
        SnapshotInput::new(
            "HOSE-HYD-03".to_string(),
            "L-QLD".to_string(),
            Decimal::from(120),
            Decimal::from(20),
        )
        .with_avg_daily_demand(Decimal::from(6)),
    ];

    let report = calculator.compute(&work_orders, &snapshot_inputs, as_of);

    // 未結工單：2 筆在製
    assert_eq!(report.open_work_orders.value, Decimal::from(2));

    // 分類結果
    assert_eq!(report.snapshot[0].action, PlannerAction::RaisePo);
    assert_eq!(report.snapshot[0].gap, Decimal::from(3));
    assert_eq!(report.snapshot[1].action, PlannerAction::Expedite);
    assert_eq!(report.snapshot[2].action, PlannerAction::Ok);
    assert_eq!(report.snapshot[2].cover_days, Some(Decimal::from(20)));

    // 帳齡分桶合計等於在製工單數
    let bucket_total: u64 = report.ageing.iter().map(|b| b.count).sum();
    assert_eq!(bucket_total, 2);
    assert_eq!(report.ageing[0].count, 1); // 2 天
    assert_eq!(report.ageing[1].count, 1); // 20 天
    assert_eq!(report.worst_ageing.label, "14-30 days");

    // 本月營收 = 600，週次明細合計必相等
    assert_eq!(report.month_to_date_revenue.summary.value, Decimal::from(600));
    assert_eq!(
        report.month_to_date_revenue.summary.breakdown_total(),
        Decimal::from(600)
    );

    // 成本占比合計 100%
    let labour_pct = report.labour_and_other_costs.percentage;
    let parts_pct = report.parts_cost.percentage;
    assert_eq!(labour_pct + parts_pct, Decimal::from(100));
    assert_eq!(
        report.open_wip_value.summary.value,
        Decimal::from(2000) // 500 + 1500，取消單不計
    );

    // 解決時間：7、8、11 天 → 平均 8.7
    assert_eq!(
        report.average_resolution_time.summary.value,
        Decimal::new(87, 1)
    );

    // SLA：3 筆有承諾時間，2 準時 1 逾期
    assert_eq!(report.sla_performance.on_time_count, 2);
    assert_eq!(report.sla_performance.late_count, 1);
    assert_eq!(report.sla_performance.average_delay_days, Some(Decimal::from(2)));

    // 毛利率平均 (20+30+40)/3 = 30
    assert_eq!(report.average_gross_margin.summary.value, Decimal::from(30));

    // 庫存 KPI
    assert_eq!(report.parts_below_safety.value, Decimal::from(2));
    assert_eq!(report.below_safety_no_supply.value, Decimal::ONE);
    assert_eq!(report.critical_items.value, Decimal::ONE); // 只有無在途那筆
    assert_eq!(report.snapshot_summary.total_items, 3);
    assert_eq!(report.snapshot_summary.critical_items, 2);

    // 週趨勢：視窗內開 1 筆（WO-1001）、結 1 筆（WO-2003）
    assert_eq!(report.weekly_trend.opens_this_week, 1);
    assert_eq!(report.weekly_trend.closed_this_week, 1);
    assert_eq!(report.weekly_trend.net_change, 0);
}

#[test]
fn test_filters_feed_the_pipeline() {
    // 篩選正規化 → 分類 → 只看例外
    let params = FilterParams {
        sites: Some(vec!["QLD SALES AND SERVICE".to_string()]),
        horizon: Some("not-a-number".to_string()),
        only_exceptions: true,
        ..FilterParams::default()
    };
    let config = PlannerConfig::default();
    let query = normalize_filters(&params, &config);

    assert_eq!(query.site_codes, Some(vec!["L-QLD".to_string()]));
    assert_eq!(query.horizon_days, 30); // 壞輸入退回預設

    let inputs = vec![
        SnapshotInput::new(
            "PART-A".to_string(),
            "L-QLD".to_string(),
            Decimal::from(2),
            Decimal::from(10),
        ),
        SnapshotInput::new(
            "PART-B".to_string(),
            "L-QLD".to_string(),
            Decimal::from(50),
            Decimal::from(10),
        ),
    ];
    let rows = dash::Classifier::classify_all(&inputs);
    let visible = apply_only_exceptions(rows, query.only_exceptions);

    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].item_id, "PART-A");
}

#[test]
fn test_supply_demand_lines_respect_horizon() {
    // 供需明細的期界判斷（查詢層據此裁剪在途/需求量）
    let as_of = d(2025, 11, 1);

    let supply = SupplyLine::new(
        "FILTER-OIL-01".to_string(),
        "L-QLD".to_string(),
        SupplySource::PurchaseOrder,
        "PO-7001".to_string(),
        Decimal::from(40),
    )
    .with_eta(d(2025, 11, 25));
    assert!(supply.is_within_horizon(as_of, 30));
    assert!(!supply.is_within_horizon(as_of, 7));

    let demand = DemandLine::new(
        "FILTER-OIL-01".to_string(),
        "L-QLD".to_string(),
        DemandKind::WorkOrder,
        Decimal::from(8),
    )
    .with_reference("WO-1001".to_string())
    .with_need_by(d(2025, 12, 15));
    assert!(!demand.is_within_horizon(as_of, 30));
}

#[test]
fn test_report_renders_into_cards() {
    // 報告 → 指標卡視圖模型
    let as_of = dt(2025, 11, 18);
    let calculator = DashboardCalculator::new(PlannerConfig::default()).unwrap();

    let work_orders = vec![WorkOrder::new(
        "WO-1".to_string(),
        WorkOrderStatus::InProgress,
        "L-QLD".to_string(),
        dt(2025, 11, 14),
    )
    .with_wip_value(Decimal::from(45_200))];

    let report = calculator.compute(&work_orders, &[], as_of);

    let open_card = KpiCard::from_kpi(
        "Open Work Orders",
        &report.open_work_orders,
        ValueStyle::Count,
        "#2563eb",
    );
    assert_eq!(open_card.value_text, "1");

    let wip_card = KpiCard::from_kpi(
        "Open WIP Value",
        &report.open_wip_value.summary,
        ValueStyle::Currency,
        "#7c3aed",
    );
    assert_eq!(wip_card.value_text, "$45K");

    let trend_card = KpiCard::from_weekly_trend(&report.weekly_trend);
    assert_eq!(trend_card.value_text, "+1");
}

#[test]
fn test_empty_world_is_all_zeroes() {
    let calculator = DashboardCalculator::new(PlannerConfig::default()).unwrap();
    let report = calculator.compute(&[], &[], dt(2025, 11, 18));

    assert_eq!(report.open_work_orders.value, Decimal::ZERO);
    assert_eq!(report.month_to_date_revenue.summary.value, Decimal::ZERO);
    assert_eq!(report.average_resolution_time.summary.value, Decimal::ZERO);
    assert_eq!(report.sla_performance.summary.value, Decimal::ZERO);
    assert_eq!(report.parts_below_safety.value, Decimal::ZERO);
    assert_eq!(report.critical_items.value, Decimal::ZERO);
    assert_eq!(report.worst_ageing.count, 0);
    assert!(report
        .ageing
        .iter()
        .all(|bucket| bucket.count == 0));
}
