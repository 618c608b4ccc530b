//! 未結工單與帳齡統計

use chrono::NaiveDateTime;
use dash_core::{AgeingBucket, KpiResult, WorkOrder};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// 最嚴重的帳齡分桶（指標卡顯示用）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorstBucket {
    pub label: String,
    pub count: u64,
}

/// 未結工單統計器
pub struct BacklogCalculator;

impl BacklogCalculator {
    /// 未結工單數（在製狀態），附狀態分組
    pub fn open_work_orders(work_orders: &[WorkOrder]) -> KpiResult {
        let open: Vec<&WorkOrder> = work_orders.iter().filter(|wo| wo.is_wip()).collect();

        if open.is_empty() {
            return KpiResult::zero("No open work orders");
        }

        let mut breakdown: BTreeMap<String, Decimal> = BTreeMap::new();
        for wo in &open {
            *breakdown
                .entry(wo.status.label().to_string())
                .or_insert(Decimal::ZERO) += Decimal::ONE;
        }

        KpiResult::new(Decimal::from(open.len()))
            .with_caption(format!("{} open work orders", open.len()))
            .with_breakdown(breakdown)
    }

    /// 依帳齡將在製工單分桶
    ///
    /// 半開區間：<b0、b0-b1、b1-b2、>=b2。四桶合計必等於在製工單數。
    pub fn ageing_buckets(
        work_orders: &[WorkOrder],
        bounds: &[u32; 3],
        as_of: NaiveDateTime,
    ) -> Vec<AgeingBucket> {
        let mut buckets = vec![
            AgeingBucket::new(format!("0-{} days", bounds[0]), 0, Some(bounds[0])),
            AgeingBucket::new(
                format!("{}-{} days", bounds[0], bounds[1]),
                bounds[0],
                Some(bounds[1]),
            ),
            AgeingBucket::new(
                format!("{}-{} days", bounds[1], bounds[2]),
                bounds[1],
                Some(bounds[2]),
            ),
            AgeingBucket::new(format!(">{} days", bounds[2]), bounds[2], None),
        ];

        for wo in work_orders.iter().filter(|wo| wo.is_wip()) {
            let age = wo.age_days(as_of);
            if let Some(bucket) = buckets.iter_mut().find(|b| b.covers(age)) {
                bucket.count += 1;
            }
        }

        buckets
    }

    /// 取出最嚴重（索引最高且非空）的分桶
    ///
    /// 全部為空時回傳第一桶的標籤與 0。
    pub fn worst_bucket(buckets: &[AgeingBucket]) -> WorstBucket {
        for bucket in buckets.iter().rev() {
            if bucket.count > 0 {
                return WorstBucket {
                    label: bucket.label.clone(),
                    count: bucket.count,
                };
            }
        }
        WorstBucket {
            label: buckets.first().map(|b| b.label.clone()).unwrap_or_default(),
            count: 0,
        }
    }
}
