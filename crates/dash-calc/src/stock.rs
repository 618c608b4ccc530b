//! 庫存健康統計（安全庫存、緊缺料件、快照摘要）

use chrono::{Duration, NaiveDate};
use dash_core::{KpiResult, SnapshotRow};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// 快照摘要（快照頁的統計列）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotSummary {
    /// 料件總數
    pub total_items: u64,

    /// 需要處理的料件數（動作 ≠ OK）
    pub critical_items: u64,

    /// 依動作分組
    pub action_breakdown: BTreeMap<String, u64>,

    /// 平均覆蓋天數（只取覆蓋天數 > 0 的列，四捨五入到整數）
    pub average_cover_days: Decimal,
}

/// 庫存健康統計器
pub struct StockHealthCalculator;

impl StockHealthCalculator {
    /// 低於安全庫存的料件數，附站點分組
    ///
    /// 這裡刻意用原始現有量對安全庫存的簡單比較，
    /// 與分類器的可用量/替代門檻邏輯不同。
    pub fn parts_below_safety(snapshot: &[SnapshotRow]) -> KpiResult {
        let below: Vec<&SnapshotRow> = snapshot
            .iter()
            .filter(|row| row.is_below_safety_raw())
            .collect();

        if below.is_empty() {
            return KpiResult::zero("No parts below safety stock");
        }

        let mut breakdown: BTreeMap<String, Decimal> = BTreeMap::new();
        for row in &below {
            *breakdown.entry(row.site.clone()).or_insert(Decimal::ZERO) += Decimal::ONE;
        }

        KpiResult::new(Decimal::from(below.len()))
            .with_caption(format!("{} parts below safety stock", below.len()))
            .with_breakdown(breakdown)
    }

    /// 低於安全庫存且完全沒有在途供應的料件數，附動作分組
    pub fn below_safety_no_supply(snapshot: &[SnapshotRow]) -> KpiResult {
        let urgent: Vec<&SnapshotRow> = snapshot
            .iter()
            .filter(|row| row.is_below_safety_raw() && row.has_no_inbound())
            .collect();

        if urgent.is_empty() {
            return KpiResult::zero("No parts below safety without supply");
        }

        let mut breakdown: BTreeMap<String, Decimal> = BTreeMap::new();
        for row in &urgent {
            *breakdown
                .entry(row.action.label().to_string())
                .or_insert(Decimal::ZERO) += Decimal::ONE;
        }

        KpiResult::new(Decimal::from(urgent.len()))
            .with_caption(format!("{} parts need immediate action", urgent.len()))
            .with_breakdown(breakdown)
    }

    /// 緊缺料件數：有缺口且供應來不及
    ///
    /// 來不及 = 無在途、或最早到貨日超過寬限天數、或到貨日未知。
    pub fn critical_items(
        snapshot: &[SnapshotRow],
        as_of: NaiveDate,
        grace_days: i64,
    ) -> KpiResult {
        let deadline = as_of + Duration::days(grace_days);
        let critical: Vec<&SnapshotRow> = snapshot
            .iter()
            .filter(|row| {
                row.gap > Decimal::ZERO
                    && (row.has_no_inbound() || row.next_eta.map_or(true, |eta| eta > deadline))
            })
            .collect();

        if critical.is_empty() {
            return KpiResult::zero("No critical items");
        }

        let mut breakdown: BTreeMap<String, Decimal> = BTreeMap::new();
        for row in &critical {
            *breakdown.entry(row.site.clone()).or_insert(Decimal::ZERO) += Decimal::ONE;
        }

        KpiResult::new(Decimal::from(critical.len()))
            .with_caption(format!("{} critical items", critical.len()))
            .with_breakdown(breakdown)
    }

    /// 快照摘要統計
    pub fn snapshot_summary(snapshot: &[SnapshotRow]) -> SnapshotSummary {
        let mut action_breakdown: BTreeMap<String, u64> = BTreeMap::new();
        for row in snapshot {
            *action_breakdown
                .entry(row.action.label().to_string())
                .or_insert(0) += 1;
        }

        let critical_items = snapshot.iter().filter(|row| row.needs_attention()).count() as u64;

        let covered: Vec<Decimal> = snapshot
            .iter()
            .filter_map(|row| row.cover_days)
            .filter(|days| *days > Decimal::ZERO)
            .collect();
        let average_cover_days = if covered.is_empty() {
            Decimal::ZERO
        } else {
            (covered.iter().copied().sum::<Decimal>() / Decimal::from(covered.len())).round_dp(0)
        };

        SnapshotSummary {
            total_items: snapshot.len() as u64,
            critical_items,
            action_breakdown,
            average_cover_days,
        }
    }
}
