//! 快照分類（缺口、覆蓋天數、補貨建議動作）

use dash_core::{PlannerAction, SnapshotInput, SnapshotRow};
use rust_decimal::Decimal;

/// 快照分類器
///
/// 純函數：相同輸入必得相同輸出，不讀取任何外部狀態。
pub struct Classifier;

impl Classifier {
    /// 對單一快照列計算缺口、覆蓋天數與建議動作
    ///
    /// 規則順序：
    /// 1. 門檻取安全庫存，安全庫存為 0 時退用最低在庫量
    /// 2. 可用量缺漏時以現有庫存為準
    /// 3. 缺口 = max(0, 需求 - (現有 + 在途))
    /// 4. 低於門檻或有缺口即視為短缺（兩個訊號任一成立）
    /// 5. 門檻與需求皆為 0 的料件永不標記（零門檻料件不產生告警）
    /// 6. 短缺且需要備貨時：有在途 → Expedite，無在途 → RaisePO
    pub fn classify(input: &SnapshotInput) -> SnapshotRow {
        let threshold = if input.safety_stock != Decimal::ZERO {
            input.safety_stock
        } else {
            input.min_on_hand
        };

        let basis_available = input.available.unwrap_or(input.on_hand);
        let below_safety = basis_available < threshold;

        let gap = (input.demand_qty - (input.on_hand + input.inbound_qty)).max(Decimal::ZERO);

        let shortage = below_safety || gap > Decimal::ZERO;
        let needs_stock = threshold > Decimal::ZERO || input.demand_qty > Decimal::ZERO;
        let has_inbound = input.inbound_qty > Decimal::ZERO;

        let action = if shortage && needs_stock {
            if has_inbound {
                PlannerAction::Expedite
            } else {
                PlannerAction::RaisePo
            }
        } else {
            PlannerAction::Ok
        };

        // 平均日需求未知或為 0 時覆蓋天數保持未知，不得折算成 0 或無限大
        let cover_days = match input.avg_daily_demand {
            Some(rate) if rate > Decimal::ZERO => {
                Some((input.on_hand + input.inbound_qty) / rate)
            }
            _ => None,
        };

        SnapshotRow {
            item_id: input.item_id.clone(),
            site: input.site.clone(),
            warehouse: input.warehouse.clone(),
            on_hand: input.on_hand,
            available: input.available,
            safety_stock: input.safety_stock,
            min_on_hand: input.min_on_hand,
            inbound_qty: input.inbound_qty,
            next_eta: input.next_eta,
            demand_qty: input.demand_qty,
            gap,
            cover_days,
            action,
        }
    }

    /// 分類整批快照列
    pub fn classify_all(inputs: &[SnapshotInput]) -> Vec<SnapshotRow> {
        inputs.iter().map(Self::classify).collect()
    }
}
