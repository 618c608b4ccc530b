//! 指標卡與徽章的固定色票

use dash_core::{DeltaType, PlannerAction, Priority};

/// 找不到對應時的中性灰
pub const NEUTRAL: &str = "#6b7280";

/// 動作徽章顏色
pub fn action_color(action: PlannerAction) -> &'static str {
    match action {
        PlannerAction::Ok => "#10b981",
        PlannerAction::Expedite => "#f59e0b",
        PlannerAction::Transfer => "#06b6d4",
        PlannerAction::RaisePo => "#ef4444",
        PlannerAction::Reallocate => "#8b5cf6",
    }
}

/// 帳齡分桶顏色（由淺到深，索引超界給中性灰）
pub fn ageing_bucket_color(bucket_index: usize) -> &'static str {
    const COLORS: [&str; 4] = ["#10b981", "#f59e0b", "#ef4444", "#991b1b"];
    COLORS.get(bucket_index).copied().unwrap_or(NEUTRAL)
}

/// 優先級顏色
pub fn priority_color(priority: Priority) -> &'static str {
    match priority {
        Priority::Critical => "#dc2626",
        Priority::High => "#ea580c",
        Priority::Normal => "#65a30d",
        Priority::Low => "#6b7280",
    }
}

/// 變化方向顏色（積壓上升是壞事，標紅）
pub fn delta_color(delta_type: DeltaType) -> &'static str {
    match delta_type {
        DeltaType::Increase => "#ef4444",
        DeltaType::Decrease => "#10b981",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_action_has_a_color() {
        let actions = [
            PlannerAction::Ok,
            PlannerAction::Expedite,
            PlannerAction::RaisePo,
            PlannerAction::Transfer,
            PlannerAction::Reallocate,
        ];
        for action in actions {
            assert!(action_color(action).starts_with('#'));
        }
    }

    #[test]
    fn test_ageing_colors_escalate() {
        assert_eq!(ageing_bucket_color(0), "#10b981");
        assert_eq!(ageing_bucket_color(3), "#991b1b");
        // 超出範圍 → 中性灰
        assert_eq!(ageing_bucket_color(9), NEUTRAL);
    }
}
