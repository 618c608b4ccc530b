//! 狀態標籤與倉儲狀態代碼對照

use dash_core::WorkOrderStatus;

/// 把使用者面的狀態標籤轉成倉儲查詢用的狀態代碼
///
/// 未知標籤直接丟棄（不傳給查詢層，也不報錯）。
pub fn resolve_status_codes(labels: &[String]) -> Vec<u32> {
    labels
        .iter()
        .filter_map(|label| WorkOrderStatus::from_label(label))
        .map(|status| status.warehouse_code())
        .collect()
}

/// 未指定狀態時的預設查詢範圍：在製狀態
pub fn default_wip_codes() -> Vec<u32> {
    WorkOrderStatus::WIP
        .iter()
        .map(|status| status.warehouse_code())
        .collect()
}

/// 全部可選的狀態標籤（篩選器選單用）
pub fn status_labels() -> Vec<&'static str> {
    WorkOrderStatus::ALL.iter().map(|s| s.label()).collect()
}
