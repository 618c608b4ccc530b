//! 計劃參數配置

use serde::{Deserialize, Serialize};

use crate::{DashError, Result};

/// 儀表板計算參數
///
/// 這些是部署期常數，不是使用者可在執行期調整的輸入。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// 帳齡分桶邊界（天），必須嚴格遞增
    ///
    /// 例如 [14, 30, 60] 產生四桶：<14、14-30、30-60、>=60。
    pub ageing_bounds: [u32; 3],

    /// 預設供需期界（天）
    pub default_horizon_days: u32,

    /// 緊缺判定的到貨寬限（天）：到貨日超過此天數視為來不及
    pub critical_eta_grace_days: i64,

    /// 滾動趨勢視窗（天）
    pub trend_window_days: i64,

    /// 解決時間趨勢回看週數
    pub resolution_trend_weeks: u32,

    /// 倉儲資料區域標記（原樣傳遞給查詢層）
    pub data_area: Option<String>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            ageing_bounds: [14, 30, 60],
            default_horizon_days: 30,
            critical_eta_grace_days: 7,
            trend_window_days: 7,
            resolution_trend_weeks: 4,
            data_area: None,
        }
    }
}

impl PlannerConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：設置帳齡分桶邊界
    pub fn with_ageing_bounds(mut self, bounds: [u32; 3]) -> Self {
        self.ageing_bounds = bounds;
        self
    }

    /// 建構器模式：設置預設期界
    pub fn with_default_horizon_days(mut self, days: u32) -> Self {
        self.default_horizon_days = days;
        self
    }

    /// 建構器模式：設置到貨寬限
    pub fn with_critical_eta_grace_days(mut self, days: i64) -> Self {
        self.critical_eta_grace_days = days;
        self
    }

    /// 建構器模式：設置趨勢視窗
    pub fn with_trend_window_days(mut self, days: i64) -> Self {
        self.trend_window_days = days;
        self
    }

    /// 建構器模式：設置資料區域
    pub fn with_data_area(mut self, data_area: String) -> Self {
        self.data_area = Some(data_area);
        self
    }

    /// 驗證配置
    pub fn validate(&self) -> Result<()> {
        if !(self.ageing_bounds[0] < self.ageing_bounds[1]
            && self.ageing_bounds[1] < self.ageing_bounds[2])
        {
            return Err(DashError::InvalidAgeingBounds(format!(
                "帳齡分界必須嚴格遞增: {:?}",
                self.ageing_bounds
            )));
        }
        if self.ageing_bounds[0] == 0 {
            return Err(DashError::InvalidAgeingBounds(
                "第一個分界必須大於 0".to_string(),
            ));
        }
        if self.default_horizon_days == 0 {
            return Err(DashError::InvalidConfig(
                "期界天數必須大於 0".to_string(),
            ));
        }
        if self.trend_window_days <= 0 {
            return Err(DashError::InvalidConfig(
                "趨勢視窗必須大於 0".to_string(),
            ));
        }
        if self.resolution_trend_weeks == 0 {
            return Err(DashError::InvalidConfig(
                "趨勢回看週數必須大於 0".to_string(),
            ));
        }
        Ok(())
    }
}
