//! KPI 結果封裝

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 變化方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeltaType {
    /// 上升
    Increase,
    /// 下降
    Decrease,
}

/// KPI 計算結果（所有彙總函數的統一輸出格式）
///
/// 空集合輸入時 value 為 0 並附帶說明文字，不會回傳錯誤。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiResult {
    /// 主要數值
    pub value: Decimal,

    /// 相對變化量
    #[serde(default)]
    pub delta: Option<Decimal>,

    /// 變化方向
    #[serde(default)]
    pub delta_type: Option<DeltaType>,

    /// 說明文字
    #[serde(default)]
    pub caption: Option<String>,

    /// 分組明細（BTreeMap 保證輸出順序穩定）
    #[serde(default)]
    pub breakdown: Option<BTreeMap<String, Decimal>>,
}

impl KpiResult {
    /// 創建新的 KPI 結果
    pub fn new(value: Decimal) -> Self {
        Self {
            value,
            delta: None,
            delta_type: None,
            caption: None,
            breakdown: None,
        }
    }

    /// 零值結果（空集合時使用，附帶說明文字）
    pub fn zero(caption: impl Into<String>) -> Self {
        Self::new(Decimal::ZERO).with_caption(caption)
    }

    /// 建構器模式：設置說明文字
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// 建構器模式：設置變化量與方向
    pub fn with_delta(mut self, delta: Decimal, delta_type: DeltaType) -> Self {
        self.delta = Some(delta);
        self.delta_type = Some(delta_type);
        self
    }

    /// 建構器模式：設置分組明細
    pub fn with_breakdown(mut self, breakdown: BTreeMap<String, Decimal>) -> Self {
        self.breakdown = Some(breakdown);
        self
    }

    /// 分組明細的合計（無明細時為 0）
    pub fn breakdown_total(&self) -> Decimal {
        self.breakdown
            .as_ref()
            .map(|b| b.values().copied().sum())
            .unwrap_or(Decimal::ZERO)
    }
}

/// 帳齡分桶
///
/// 半開區間：`min_days <= age < max_days`；最後一桶無上界。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeingBucket {
    /// 顯示標籤
    pub label: String,

    /// 下界（含）
    pub min_days: u32,

    /// 上界（不含；最後一桶為 None）
    pub max_days: Option<u32>,

    /// 桶內工單數
    pub count: u64,
}

impl AgeingBucket {
    /// 創建新的空分桶
    pub fn new(label: String, min_days: u32, max_days: Option<u32>) -> Self {
        Self {
            label,
            min_days,
            max_days,
            count: 0,
        }
    }

    /// 檢查帳齡是否落入此桶
    pub fn covers(&self, age_days: i64) -> bool {
        if age_days < i64::from(self.min_days) {
            return false;
        }
        match self.max_days {
            Some(max) => age_days < i64::from(max),
            None => true,
        }
    }
}
