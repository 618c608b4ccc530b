//! 指標卡視圖模型

use dash_calc::{WeeklyTrend, WorstBucket};
use dash_core::{DeltaType, KpiResult};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::colors;
use crate::format::{format_compact_currency, format_number};

/// 數值顯示方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueStyle {
    /// 筆數
    Count,
    /// 金額（AUD）
    Currency,
    /// 百分比
    Percent,
    /// 天數
    Days,
}

/// 指標卡視圖模型（渲染層直接取用的扁平結構）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiCard {
    /// 卡片標題
    pub title: String,

    /// 主數值的顯示字串
    pub value_text: String,

    /// 變化量的顯示字串（含方向符號）
    pub delta_text: Option<String>,

    /// 變化方向顏色
    pub delta_color: Option<&'static str>,

    /// 說明文字
    pub caption: Option<String>,

    /// 主題色
    pub color: &'static str,

    /// 分組明細（已格式化）
    pub breakdown: Vec<(String, String)>,
}

impl KpiCard {
    /// 由 KPI 結果組出指標卡
    pub fn from_kpi(title: &str, kpi: &KpiResult, style: ValueStyle, color: &'static str) -> Self {
        let value_text = Self::format_value(kpi.value, style);

        let delta_text = match (kpi.delta, kpi.delta_type) {
            (Some(delta), Some(DeltaType::Increase)) => Some(format!("▲ {delta}")),
            (Some(delta), Some(DeltaType::Decrease)) => Some(format!("▼ {delta}")),
            _ => None,
        };
        let delta_color = kpi.delta_type.map(colors::delta_color);

        let breakdown = kpi
            .breakdown
            .as_ref()
            .map(|groups| {
                groups
                    .iter()
                    .map(|(label, value)| {
                        (label.clone(), Self::format_value(*value, style))
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            title: title.to_string(),
            value_text,
            delta_text,
            delta_color,
            caption: kpi.caption.clone(),
            color,
            breakdown,
        }
    }

    /// 週趨勢卡（開單對結案）
    pub fn from_weekly_trend(trend: &WeeklyTrend) -> Self {
        let caption = format!(
            "{} opened / {} closed in last 7 days",
            trend.opens_this_week, trend.closed_this_week
        );
        Self {
            title: "Weekly Trend".to_string(),
            value_text: format!("{:+}", trend.net_change),
            delta_text: None,
            delta_color: None,
            caption: Some(caption),
            color: colors::NEUTRAL,
            breakdown: Vec::new(),
        }
    }

    /// 最嚴重帳齡桶卡
    pub fn from_worst_bucket(worst: &WorstBucket, bucket_index: usize) -> Self {
        Self {
            title: "Ageing (Worst)".to_string(),
            value_text: format_number(Decimal::from(worst.count)),
            delta_text: None,
            delta_color: None,
            caption: Some(worst.label.clone()),
            color: colors::ageing_bucket_color(bucket_index),
            breakdown: Vec::new(),
        }
    }

    fn format_value(value: Decimal, style: ValueStyle) -> String {
        match style {
            ValueStyle::Count => format_number(value),
            ValueStyle::Currency => format_compact_currency(value, "AUD"),
            ValueStyle::Percent => format!("{value}%"),
            ValueStyle::Days => format!("{value} days"),
        }
    }
}
