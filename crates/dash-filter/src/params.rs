//! 篩選參數正規化

use chrono::NaiveDate;
use dash_core::{PlannerConfig, SnapshotRow};
use serde::{Deserialize, Serialize};

use crate::sites::map_sites_to_codes;
use crate::status::{default_wip_codes, resolve_status_codes};

/// 使用者面的篩選參數（URL/表單原始值）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterParams {
    /// 站點（顯示名稱或代碼，混用皆可）
    #[serde(default)]
    pub sites: Option<Vec<String>>,

    /// 狀態標籤
    #[serde(default)]
    pub statuses: Option<Vec<String>>,

    /// 優先級標籤
    #[serde(default)]
    pub priority: Option<String>,

    /// 起日（ISO 字串）
    #[serde(default)]
    pub from: Option<String>,

    /// 迄日（ISO 字串）
    #[serde(default)]
    pub to: Option<String>,

    /// 期界天數（字串原值，可能不是數字）
    #[serde(default)]
    pub horizon: Option<String>,

    /// 只看例外（動作 ≠ OK）
    #[serde(default)]
    pub only_exceptions: bool,
}

/// 正規化後的查詢參數（查詢層與計算層吃這個）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryParams {
    /// 站點代碼
    pub site_codes: Option<Vec<String>>,

    /// 倉儲狀態代碼（未指定時為在製狀態預設集；空集表示不過濾）
    pub status_codes: Vec<u32>,

    /// 優先級標籤（原樣傳遞）
    pub priority: Option<String>,

    /// 起日
    pub from: Option<NaiveDate>,

    /// 迄日
    pub to: Option<NaiveDate>,

    /// 期界天數
    pub horizon_days: u32,

    /// 只看例外
    pub only_exceptions: bool,
}

/// 把使用者面的篩選值正規化成查詢參數
pub fn normalize_filters(params: &FilterParams, config: &PlannerConfig) -> QueryParams {
    // 未指定狀態 → 在製預設集；有指定 → 丟掉未知標籤後照傳
    // （全部未知時變成空集，查詢層視為不加狀態條件）
    let status_codes = match &params.statuses {
        Some(labels) if !labels.is_empty() => resolve_status_codes(labels),
        _ => default_wip_codes(),
    };

    QueryParams {
        site_codes: map_sites_to_codes(params.sites.as_deref()),
        status_codes,
        priority: params.priority.clone(),
        from: params.from.as_deref().and_then(parse_iso_date),
        to: params.to.as_deref().and_then(parse_iso_date),
        horizon_days: parse_horizon(params.horizon.as_deref(), config.default_horizon_days),
        only_exceptions: params.only_exceptions,
    }
}

/// 解析期界天數；缺漏或不是數字時用預設值
pub fn parse_horizon(value: Option<&str>, default_days: u32) -> u32 {
    value
        .and_then(|v| v.trim().parse::<u32>().ok())
        .unwrap_or(default_days)
}

/// 解析 ISO 日期；允許日期或日期時間字串，解析失敗回 None
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if let Ok(date) = trimmed.parse::<NaiveDate>() {
        return Some(date);
    }
    trimmed
        .parse::<chrono::NaiveDateTime>()
        .map(|dt| dt.date())
        .ok()
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(trimmed)
                .map(|dt| dt.date_naive())
                .ok()
        })
}

/// 套用「只看例外」：保留動作 ≠ OK 的快照列
pub fn apply_only_exceptions(rows: Vec<SnapshotRow>, only_exceptions: bool) -> Vec<SnapshotRow> {
    if !only_exceptions {
        return rows;
    }
    rows.into_iter().filter(|row| row.needs_attention()).collect()
}
