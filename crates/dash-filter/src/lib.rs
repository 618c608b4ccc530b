//! # Dash Filter
//!
//! 篩選參數正規化：站點對照、狀態代碼對照、期界解析

pub mod params;
pub mod sites;
pub mod status;

// Re-export 主要類型
pub use params::{
    apply_only_exceptions, normalize_filters, parse_horizon, parse_iso_date, FilterParams,
    QueryParams,
};
pub use sites::{map_sites_to_codes, map_sites_to_names, site_options, to_site_code, to_site_name};
pub use status::{default_wip_codes, resolve_status_codes, status_labels};
