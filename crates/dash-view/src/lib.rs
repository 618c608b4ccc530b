//! # Dash View
//!
//! 指標卡視圖模型、色票與顯示格式化

pub mod cards;
pub mod colors;
pub mod format;

// Re-export 主要類型
pub use cards::{KpiCard, ValueStyle};
pub use colors::{action_color, ageing_bucket_color, delta_color, priority_color};
pub use format::{
    format_compact_currency, format_compact_number, format_cover_days, format_number,
};
