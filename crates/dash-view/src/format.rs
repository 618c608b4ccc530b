//! 顯示格式化

use rust_decimal::Decimal;

/// 緊湊數字格式：1234 → 1K、1234567 → 1M
///
/// 千位以上只留整數，不帶小數。
pub fn format_compact_number(value: Decimal) -> String {
    let negative = value < Decimal::ZERO;
    let abs = value.abs();
    let sign = if negative { "-" } else { "" };

    const UNITS: [(i64, &str); 4] = [
        (1_000_000_000_000, "T"),
        (1_000_000_000, "B"),
        (1_000_000, "M"),
        (1_000, "K"),
    ];

    for (threshold, suffix) in UNITS {
        if abs >= Decimal::from(threshold) {
            let scaled = (abs / Decimal::from(threshold)).round_dp(0);
            return format!("{sign}{scaled}{suffix}");
        }
    }

    format!("{sign}{}", abs.normalize())
}

/// 緊湊金額格式（預設 AUD）
pub fn format_compact_currency(value: Decimal, currency: &str) -> String {
    let symbol = match currency {
        "AUD" | "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        _ => "$",
    };
    format!("{symbol}{}", format_compact_number(value))
}

/// 覆蓋天數顯示："-" 未知、"0d"、超過 999 顯示 "∞"
pub fn format_cover_days(cover_days: Option<Decimal>) -> String {
    match cover_days {
        None => "-".to_string(),
        Some(days) if days > Decimal::from(999) => "∞".to_string(),
        Some(days) => format!("{}d", days.round_dp(0)),
    }
}

/// 千分位數字格式（整數部分加逗號）
pub fn format_number(value: Decimal) -> String {
    let negative = value < Decimal::ZERO;
    let rounded = value.abs().round_dp(0);
    let digits = rounded.to_string();

    let mut grouped = String::new();
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}
