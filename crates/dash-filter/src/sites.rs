//! 站點代碼/名稱對照
//!
//! 不同資料來源對同一站點用的標籤不一致（代碼、全名、口語別名），
//! 這裡維護靜態對照表做多對一收斂。新站點出現時擴充此表。

/// 站點對照項
#[derive(Debug, Clone, Copy)]
pub struct SiteEntry {
    /// 站點代碼，例如 "L-QLD"
    pub code: &'static str,
    /// 顯示名稱
    pub name: &'static str,
    /// 其他常見別名
    pub aliases: &'static [&'static str],
}

/// 站點對照表
pub const SITE_MAP: &[SiteEntry] = &[
    SiteEntry {
        code: "L-QLD",
        name: "QLD SALES & SERVICE",
        aliases: &["QLD SERVICE"],
    },
    SiteEntry {
        code: "L-VIC",
        name: "VICTORIA SALES & SERVICE",
        aliases: &["VIC SALES & SERVICE", "VICTORIA SERVICE"],
    },
    SiteEntry {
        code: "L-NSW",
        name: "NSW SALES & SERVICE",
        aliases: &["NEW SOUTH WALES SALES & SERVICE", "NSW SERVICE"],
    },
    SiteEntry {
        code: "L-FBK",
        name: "FAIRBANK SALES & SERVICE",
        aliases: &["FAIRBANK SERVICE"],
    },
    SiteEntry {
        code: "L-SAU",
        name: "SA SALES & SERVICE",
        aliases: &["SOUTH AUSTRALIA SALES & SERVICE", "SA SERVICE"],
    },
    SiteEntry {
        code: "L-BEN",
        name: "BENDIGO SALES & SERVICE",
        aliases: &["BENDIGO SERVICE"],
    },
    SiteEntry {
        code: "L-SUN",
        name: "SUNSHINE SALES & SERVICE",
        aliases: &["SUNSHINE", "SUNSHINE SERVICE"],
    },
    SiteEntry {
        code: "L-WAU",
        name: "WA SALES & SERVICE",
        aliases: &["WA SALES", "WESTERN AUSTRALIA SALES & SERVICE", "WA SERVICE"],
    },
];

/// 正規化站點字串：去空白、轉小寫、收斂空白與 AND/& 寫法
fn normalize(value: &str) -> String {
    let lowered = value.trim().to_lowercase();
    let collapsed = lowered.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.replace(" and ", " & ")
}

fn find_entry(value: &str) -> Option<&'static SiteEntry> {
    let v = normalize(value);
    SITE_MAP.iter().find(|entry| {
        normalize(entry.code) == v
            || normalize(entry.name) == v
            || entry.aliases.iter().any(|alias| normalize(alias) == v)
    })
}

/// 轉成站點代碼；查不到時原樣回傳（絕不報錯）
pub fn to_site_code(value: &str) -> String {
    match find_entry(value) {
        Some(entry) => entry.code.to_string(),
        None => value.to_string(),
    }
}

/// 轉成顯示名稱；查不到時原樣回傳
pub fn to_site_name(value: &str) -> String {
    match find_entry(value) {
        Some(entry) => entry.name.to_string(),
        None => value.to_string(),
    }
}

/// 批次轉站點代碼
pub fn map_sites_to_codes(values: Option<&[String]>) -> Option<Vec<String>> {
    values.map(|vs| vs.iter().map(|v| to_site_code(v)).collect())
}

/// 批次轉顯示名稱
pub fn map_sites_to_names(values: Option<&[String]>) -> Option<Vec<String>> {
    values.map(|vs| vs.iter().map(|v| to_site_name(v)).collect())
}

/// 站點選單（代碼 + 名稱）
pub fn site_options() -> Vec<(&'static str, &'static str)> {
    SITE_MAP.iter().map(|e| (e.code, e.name)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("QLD SALES & SERVICE", "L-QLD")]
    #[case("qld sales & service", "L-QLD")] // 大小寫不敏感
    #[case("QLD SALES AND SERVICE", "L-QLD")] // AND/& 收斂
    #[case("  QLD   SALES  &  SERVICE  ", "L-QLD")] // 空白收斂
    #[case("QLD SERVICE", "L-QLD")] // 別名
    #[case("L-QLD", "L-QLD")] // 已是代碼
    #[case("SUNSHINE", "L-SUN")]
    #[case("wa sales and service", "L-WAU")]
    fn test_to_site_code(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(to_site_code(input), expected);
    }

    #[test]
    fn test_unknown_site_passes_through() {
        // 未知站點原樣傳遞，由查詢層自行處理
        assert_eq!(to_site_code("UNKNOWN"), "UNKNOWN");
        assert_eq!(to_site_code("L-NZL"), "L-NZL");
        assert_eq!(to_site_name("UNKNOWN"), "UNKNOWN");
    }

    #[test]
    fn test_to_site_name() {
        assert_eq!(to_site_name("L-VIC"), "VICTORIA SALES & SERVICE");
        assert_eq!(to_site_name("vic sales and service"), "VICTORIA SALES & SERVICE");
    }

    #[test]
    fn test_map_sites_to_codes() {
        let input = vec!["QLD SERVICE".to_string(), "L-VIC".to_string()];
        assert_eq!(
            map_sites_to_codes(Some(&input)),
            Some(vec!["L-QLD".to_string(), "L-VIC".to_string()])
        );
        assert_eq!(map_sites_to_codes(None), None);
    }

    #[test]
    fn test_site_options_cover_map() {
        let options = site_options();
        assert_eq!(options.len(), SITE_MAP.len());
        assert!(options.contains(&("L-FBK", "FAIRBANK SALES & SERVICE")));
    }
}
