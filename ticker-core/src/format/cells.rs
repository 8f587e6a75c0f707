//! Cell formatting helpers shared by the table views.

/// Placeholder for a missing value.
pub const NA: &str = "N/A";

fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| !v.is_nan())
}

/// Two decimal places, or `N/A`.
pub fn number(value: Option<f64>) -> String {
    match present(value) {
        Some(v) => format!("{v:.2}"),
        None => NA.to_string(),
    }
}

/// Signed percent with two decimals (`+1.25%`), or `N/A`.
pub fn percent(value: Option<f64>) -> String {
    match present(value) {
        Some(v) => format!("{v:+.2}%"),
        None => NA.to_string(),
    }
}

/// Volume-style magnitude with K/M/B suffixes. Values under 1000 print as-is.
pub fn volume(value: Option<f64>) -> String {
    let Some(v) = present(value) else {
        return NA.to_string();
    };
    if v >= 1e9 {
        format!("{:.2}B", v / 1e9)
    } else if v >= 1e6 {
        format!("{:.2}M", v / 1e6)
    } else if v >= 1e3 {
        format!("{:.2}K", v / 1e3)
    } else {
        format!("{v}")
    }
}

/// Summary-style magnitude with M/B/T suffixes on the absolute value.
pub fn large_number(value: f64) -> String {
    let a = value.abs();
    if a >= 1e12 {
        format!("{:.2}T", value / 1e12)
    } else if a >= 1e9 {
        format!("{:.2}B", value / 1e9)
    } else if a >= 1e6 {
        format!("{:.2}M", value / 1e6)
    } else {
        format!("{value:.2}")
    }
}

/// Cut to at most `max` characters, ending in `...` when shortened.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut out: String = s.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// Optional text, `-` when absent or empty.
pub fn text(value: Option<&str>) -> String {
    match value {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_and_missing_values() {
        assert_eq!(number(Some(1.005)), "1.00");
        assert_eq!(number(Some(-3.14159)), "-3.14");
        assert_eq!(number(None), "N/A");
        assert_eq!(number(Some(f64::NAN)), "N/A");
    }

    #[test]
    fn percent_is_signed() {
        assert_eq!(percent(Some(1.234)), "+1.23%");
        assert_eq!(percent(Some(-0.5)), "-0.50%");
        assert_eq!(percent(Some(0.0)), "+0.00%");
        assert_eq!(percent(None), "N/A");
    }

    #[test]
    fn volume_suffixes() {
        assert_eq!(volume(Some(950.0)), "950");
        assert_eq!(volume(Some(1_500.0)), "1.50K");
        assert_eq!(volume(Some(2_340_000.0)), "2.34M");
        assert_eq!(volume(Some(7_000_000_000.0)), "7.00B");
        assert_eq!(volume(None), "N/A");
    }

    #[test]
    fn large_number_suffixes() {
        assert_eq!(large_number(3.1e12), "3.10T");
        assert_eq!(large_number(-2.5e9), "-2.50B");
        assert_eq!(large_number(12_000_000.0), "12.00M");
        assert_eq!(large_number(0.4567), "0.46");
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Apple Hospitality REIT Inc", 10), "Apple H...");
        assert_eq!(truncate("Zürich Insurance", 6), "Zür...");
    }

    #[test]
    fn text_placeholder() {
        assert_eq!(text(Some("NMS")), "NMS");
        assert_eq!(text(Some("")), "-");
        assert_eq!(text(None), "-");
    }
}
