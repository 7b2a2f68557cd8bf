//! Display label helpers shared by the listing views

use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;

/// Placeholder for missing values
pub const NOT_AVAILABLE: &str = "N/A";

/// Matches a lowercase letter or digit directly followed by an uppercase letter
static CAMEL_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("valid camel boundary regex"));

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Convert `snake_case`, `camelCase` or `SCREAMING_CASE` into `Title Case`
pub fn title_case(raw: &str) -> String {
    let spaced = CAMEL_BOUNDARY.replace_all(raw, "$1 $2").replace('_', " ");
    spaced
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Convert `SNAKE_CASE` into `Snake Case`, splitting on underscores only
pub fn snake_title_case(raw: &str) -> String {
    raw.split('_').map(capitalize).collect::<Vec<_>>().join(" ")
}

/// Title-cased label, or `N/A` when the source is missing or empty
pub fn label_or_na(raw: Option<&str>, convert: fn(&str) -> String) -> String {
    match raw {
        Some(s) if !s.is_empty() => convert(s),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// `MM/DD/YYYY`, or `N/A` when there is no date
pub fn format_date(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format("%m/%d/%Y").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Two-decimal price
pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}

/// Shorten long titles for card display
pub fn truncate_title(title: &str, max: usize) -> String {
    if title.chars().count() > max {
        let kept: String = title.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        title.to_string()
    }
}

/// Badge tone for status-like fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Positive,
    Warning,
    Neutral,
}

/// Tone for a product status (`active` / `incomplete` / anything else)
pub fn product_status_tone(status: Option<&str>) -> StatusTone {
    match status.map(str::to_lowercase).as_deref() {
        Some("active") => StatusTone::Positive,
        Some("incomplete") => StatusTone::Warning,
        _ => StatusTone::Neutral,
    }
}

/// Tone for an order status; `hold` takes precedence over completion keywords
pub fn order_status_tone(status: Option<&str>) -> StatusTone {
    let lower = status.unwrap_or_default().to_lowercase();
    if lower.contains("hold") {
        StatusTone::Neutral
    } else if lower.contains("complete") || lower.contains("fulfilled") {
        StatusTone::Positive
    } else if lower.contains("pending") {
        StatusTone::Warning
    } else {
        StatusTone::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_title_case_snake_and_camel() {
        assert_eq!(title_case("multi_select"), "Multi Select");
        assert_eq!(title_case("frontendType"), "Frontend Type");
        assert_eq!(title_case("SINGLE_SELECT"), "Single Select");
        assert_eq!(title_case("text"), "Text");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_snake_title_case() {
        assert_eq!(snake_title_case("MERCHANT_FULFILLED"), "Merchant Fulfilled");
        assert_eq!(snake_title_case("on_hold"), "On Hold");
    }

    #[test]
    fn test_label_or_na() {
        assert_eq!(label_or_na(None, snake_title_case), "N/A");
        assert_eq!(label_or_na(Some(""), snake_title_case), "N/A");
        assert_eq!(label_or_na(Some("in_transit"), snake_title_case), "In Transit");
    }

    #[test]
    fn test_format_date() {
        let date = Utc.with_ymd_and_hms(2023, 1, 5, 12, 0, 0).unwrap();
        assert_eq!(format_date(Some(date)), "01/05/2023");
        assert_eq!(format_date(None), "N/A");
    }

    #[test]
    fn test_truncate_title() {
        let long = "x".repeat(70);
        let short = truncate_title(&long, 60);
        assert_eq!(short.chars().count(), 60);
        assert!(short.ends_with("..."));
        assert_eq!(truncate_title("Short", 60), "Short");
    }

    #[test]
    fn test_status_tones() {
        assert_eq!(product_status_tone(Some("Active")), StatusTone::Positive);
        assert_eq!(product_status_tone(Some("incomplete")), StatusTone::Warning);
        assert_eq!(product_status_tone(None), StatusTone::Neutral);

        assert_eq!(order_status_tone(Some("ON_HOLD")), StatusTone::Neutral);
        assert_eq!(order_status_tone(Some("completed")), StatusTone::Positive);
        assert_eq!(order_status_tone(Some("pending_payment")), StatusTone::Warning);
    }
}
