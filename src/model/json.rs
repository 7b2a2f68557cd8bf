//! Lenient accessors over raw `serde_json::Value` records
//!
//! Tool outputs are produced by external processes and their records are
//! loosely shaped. These helpers read a field under several possible names
//! and never fail: a missing or mistyped field is simply `None`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

/// Values below this are Unix seconds, at or above it milliseconds
pub const SECONDS_THRESHOLD: i64 = 10_000_000_000;

/// Whether a JSON value counts as "present" (non-null, non-empty, non-zero, non-false)
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Follow a dotted path (`"channel.name"`) into nested objects
pub fn lookup<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(record, |current, key| current.get(key))
}

/// Render a scalar as text: strings verbatim, numbers and bools via Display
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// First non-empty text found under any of `paths`
pub fn first_text(record: &Value, paths: &[&str]) -> Option<String> {
    paths
        .iter()
        .filter_map(|path| lookup(record, path))
        .find_map(scalar_text)
}

/// Read an identifier that may be a Mongo-style `{"$oid": "..."}` wrapper or a plain scalar
pub fn oid(value: &Value) -> Option<String> {
    match value {
        Value::Object(map) => map.get("$oid").and_then(scalar_text),
        other => scalar_text(other),
    }
}

/// First identifier found under any of `paths`, unwrapping `$oid` objects
pub fn first_id(record: &Value, paths: &[&str]) -> Option<String> {
    paths
        .iter()
        .filter_map(|path| lookup(record, path))
        .find_map(oid)
}

/// Parse a number that may arrive as a JSON number or a numeric string
pub fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Parse an integer prefix the way loosely typed producers emit it (`"1700000000"`, `1.7e9`)
pub fn integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let trimmed = s.trim();
            let end = trimmed
                .char_indices()
                .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && c == '-')))
                .map(|(i, _)| i)
                .unwrap_or(trimmed.len());
            trimmed[..end].parse::<i64>().ok()
        }
        _ => None,
    }
}

/// Convert a Unix timestamp of unknown unit into a UTC instant
pub fn from_unix(raw: i64) -> Option<DateTime<Utc>> {
    if raw < SECONDS_THRESHOLD {
        Utc.timestamp_opt(raw, 0).single()
    } else {
        Utc.timestamp_millis_opt(raw).single()
    }
}

/// Parse a timestamp from a number, numeric string, RFC 3339 string or plain date
pub fn timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(_) => integer(value).and_then(from_unix),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            if s.chars().all(|c| c.is_ascii_digit()) {
                return integer(value).and_then(from_unix);
            }
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.with_timezone(&Utc));
            }
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
                return Some(naive.and_utc());
            }
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
        }
        _ => None,
    }
}

/// First truthy timestamp found under any of `paths`
pub fn first_timestamp(record: &Value, paths: &[&str]) -> Option<DateTime<Utc>> {
    paths
        .iter()
        .filter_map(|path| lookup(record, path))
        .filter(|v| is_truthy(v))
        .find_map(timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use serde_json::json;

    #[test]
    fn test_oid_unwraps_mongo_wrapper() {
        let record = json!({"_id": {"$oid": "abc123"}, "id": 7});
        assert_eq!(first_id(&record, &["_id", "id"]), Some("abc123".to_string()));
        assert_eq!(first_id(&record, &["missing", "id"]), Some("7".to_string()));
    }

    #[test]
    fn test_first_text_skips_empty_strings() {
        let record = json!({"channel": {"name": ""}, "channel_group": {"name": "Amazon US"}});
        assert_eq!(
            first_text(&record, &["channel.name", "channel_group.name"]),
            Some("Amazon US".to_string())
        );
        assert_eq!(first_text(&record, &["nope"]), None);
    }

    #[test]
    fn test_timestamp_seconds_and_millis_agree() {
        let secs = timestamp(&json!(1_700_000_000)).unwrap();
        let millis = timestamp(&json!(1_700_000_000_000_i64)).unwrap();
        let text = timestamp(&json!("1700000000")).unwrap();
        assert_eq!(secs, millis);
        assert_eq!(secs, text);
    }

    #[test]
    fn test_timestamp_parses_dates() {
        let date = timestamp(&json!("2021-01-01")).unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2021, 1, 1));

        let rfc = timestamp(&json!("2023-06-15T10:30:00Z")).unwrap();
        assert_eq!(rfc.month(), 6);

        assert!(timestamp(&json!("not a date")).is_none());
        assert!(timestamp(&json!(null)).is_none());
    }

    #[test]
    fn test_integer_reads_numeric_prefix() {
        assert_eq!(integer(&json!("1700000000abc")), Some(1_700_000_000));
        assert_eq!(integer(&json!(" 42 ")), Some(42));
        assert_eq!(integer(&json!("abc")), None);
    }

    #[test]
    fn test_is_truthy() {
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(null)));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!("x")));
    }
}
