//! Date helpers: normalization of frontmatter dates to ISO-8601

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ISO_DATE_PREFIX: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}").unwrap();
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Timestamp formats accepted for dates that already look like ISO-8601.
const ISO_FORMATS: [&str; 8] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d",
    "%Y/%m/%d %H:%M:%S",
];

/// Calendar formats tried after commas are removed and whitespace collapsed.
const CALENDAR_FORMATS: [&str; 10] = [
    "%B %d %Y",
    "%d %B %Y",
    "%A %B %d %Y",
    "%a %B %d %Y",
    "%B %d %Y %H:%M",
    "%B %d %Y %H:%M:%S",
    "%Y %B %d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
];

/// Current time as an ISO-8601 string (`2024-01-15T10:30:00.000Z`).
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Normalize a date string.
///
/// Strings that look like ISO-8601 (contain `T` or start with `YYYY-MM-DD`)
/// and actually parse are returned unchanged. Anything else goes through
/// calendar parsing (`March 14, 2024`, `14 March 2024`, `2024/03/14`, ...)
/// and comes back as an ISO timestamp at midnight UTC. Unparseable input
/// degrades to the current time with a warning; this never fails.
pub fn normalize_date(raw: &str) -> String {
    let value = strip_quotes(raw.trim());
    if value.is_empty() {
        return now_iso();
    }

    if looks_iso(value) && parse_timestamp(value).is_some() {
        return value.to_string();
    }

    if let Some(dt) = parse_calendar(value) {
        return dt.to_rfc3339_opts(SecondsFormat::Millis, true);
    }

    tracing::warn!("Could not parse date: {}", value);
    now_iso()
}

/// Sortable timestamp for a normalized date, falling back to now.
pub fn timestamp_of(date: &str) -> DateTime<Utc> {
    parse_timestamp(date)
        .or_else(|| parse_calendar(date))
        .unwrap_or_else(Utc::now)
}

fn looks_iso(value: &str) -> bool {
    value.contains('T') || ISO_DATE_PREFIX.is_match(value)
}

fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Parse an ISO-like timestamp; naive values are taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ISO_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt.and_utc());
        }
        if let Ok(d) = NaiveDate::parse_from_str(value, fmt) {
            return Some(d.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }

    None
}

fn parse_calendar(value: &str) -> Option<DateTime<Utc>> {
    let cleaned = value.replace(',', " ");
    let cleaned = WHITESPACE_RUN.replace_all(cleaned.trim(), " ");

    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in CALENDAR_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&cleaned, fmt) {
            return Some(dt.and_utc());
        }
        if let Ok(d) = NaiveDate::parse_from_str(&cleaned, fmt) {
            return Some(d.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }

    // "March 2024" means the first of the month.
    NaiveDate::parse_from_str(&format!("{} 1", cleaned), "%B %Y %d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_passes_through_unchanged() {
        assert_eq!(normalize_date("2024-01-01T00:00:00Z"), "2024-01-01T00:00:00Z");
        assert_eq!(normalize_date("2024-03-14"), "2024-03-14");
        assert_eq!(normalize_date("2024-01-15 10:30:00"), "2024-01-15 10:30:00");
    }

    #[test]
    fn test_quoted_date() {
        assert_eq!(normalize_date("\"2024-03-14\""), "2024-03-14");
    }

    #[test]
    fn test_month_name_formats() {
        assert_eq!(normalize_date("March 14 2024"), "2024-03-14T00:00:00.000Z");
        assert_eq!(normalize_date("March 15, 2024"), "2024-03-15T00:00:00.000Z");
        assert_eq!(normalize_date("Mar 5, 2024"), "2024-03-05T00:00:00.000Z");
        assert_eq!(normalize_date("14 March 2024"), "2024-03-14T00:00:00.000Z");
        assert_eq!(normalize_date("February 29 2024"), "2024-02-29T00:00:00.000Z");
    }

    #[test]
    fn test_weekday_with_t_is_not_iso() {
        assert_eq!(
            normalize_date("Thursday, March 14, 2024"),
            "2024-03-14T00:00:00.000Z"
        );
    }

    #[test]
    fn test_slash_formats() {
        assert_eq!(normalize_date("2024/03/14"), "2024-03-14T00:00:00.000Z");
        assert_eq!(normalize_date("03/14/2024"), "2024-03-14T00:00:00.000Z");
    }

    #[test]
    fn test_malformed_dates_degrade_to_now() {
        for bad in ["not a date", "2024-13-45", "Smarch 99 20x4", "T", "???"] {
            let normalized = normalize_date(bad);
            assert!(
                parse_timestamp(&normalized).is_some(),
                "{:?} normalized to unparseable {:?}",
                bad,
                normalized
            );
        }
    }

    #[test]
    fn test_empty_date_is_now() {
        let before = Utc::now().timestamp();
        let ts = timestamp_of(&normalize_date(""));
        assert!(ts.timestamp() >= before - 1);
    }

    #[test]
    fn test_timestamp_of_orders_dates() {
        assert!(timestamp_of("2024-02-01") > timestamp_of("2024-01-31T23:59:59Z"));
    }
}
