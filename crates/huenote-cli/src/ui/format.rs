//! String formatting utilities for UI rendering.

use chrono::{DateTime, Utc};

/// Truncate a string to max length, adding ellipsis if needed.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return s.chars().take(max_len).collect();
    }
    let truncated: String = s.chars().take(max_len - 3).collect();
    format!("{}...", truncated)
}

/// Format a datetime for display.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// Replace newlines so a title stays on one table row.
pub fn single_line(s: &str) -> String {
    s.replace('\n', " ").replace('\r', "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_truncate_long() {
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("hello", 5), "hello");
        assert_eq!(truncate("hello", 2), "he");
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("ünïcödé", 7), "ünïcödé");
    }

    #[test]
    fn test_format_datetime() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();
        assert_eq!(format_datetime(&dt), "2024-03-09 14:05 UTC");
    }

    #[test]
    fn test_single_line() {
        assert_eq!(single_line("hello\r\nworld"), "hello world");
    }
}
