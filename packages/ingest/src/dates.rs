use broadsheet_schema::DATE_SENTINEL;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%B %d, %Y", "%b %d, %Y"];

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Whether a date field's text denotes a real date (or is already the
/// sentinel).
pub fn is_valid_date_text(text: &str) -> bool {
    let text = text.trim();
    if text.is_empty() {
        return false;
    }
    if text == DATE_SENTINEL {
        return true;
    }

    DateTime::parse_from_rfc3339(text).is_ok()
        || DATE_TIME_FORMATS
            .iter()
            .any(|fmt| NaiveDateTime::parse_from_str(text, fmt).is_ok())
        || DATE_FORMATS
            .iter()
            .any(|fmt| NaiveDate::parse_from_str(text, fmt).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_common_formats() {
        assert!(is_valid_date_text("2025-06-14"));
        assert!(is_valid_date_text("2025-06-14T18:30"));
        assert!(is_valid_date_text("2025-06-14T18:30:00Z"));
        assert!(is_valid_date_text("2025-06-14 18:30"));
        assert!(is_valid_date_text("June 14, 2025"));
        assert!(is_valid_date_text("06/14/2025"));
        assert!(is_valid_date_text("TBD"));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(!is_valid_date_text(""));
        assert!(!is_valid_date_text("next tuesday-ish"));
        assert!(!is_valid_date_text("2025-13-45"));
    }
}
