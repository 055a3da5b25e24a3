//! Datetime parsing and display formatting.
//!
//! Forms submit `YYYY-MM-DD HH:MM:SS` (the legacy wire format); detail pages
//! and listings render a handful of fixed display formats.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

/// Accepted form wire formats, tried in order.
const FORM_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Display style for page-level datetimes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `Mon 06, 15, 2020 8:00PM`
    Medium,
    /// `Monday June, 15, 2020 at 8:00PM`
    Full,
}

/// Parse a datetime submitted through a form.
///
/// Accepts the space- and `T`-separated second-resolution formats, plus full
/// RFC 3339. Naive inputs are taken as UTC.
pub fn parse_form_datetime(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    FORM_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Render a page-level datetime in the requested style.
pub fn format_datetime(dt: DateTime<Utc>, format: DateFormat) -> String {
    match format {
        DateFormat::Medium => dt.format("%a %m, %d, %Y %-I:%M%p").to_string(),
        DateFormat::Full => dt.format("%A %B, %-d, %Y at %-I:%M%p").to_string(),
    }
}

/// Render a show's start time for detail-page rows: `06/15/2020, 20:00`.
pub fn format_show_time(dt: DateTime<Utc>) -> String {
    dt.format("%m/%d/%Y, %H:%M").to_string()
}

/// Render a datetime in the form wire format, e.g. for field defaults.
pub fn form_datetime_string(dt: DateTime<Utc>) -> String {
    dt.format(FORM_FORMATS[0]).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 6, 15, 20, 0, 0).unwrap()
    }

    #[test]
    fn parses_space_separated() {
        assert_eq!(parse_form_datetime("2020-06-15 20:00:00"), Some(sample()));
    }

    #[test]
    fn parses_t_separated() {
        assert_eq!(parse_form_datetime("2020-06-15T20:00:00"), Some(sample()));
    }

    #[test]
    fn parses_rfc3339() {
        assert_eq!(
            parse_form_datetime("2020-06-15T20:00:00.000Z"),
            Some(sample())
        );
        assert_eq!(
            parse_form_datetime("2020-06-15T22:00:00+02:00"),
            Some(sample())
        );
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_form_datetime("next tuesday"), None);
        assert_eq!(parse_form_datetime("2020-13-40 99:00:00"), None);
        assert_eq!(parse_form_datetime(""), None);
    }

    #[test]
    fn medium_format() {
        assert_eq!(
            format_datetime(sample(), DateFormat::Medium),
            "Mon 06, 15, 2020 8:00PM"
        );
    }

    #[test]
    fn full_format() {
        assert_eq!(
            format_datetime(sample(), DateFormat::Full),
            "Monday June, 15, 2020 at 8:00PM"
        );
    }

    #[test]
    fn show_time_format() {
        assert_eq!(format_show_time(sample()), "06/15/2020, 20:00");
    }

    #[test]
    fn form_wire_format_round_trips() {
        let rendered = form_datetime_string(sample());
        assert_eq!(rendered, "2020-06-15 20:00:00");
        assert_eq!(parse_form_datetime(&rendered), Some(sample()));
    }
}
