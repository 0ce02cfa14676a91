//! Real-world local time formatting.
//!
//! Unlike the game-time and location engines this one does not use the `%`
//! journal tokens: the template is a strftime-style format string passed
//! through to chrono, so users get the full native specifier set (`%X`,
//! `%x`, `%A`, ...).

use std::fmt::Write;

use chrono::format::StrftimeItems;
use chrono::{DateTime, Local, TimeZone};

/// Hard cap on formatted local-time output, in bytes. Longer results are
/// truncated at a character boundary.
pub const LOCAL_TIME_MAX_LEN: usize = 512;

/// Format the current wall-clock time with a strftime-style template.
pub fn format_local_time(template: &str) -> String {
    format_local_time_at(&Local::now(), template)
}

/// Format a given instant with a strftime-style template.
///
/// Never panics: a template with an invalid specifier formats to the empty
/// string, and oversized output is silently truncated to
/// [`LOCAL_TIME_MAX_LEN`] bytes.
pub fn format_local_time_at<Tz: TimeZone>(time: &DateTime<Tz>, template: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let mut out = String::new();
    let delayed = time.format_with_items(StrftimeItems::new(template));
    if write!(out, "{}", delayed).is_err() {
        return String::new();
    }

    if out.len() > LOCAL_TIME_MAX_LEN {
        let mut end = LOCAL_TIME_MAX_LEN;
        while !out.is_char_boundary(end) {
            end -= 1;
        }
        out.truncate(end);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 3, 14, 9, 26, 53).unwrap()
    }

    #[test]
    fn test_basic_specifiers() {
        let time = fixed_time();
        assert_eq!(format_local_time_at(&time, "%Y-%m-%d"), "2021-03-14");
        assert_eq!(format_local_time_at(&time, "%H:%M:%S"), "09:26:53");
    }

    #[test]
    fn test_long_output_comes_back_whole() {
        // Well past any small first buffer guess, but under the cap.
        let time = fixed_time();
        let formatted = format_local_time_at(&time, "%A, %d %B %Y, %H:%M:%S");
        assert_eq!(formatted, "Sunday, 14 March 2021, 09:26:53");
        assert!(formatted.len() > 15);
    }

    #[test]
    fn test_template_without_specifiers_passes_through() {
        let time = fixed_time();
        assert_eq!(format_local_time_at(&time, "plain text"), "plain text");
        assert_eq!(format_local_time_at(&time, ""), "");
    }

    #[test]
    fn test_invalid_specifier_formats_empty() {
        let time = fixed_time();
        assert_eq!(format_local_time_at(&time, "%!"), "");
    }

    #[test]
    fn test_output_is_capped() {
        let time = fixed_time();
        let template = "x".repeat(LOCAL_TIME_MAX_LEN * 2);
        let formatted = format_local_time_at(&time, &template);
        assert_eq!(formatted.len(), LOCAL_TIME_MAX_LEN);
        assert!(formatted.chars().all(|c| c == 'x'));
    }
}
