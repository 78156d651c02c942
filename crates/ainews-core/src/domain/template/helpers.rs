//! Pure helper transforms available to templates.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Text produced for dates that cannot be parsed.
pub const INVALID_DATE: &str = "Invalid Date";

const NAIVE_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Parse the date notations found in feeds and content file names.
///
/// Accepts RFC 3339, RFC 2822 (RSS `pubDate`), naive ISO date-times and bare
/// `YYYY-MM-DD` dates. Naive values are taken as UTC.
pub fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(input) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Long-form US date in UTC, e.g. `January 5, 2024`, or [`INVALID_DATE`].
pub fn format_date(input: &str) -> String {
    match parse_date(input) {
        Some(dt) => dt.format("%B %-d, %Y").to_string(),
        None => INVALID_DATE.to_owned(),
    }
}

/// First `length` characters followed by `...`, or the text unchanged when
/// it already fits.
pub fn truncate(text: &str, length: usize) -> String {
    match text.char_indices().nth(length) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_owned(),
    }
}

/// Decode the five basic HTML entities.
///
/// Each entity is replaced in one pass, in the order `&lt; &gt; &amp; &quot;
/// &#39;`, so `&amp;lt;` decodes to `&lt;` and not `<`.
pub fn decode_html(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_iso_timestamp() {
        assert_eq!(format_date("2024-01-05T00:00:00Z"), "January 5, 2024");
    }

    #[test]
    fn formats_bare_date_in_utc() {
        assert_eq!(format_date("2024-01-05"), "January 5, 2024");
        assert_eq!(format_date("2023-12-31"), "December 31, 2023");
    }

    #[test]
    fn formats_rss_pub_date() {
        assert_eq!(
            format_date("Fri, 05 Jan 2024 10:30:00 +0000"),
            "January 5, 2024"
        );
        assert_eq!(format_date("Fri, 05 Jan 2024 23:30:00 -0500"), "January 6, 2024");
    }

    #[test]
    fn invalid_dates_surface_as_text() {
        assert_eq!(format_date(""), INVALID_DATE);
        assert_eq!(format_date("yesterday"), INVALID_DATE);
        assert_eq!(format_date("2024-13-45"), INVALID_DATE);
    }

    #[test]
    fn truncate_boundary() {
        assert_eq!(truncate("", 0), "");
        assert_eq!(truncate("", 5), "");
        assert_eq!(truncate("hello", 5), "hello");
        assert_eq!(truncate("hello!", 5), "hello...");
        assert_eq!(truncate("hello", 0), "...");
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate("héllo wörld", 5), "héllo...");
        assert_eq!(truncate("日本語", 3), "日本語");
    }

    #[test]
    fn decode_respects_fixed_order() {
        assert_eq!(decode_html("&amp;lt;"), "&lt;");
        assert_eq!(
            decode_html("&lt;b&gt; &quot;x&quot; &#39;y&#39; &amp;"),
            "<b> \"x\" 'y' &"
        );
    }

    #[test]
    fn decode_leaves_other_entities() {
        assert_eq!(decode_html("&nbsp;&copy;"), "&nbsp;&copy;");
    }
}
