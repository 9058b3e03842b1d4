use chrono::{DateTime, NaiveDate};

const MAX_LINK_CHARS: usize = 50;

/// Shortens a checkout link for display: unchanged up to 50 characters,
/// otherwise the first 50 characters followed by an ellipsis.
pub fn truncate_link(link: &str) -> String {
    if link.chars().count() <= MAX_LINK_CHARS {
        link.to_string()
    } else {
        let head: String = link.chars().take(MAX_LINK_CHARS).collect();
        format!("{}...", head)
    }
}

/// Renders an ISO-ish date string as "March 1, 2025". The calendar date is
/// taken as written, without timezone normalization. Input that does not
/// parse is echoed back unchanged.
pub fn format_subscription_date(raw: &str) -> String {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()));

    match date {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_link_is_unchanged() {
        let link = "https://pay.example.com/session";
        assert_eq!(truncate_link(link), link);
    }

    #[test]
    fn link_at_exactly_fifty_chars_is_unchanged() {
        let link: String = "x".repeat(50);
        assert_eq!(truncate_link(&link), link);
    }

    #[test]
    fn fifty_one_chars_truncates_to_fifty_plus_ellipsis() {
        let link = "https://pay.example.com/abcdefghijklmnopqrstuvwxyz0123456789ABCDEFGHIJK";
        let shown = truncate_link(link);
        assert!(shown.ends_with("..."));
        assert_eq!(shown.chars().count(), 53);
        assert_eq!(&shown[..50], &link[..50]);

        let exact: String = "y".repeat(51);
        assert_eq!(truncate_link(&exact), format!("{}...", "y".repeat(50)));
    }

    #[test]
    fn formats_plain_date() {
        assert_eq!(format_subscription_date("2025-03-01"), "March 1, 2025");
        assert_eq!(format_subscription_date("2024-12-25"), "December 25, 2024");
    }

    #[test]
    fn formats_rfc3339_timestamp_by_its_written_date() {
        assert_eq!(
            format_subscription_date("2025-03-01T10:30:00Z"),
            "March 1, 2025"
        );
    }

    #[test]
    fn day_is_not_zero_padded() {
        assert_eq!(format_subscription_date("2025-07-09"), "July 9, 2025");
    }

    #[test]
    fn unparseable_input_is_echoed() {
        assert_eq!(format_subscription_date("soon"), "soon");
    }
}
