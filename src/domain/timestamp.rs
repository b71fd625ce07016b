// Fixed-format timestamp parsing ("dd.mm.yyyy HH:MM:SS", UTC)
use chrono::{DateTime, NaiveDateTime, SecondsFormat};

const FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// Byte layout of `dd.mm.yyyy HH:MM:SS`: `None` marks a digit position.
#[rustfmt::skip]
const LAYOUT: [Option<u8>; 19] = [
    None, None, Some(b'.'), None, None, Some(b'.'), None, None, None, None,
    Some(b' '), None, None, Some(b':'), None, None, Some(b':'), None, None,
];

/// Parse a timestamp into milliseconds since the Unix epoch.
///
/// The text is always read as UTC, so the result never depends on the
/// local timezone of the host. Returns `None` when the text does not match
/// the layout exactly or names an impossible date.
pub fn parse_timestamp(text: &str) -> Option<i64> {
    let bytes = text.as_bytes();
    if bytes.len() != LAYOUT.len() {
        return None;
    }

    let layout_ok = bytes.iter().zip(LAYOUT.iter()).all(|(b, expected)| match expected {
        Some(sep) => b == sep,
        None => b.is_ascii_digit(),
    });
    if !layout_ok {
        return None;
    }

    NaiveDateTime::parse_from_str(text, FORMAT)
        .ok()
        .map(|dt| dt.and_utc().timestamp_millis())
}

/// Render an instant as ISO-8601 in UTC, e.g. `2023-03-05T14:22:01.000Z`.
pub fn to_iso8601(time_ms: i64) -> Option<String> {
    DateTime::from_timestamp_millis(time_ms).map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_parse_timestamp() {
        let expected = Utc.with_ymd_and_hms(2023, 3, 5, 14, 22, 1).unwrap().timestamp_millis();
        assert_eq!(parse_timestamp("05.03.2023 14:22:01"), Some(expected));
        assert_eq!(parse_timestamp("05.03.2023 14:22:01"), Some(1_678_026_121_000));
    }

    #[test]
    fn test_iso8601_round_trip() {
        let ms = parse_timestamp("05.03.2023 14:22:01").unwrap();
        assert_eq!(to_iso8601(ms).as_deref(), Some("2023-03-05T14:22:01.000Z"));

        let reparsed = DateTime::parse_from_rfc3339("2023-03-05T14:22:01Z").unwrap();
        assert_eq!(reparsed.timestamp_millis(), ms);
    }

    #[test]
    fn test_rejects_wrong_layout() {
        assert_eq!(parse_timestamp("5.03.2023 14:22:01"), None);
        assert_eq!(parse_timestamp("2023-03-05 14:22:01"), None);
        assert_eq!(parse_timestamp("05.03.2023T14:22:01"), None);
        assert_eq!(parse_timestamp("05.03.2023 14:22"), None);
        assert_eq!(parse_timestamp("0a.03.2023 14:22:01"), None);
        assert_eq!(parse_timestamp(""), None);
    }

    #[test]
    fn test_rejects_impossible_dates() {
        assert_eq!(parse_timestamp("31.02.2023 10:00:00"), None);
        assert_eq!(parse_timestamp("05.13.2023 10:00:00"), None);
        assert_eq!(parse_timestamp("05.03.2023 25:00:00"), None);
    }
}
