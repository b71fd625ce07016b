// Row and sample domain models
use serde::Serialize;

use super::error::ParseError;
use super::timestamp::parse_timestamp;

pub const TIMESTAMP_FIELD: usize = 0;
pub const VALUE_FIELD: usize = 2;

/// Placeholder written into the unused middle field of synthesized rows.
pub const UNUSED_PLACEHOLDER: &str = "0";

/// One tokenized line: `timestamp;unused;bpm`.
///
/// Field count is not validated at tokenization time; accessors fail with
/// [`ParseError::MissingField`] when a positional field is absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// 1-based line number in the source file, header included
    pub line: usize,
    pub fields: Vec<String>,
}

impl Row {
    pub fn new(line: usize, fields: Vec<String>) -> Self {
        Self { line, fields }
    }

    /// Representative row for a downsampling window.
    pub fn representative(first: &Row, value: i64) -> Self {
        Self {
            line: first.line,
            fields: vec![
                first.fields.get(TIMESTAMP_FIELD).cloned().unwrap_or_default(),
                UNUSED_PLACEHOLDER.to_string(),
                value.to_string(),
            ],
        }
    }

    fn field(&self, index: usize) -> Result<&str, ParseError> {
        self.fields
            .get(index)
            .map(String::as_str)
            .ok_or(ParseError::MissingField {
                line: self.line,
                expected: index + 1,
                found: self.fields.len(),
            })
    }

    pub fn timestamp_text(&self) -> Result<&str, ParseError> {
        self.field(TIMESTAMP_FIELD)
    }

    pub fn value_text(&self) -> Result<&str, ParseError> {
        self.field(VALUE_FIELD)
    }

    pub fn value(&self) -> Result<i64, ParseError> {
        let text = self.value_text()?;
        parse_bpm(text).ok_or_else(|| ParseError::Value {
            line: self.line,
            text: text.to_string(),
        })
    }

    pub fn time_ms(&self) -> Result<i64, ParseError> {
        let text = self.timestamp_text()?;
        parse_timestamp(text).ok_or_else(|| ParseError::Timestamp {
            line: self.line,
            text: text.to_string(),
        })
    }

    pub fn to_sample(&self) -> Result<Sample, ParseError> {
        Ok(Sample::new(self.time_ms()?, self.value()?))
    }
}

/// A chart point: instant in epoch milliseconds and an integer BPM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Sample {
    pub time_ms: i64,
    pub value: i64,
}

impl Sample {
    pub fn new(time_ms: i64, value: i64) -> Self {
        Self { time_ms, value }
    }
}

/// Parse a BPM field as an integer.
///
/// Accepts an optional `+`, digits and an optional fractional part, which
/// is truncated toward zero (`"72.9"` is 72). Surrounding whitespace,
/// including a trailing `\r` from CRLF files, is ignored. BPM is never
/// negative, so a leading `-` is rejected along with anything else.
pub fn parse_bpm(text: &str) -> Option<i64> {
    let text = text.trim();
    let (integer, fraction) = match text.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (text, None),
    };

    let digits = integer.strip_prefix('+').unwrap_or(integer);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if let Some(fraction) = fraction {
        if !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
    }

    integer.parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> Row {
        Row::new(2, fields.iter().map(|f| f.to_string()).collect())
    }

    #[test]
    fn test_parse_bpm_integers() {
        assert_eq!(parse_bpm("72"), Some(72));
        assert_eq!(parse_bpm("+72"), Some(72));
        assert_eq!(parse_bpm("0"), Some(0));
        assert_eq!(parse_bpm("72\r"), Some(72));
    }

    #[test]
    fn test_parse_bpm_truncates_fraction() {
        assert_eq!(parse_bpm("72.9"), Some(72));
        assert_eq!(parse_bpm("72."), Some(72));
        assert_eq!(parse_bpm("0.5"), Some(0));
    }

    #[test]
    fn test_parse_bpm_rejects_negative() {
        assert_eq!(parse_bpm("-3"), None);
        assert_eq!(parse_bpm("-0.5"), None);
        assert_eq!(parse_bpm("+-3"), None);

        let err = row(&["05.03.2023 14:22:01", "x", "-60"]).to_sample().unwrap_err();
        assert_eq!(err, ParseError::Value { line: 2, text: "-60".to_string() });
    }

    #[test]
    fn test_parse_bpm_rejects_non_numeric() {
        assert_eq!(parse_bpm("abc"), None);
        assert_eq!(parse_bpm(""), None);
        assert_eq!(parse_bpm(".5"), None);
        assert_eq!(parse_bpm("72bpm"), None);
        assert_eq!(parse_bpm("7 2"), None);
        assert_eq!(parse_bpm("1.2.3"), None);
    }

    #[test]
    fn test_to_sample() {
        let sample = row(&["05.03.2023 14:22:01", "ignored", "81"]).to_sample().unwrap();
        assert_eq!(sample, Sample::new(1_678_026_121_000, 81));
    }

    #[test]
    fn test_to_sample_ignores_unused_field() {
        let a = row(&["05.03.2023 14:22:01", "", "81"]).to_sample().unwrap();
        let b = row(&["05.03.2023 14:22:01", "anything at all", "81"]).to_sample().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_malformed_value_is_an_error() {
        let err = row(&["05.03.2023 14:22:01", "x", "abc"]).to_sample().unwrap_err();
        assert_eq!(err, ParseError::Value { line: 2, text: "abc".to_string() });
    }

    #[test]
    fn test_malformed_timestamp_is_an_error() {
        let err = row(&["2023-03-05", "x", "60"]).to_sample().unwrap_err();
        assert!(matches!(err, ParseError::Timestamp { line: 2, .. }));
    }

    #[test]
    fn test_missing_field_is_an_error() {
        let err = row(&["05.03.2023 14:22:01"]).to_sample().unwrap_err();
        assert_eq!(err, ParseError::MissingField { line: 2, expected: 3, found: 1 });
    }

    #[test]
    fn test_representative_keeps_first_timestamp() {
        let first = row(&["05.03.2023 14:22:01", "x", "81"]);
        let rep = Row::representative(&first, 99);
        assert_eq!(rep.fields, vec!["05.03.2023 14:22:01", UNUSED_PLACEHOLDER, "99"]);
        assert_eq!(rep.line, 2);
    }
}
