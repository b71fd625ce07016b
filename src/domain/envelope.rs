// Moving-maximum / moving-minimum envelope downsampling
use super::error::ParseError;
use super::row::Row;

/// Starting accumulator for the moving maximum. [`parse_bpm`] rejects
/// negative values, so no real window maximum lies below it.
///
/// [`parse_bpm`]: super::row::parse_bpm
pub const MAX_FLOOR: i64 = 0;

/// Default starting accumulator for the moving minimum.
///
/// Windows whose values all exceed the sentinel report the sentinel itself
/// rather than their true minimum.
pub const DEFAULT_MIN_SENTINEL: i64 = 500;

/// Window length that reduces `row_count` rows to roughly `target_points`.
///
/// Zero means the input is too small to window and must pass through.
pub fn window_size(row_count: usize, target_points: usize) -> usize {
    if target_points == 0 {
        return 0;
    }
    (row_count as f64 / target_points as f64).round() as usize
}

/// Number of representatives produced for `row_count` rows.
pub fn envelope_len(row_count: usize, window: usize) -> usize {
    if window == 0 {
        return row_count;
    }
    row_count / window
}

pub fn moving_max(rows: &[Row], window: usize) -> Result<Vec<Row>, ParseError> {
    reduce_windows(rows, window, MAX_FLOOR, i64::max)
}

pub fn moving_min(rows: &[Row], window: usize, sentinel: i64) -> Result<Vec<Row>, ParseError> {
    reduce_windows(rows, window, sentinel, i64::min)
}

/// Fold every full window of `window` rows into one representative row
/// carrying the window's first timestamp and the folded value.
///
/// Windows start at `0, window, 2 * window, ...`; a trailing run shorter
/// than `window` is dropped. A zero window returns the rows unchanged.
fn reduce_windows(
    rows: &[Row],
    window: usize,
    init: i64,
    fold: fn(i64, i64) -> i64,
) -> Result<Vec<Row>, ParseError> {
    if window == 0 {
        return Ok(rows.to_vec());
    }

    let mut reduced = Vec::with_capacity(envelope_len(rows.len(), window));
    for chunk in rows.chunks_exact(window) {
        let mut acc = init;
        for row in chunk {
            acc = fold(acc, row.value()?);
        }
        reduced.push(Row::representative(&chunk[0], acc));
    }

    Ok(reduced)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::row::UNUSED_PLACEHOLDER;

    fn rows(values: &[i64]) -> Vec<Row> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                Row::new(
                    i + 2,
                    vec![format!("01.01.2024 00:{:02}:{:02}", i / 60, i % 60), "x".into(), v.to_string()],
                )
            })
            .collect()
    }

    fn values(rows: &[Row]) -> Vec<i64> {
        rows.iter().map(|r| r.value().unwrap()).collect()
    }

    #[test]
    fn test_window_size() {
        assert_eq!(window_size(900, 75), 12);
        assert_eq!(window_size(601, 75), 8);
        assert_eq!(window_size(37, 75), 0);
        assert_eq!(window_size(38, 75), 1);
        assert_eq!(window_size(112, 75), 1);
        assert_eq!(window_size(113, 75), 2);
        assert_eq!(window_size(100, 0), 0);
    }

    #[test]
    fn test_envelope_len() {
        assert_eq!(envelope_len(900, 12), 75);
        assert_eq!(envelope_len(905, 12), 75);
        assert_eq!(envelope_len(911, 12), 75);
        assert_eq!(envelope_len(912, 12), 76);
        assert_eq!(envelope_len(5, 0), 5);
        assert_eq!(envelope_len(3, 4), 0);
    }

    #[test]
    fn test_moving_max_and_min() {
        let input = rows(&[60, 80, 70, 90, 65, 75, 100]);
        assert_eq!(values(&moving_max(&input, 2).unwrap()), vec![80, 90, 75]);
        assert_eq!(values(&moving_min(&input, 2, DEFAULT_MIN_SENTINEL).unwrap()), vec![60, 70, 65]);
    }

    #[test]
    fn test_representative_uses_first_timestamp_of_window() {
        let input = rows(&[60, 80, 70, 90, 65, 75]);
        let reduced = moving_max(&input, 3).unwrap();
        assert_eq!(reduced.len(), 2);
        assert_eq!(reduced[0].fields[0], input[0].fields[0]);
        assert_eq!(reduced[1].fields[0], input[3].fields[0]);
        assert!(reduced.iter().all(|r| r.fields[1] == UNUSED_PLACEHOLDER));
    }

    #[test]
    fn test_trailing_partial_window_is_dropped() {
        let input = rows(&[60, 61, 62, 63, 200]);
        let reduced = moving_max(&input, 2).unwrap();
        assert_eq!(values(&reduced), vec![61, 63]);
    }

    #[test]
    fn test_zero_window_passes_through() {
        let input = rows(&[60, 61, 62]);
        assert_eq!(moving_max(&input, 0).unwrap(), input);
        assert_eq!(moving_min(&input, 0, DEFAULT_MIN_SENTINEL).unwrap(), input);
    }

    #[test]
    fn test_min_sentinel_caps_pathological_values() {
        let input = rows(&[600, 700]);
        assert_eq!(values(&moving_min(&input, 2, DEFAULT_MIN_SENTINEL).unwrap()), vec![500]);
        assert_eq!(values(&moving_min(&input, 2, i64::MAX).unwrap()), vec![600]);
    }

    #[test]
    fn test_outputs_stay_within_input_range() {
        let input: Vec<i64> = (0..1000).map(|i| 40 + (i * 37 % 130)).collect();
        let input_rows = rows(&input);
        let window = window_size(input_rows.len(), 75);
        let lo = *input.iter().min().unwrap();
        let hi = *input.iter().max().unwrap();

        let max = moving_max(&input_rows, window).unwrap();
        let min = moving_min(&input_rows, window, DEFAULT_MIN_SENTINEL).unwrap();
        assert_eq!(max.len(), envelope_len(input_rows.len(), window));
        assert_eq!(min.len(), max.len());
        for (hi_row, lo_row) in max.iter().zip(&min) {
            let (a, b) = (hi_row.value().unwrap(), lo_row.value().unwrap());
            assert!((lo..=hi).contains(&a));
            assert!((lo..=hi).contains(&b));
            assert!(a >= b);
        }
    }

    #[test]
    fn test_bad_value_inside_window_propagates() {
        let mut input = rows(&[60, 61, 62, 63]);
        input[1].fields[2] = "abc".to_string();
        assert!(matches!(moving_max(&input, 2), Err(ParseError::Value { line: 3, .. })));
    }
}
