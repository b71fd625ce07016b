// Series assembler - Rows to chart points
use crate::domain::chart::SeriesData;
use crate::domain::error::{LoadError, ParseError};
use crate::domain::row::{Row, Sample};
use crate::domain::timestamp::to_iso8601;
use crate::infrastructure::config::SeriesStyle;

pub fn to_points(rows: &[Row]) -> Result<Vec<Sample>, ParseError> {
    rows.iter().map(Row::to_sample).collect()
}

/// ISO-8601 instant of the first point, used as the chart subtitle.
pub fn subtitle(points: &[Sample]) -> Result<String, LoadError> {
    points
        .first()
        .and_then(|p| to_iso8601(p.time_ms))
        .ok_or(LoadError::EmptyInput)
}

/// Lowest and highest value, or `None` for no points.
pub fn value_bounds(points: &[Sample]) -> Option<(i64, i64)> {
    let min = points.iter().map(|p| p.value).min()?;
    let max = points.iter().map(|p| p.value).max()?;
    Some((min, max))
}

pub fn series(style: &SeriesStyle, points: Vec<Sample>) -> SeriesData {
    SeriesData::new(style.id.clone(), style.name.clone(), style.color.clone(), points)
}
