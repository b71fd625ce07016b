// Chart request handed to the rendering collaborator
use serde::Serialize;

use super::row::Sample;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesData {
    pub id: String,
    pub name: String,
    pub color: Option<String>,
    pub points: Vec<Sample>,
}

impl SeriesData {
    pub fn new(id: String, name: String, color: Option<String>, points: Vec<Sample>) -> Self {
        Self {
            id,
            name,
            color,
            points,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    /// A single BPM line
    Line,
    /// Moving maximum and moving minimum drawn as a band
    Envelope,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartRequest {
    /// Source file name
    pub title: String,
    /// ISO-8601 instant of the first rendered point
    pub subtitle: String,
    pub kind: ChartKind,
    /// Absolute BPM bounds over the whole file
    pub y_min: Option<i64>,
    pub y_max: Option<i64>,
    pub time_format: String,
    pub series: Vec<SeriesData>,
}

impl ChartRequest {
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}
