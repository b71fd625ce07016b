// Domain layer - Heart-rate samples, timestamps and envelope downsampling
pub mod chart;
pub mod envelope;
pub mod error;
pub mod row;
pub mod timestamp;
pub mod upload;
