use thiserror::Error;

/// Failures while building a [`CurvePath`](super::CurvePath).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TrackError {
    /// Control points must come in groups of 4 (start, control 1, control 2, end).
    #[error("track needs a non-zero multiple of 4 control points, got {points}")]
    InvalidSegmentCount { points: usize },
}
