use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PointingError {
    #[error("unknown feed: {0} (expected one of chime, hirax, 4m, xmas, nooffsets)")]
    UnknownFeed(String),
    #[error("trajectory has no samples")]
    EmptyTrajectory,
    #[error("timestamps not strictly increasing at sample {index}")]
    NonIncreasingTimestamps { index: usize },
    #[error("uneven time step at sample {index}: expected {expected}, got {actual}")]
    UnevenStep {
        index: usize,
        expected: Duration,
        actual: Duration,
    },
    #[error("{corrected} corrected samples for a trajectory of {expected}")]
    LengthMismatch { expected: usize, corrected: usize },
    #[error("elevation at sample {index} ({timestamp}) is at the zenith, offsets are undefined")]
    ZenithSingularity {
        index: usize,
        timestamp: DateTime<Utc>,
    },
    #[error("source is not visible during specified run (max elevation {max_elevation_deg:.2} deg, floor {floor_deg} deg)")]
    NotVisible {
        floor_deg: f64,
        max_elevation_deg: f64,
    },
}
