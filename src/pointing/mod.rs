mod error;
mod offsets;
mod types;
mod windows;

pub use error::PointingError;
pub use offsets::{
    correct, correct_trajectory, remove_offsets, Feed, FeedOffsetParams, ANGULAR_TOLERANCE_DEG,
    ELEVATION_FLOOR_DEG,
};
pub use types::{CorrectedSample, HorizontalSample, Trajectory};
pub use windows::{
    detect_windows, HazardBoundary, HazardBounds, WindowEvent, WindowEventKind, WindowReport,
    CABLE_WRAP_MARGIN_DEG, CLOCKWISE_LIMIT_DEG, COUNTER_CLOCKWISE_LIMIT_DEG,
};
