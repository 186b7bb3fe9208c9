use thiserror::Error;

use crate::fazel::FazelError;
use crate::pointing::PointingError;
use crate::sky::SkyError;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("{0}")]
    Sky(#[from] SkyError),
    #[error("{0}")]
    Pointing(#[from] PointingError),
    #[error("{0}")]
    Fazel(#[from] FazelError),
}
