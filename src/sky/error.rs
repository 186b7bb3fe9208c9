use thiserror::Error;

use crate::pointing::PointingError;

#[derive(Debug, Error)]
pub enum SkyError {
    #[error("invalid right ascension: {0}")]
    InvalidRightAscension(String),
    #[error("invalid declination: {0}")]
    InvalidDeclination(String),
    #[error("invalid observer coordinates: {0}")]
    InvalidObserver(String),
    #[error("trajectory error: {0}")]
    Pointing(#[from] PointingError),
}
