use chrono::{DateTime, Duration, Utc};

use super::error::PointingError;

/// Apparent position of a source as seen by the observer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalSample {
    pub timestamp: DateTime<Utc>,
    pub azimuth_deg: f64,
    pub elevation_deg: f64,
}

/// Where the dish has to point so the feed sees the source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrectedSample {
    pub timestamp: DateTime<Utc>,
    pub azimuth_deg: f64,
    pub elevation_deg: f64,
    pub tolerance_deg: f64,
}

/// A non-empty series of horizontal samples on a fixed time grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    samples: Vec<HorizontalSample>,
    step: Duration,
}

#[allow(clippy::len_without_is_empty)]
impl Trajectory {
    pub fn new(samples: Vec<HorizontalSample>) -> Result<Self, PointingError> {
        let first = samples.first().ok_or(PointingError::EmptyTrajectory)?;

        let step = match samples.get(1) {
            Some(second) => second.timestamp - first.timestamp,
            None => Duration::zero(),
        };

        for (i, pair) in samples.windows(2).enumerate() {
            let delta = pair[1].timestamp - pair[0].timestamp;
            if delta <= Duration::zero() {
                return Err(PointingError::NonIncreasingTimestamps { index: i + 1 });
            }
            if delta != step {
                return Err(PointingError::UnevenStep {
                    index: i + 1,
                    expected: step,
                    actual: delta,
                });
            }
        }

        Ok(Self { samples, step })
    }

    pub fn samples(&self) -> &[HorizontalSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.samples[0].timestamp
    }

    /// Zero for a single-sample trajectory.
    pub fn step(&self) -> Duration {
        self.step
    }

    pub fn timestamps(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        self.samples.iter().map(|s| s.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample(seconds: i64) -> HorizontalSample {
        HorizontalSample {
            timestamp: Utc.with_ymd_and_hms(2015, 6, 1, 16, 0, 0).unwrap()
                + Duration::seconds(seconds),
            azimuth_deg: 180.0,
            elevation_deg: 30.0,
        }
    }

    #[test]
    fn accepts_regular_grid() {
        let trajectory = Trajectory::new(vec![sample(0), sample(10), sample(20)]).unwrap();
        assert_eq!(trajectory.len(), 3);
        assert_eq!(trajectory.step(), Duration::seconds(10));
        assert_eq!(trajectory.start(), sample(0).timestamp);
    }

    #[test]
    fn single_sample_is_valid() {
        let trajectory = Trajectory::new(vec![sample(0)]).unwrap();
        assert_eq!(trajectory.step(), Duration::zero());
    }

    #[test]
    fn rejects_empty() {
        assert!(matches!(
            Trajectory::new(Vec::new()),
            Err(PointingError::EmptyTrajectory)
        ));
    }

    #[test]
    fn rejects_non_increasing() {
        let err = Trajectory::new(vec![sample(0), sample(10), sample(10)]).unwrap_err();
        assert!(matches!(
            err,
            PointingError::NonIncreasingTimestamps { index: 2 }
        ));
    }

    #[test]
    fn rejects_uneven_step() {
        let err = Trajectory::new(vec![sample(0), sample(10), sample(25)]).unwrap_err();
        assert!(matches!(err, PointingError::UnevenStep { index: 2, .. }));
    }
}
