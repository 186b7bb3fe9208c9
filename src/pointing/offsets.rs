use std::str::FromStr;

use strum_macros::Display;

use super::error::PointingError;
use super::types::{CorrectedSample, HorizontalSample, Trajectory};

/// Lowest elevation the dish can point at.
pub const ELEVATION_FLOOR_DEG: f64 = 11.9;
/// Pointing tolerance at the elevation floor.
pub const ANGULAR_TOLERANCE_DEG: f64 = 1.0;

// Below this the cosine ratio blows up.
const MIN_COS_ELEVATION: f64 = 1e-12;

/// Receivers that can be mounted on the dish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Feed {
    #[strum(serialize = "chime")]
    Chime,
    #[strum(serialize = "hirax")]
    Hirax,
    #[strum(serialize = "4m")]
    FourMetre,
    #[strum(serialize = "xmas")]
    Xmas,
    #[strum(serialize = "nooffsets")]
    NoOffsets,
}

impl Feed {
    pub const ALL: [Feed; 5] = [
        Feed::Chime,
        Feed::Hirax,
        Feed::FourMetre,
        Feed::Xmas,
        Feed::NoOffsets,
    ];

    pub fn params(&self) -> FeedOffsetParams {
        // The CHIME and XMAS feeds sit off the dish axis.
        let (altitude_offset_deg, azimuth_offset_deg) = match self {
            Feed::Chime => (-3.45, -3.25),
            Feed::Xmas => (-3.45, 3.25),
            Feed::Hirax | Feed::FourMetre | Feed::NoOffsets => (0.0, 0.0),
        };
        FeedOffsetParams {
            altitude_offset_deg,
            azimuth_offset_deg,
            elevation_floor_deg: ELEVATION_FLOOR_DEG,
            angular_tolerance_deg: ANGULAR_TOLERANCE_DEG,
        }
    }
}

impl FromStr for Feed {
    type Err = PointingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        Feed::ALL
            .into_iter()
            .find(|feed| feed.to_string() == name)
            .ok_or_else(|| PointingError::UnknownFeed(s.to_string()))
    }
}

/// Mechanical offsets of a feed relative to the dish axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedOffsetParams {
    pub altitude_offset_deg: f64,
    pub azimuth_offset_deg: f64,
    pub elevation_floor_deg: f64,
    pub angular_tolerance_deg: f64,
}

impl FeedOffsetParams {
    /// cos(floor) / cos(elevation), the azimuthal stretch at `elevation_deg`.
    fn cos_ratio(&self, elevation_deg: f64) -> Option<f64> {
        let cos_el = elevation_deg.to_radians().cos();
        if cos_el.abs() < MIN_COS_ELEVATION {
            return None;
        }
        Some(self.elevation_floor_deg.to_radians().cos() / cos_el)
    }
}

/// Corrects a single sample. A zenith sample is reported at index 0.
pub fn correct(
    sample: &HorizontalSample,
    params: &FeedOffsetParams,
) -> Result<CorrectedSample, PointingError> {
    correct_at(0, sample, params)
}

pub fn correct_trajectory(
    trajectory: &Trajectory,
    params: &FeedOffsetParams,
) -> Result<Vec<CorrectedSample>, PointingError> {
    trajectory
        .samples()
        .iter()
        .enumerate()
        .map(|(i, sample)| correct_at(i, sample, params))
        .collect()
}

fn correct_at(
    index: usize,
    sample: &HorizontalSample,
    params: &FeedOffsetParams,
) -> Result<CorrectedSample, PointingError> {
    let ratio = params
        .cos_ratio(sample.elevation_deg)
        .ok_or(PointingError::ZenithSingularity {
            index,
            timestamp: sample.timestamp,
        })?;

    Ok(CorrectedSample {
        timestamp: sample.timestamp,
        azimuth_deg: sample.azimuth_deg + params.azimuth_offset_deg * ratio,
        elevation_deg: sample.elevation_deg + params.altitude_offset_deg,
        tolerance_deg: params.angular_tolerance_deg * ratio,
    })
}

/// Recovers the source position from a corrected sample.
pub fn remove_offsets(
    corrected: &CorrectedSample,
    params: &FeedOffsetParams,
) -> Result<HorizontalSample, PointingError> {
    let elevation_deg = corrected.elevation_deg - params.altitude_offset_deg;
    let ratio = params
        .cos_ratio(elevation_deg)
        .ok_or(PointingError::ZenithSingularity {
            index: 0,
            timestamp: corrected.timestamp,
        })?;

    Ok(HorizontalSample {
        timestamp: corrected.timestamp,
        azimuth_deg: corrected.azimuth_deg - params.azimuth_offset_deg * ratio,
        elevation_deg,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chrono::{TimeZone, Utc};

    fn sample(azimuth_deg: f64, elevation_deg: f64) -> HorizontalSample {
        HorizontalSample {
            timestamp: Utc.with_ymd_and_hms(2015, 6, 1, 16, 0, 0).unwrap(),
            azimuth_deg,
            elevation_deg,
        }
    }

    #[test]
    fn parses_feed_names() {
        assert_eq!("chime".parse::<Feed>().unwrap(), Feed::Chime);
        assert_eq!("4m".parse::<Feed>().unwrap(), Feed::FourMetre);
        assert_eq!(" XMAS ".parse::<Feed>().unwrap(), Feed::Xmas);
        assert_eq!("nooffsets".parse::<Feed>().unwrap(), Feed::NoOffsets);
        assert!(matches!(
            "gbt".parse::<Feed>(),
            Err(PointingError::UnknownFeed(name)) if name == "gbt"
        ));
    }

    #[test]
    fn feed_display_round_trips() {
        for feed in Feed::ALL {
            assert_eq!(feed.to_string().parse::<Feed>().unwrap(), feed);
        }
    }

    #[test]
    fn chime_at_floor_applies_raw_offsets() {
        // At the floor elevation the cosine ratio is exactly one.
        let params = Feed::Chime.params();
        let corrected = correct(&sample(100.0, ELEVATION_FLOOR_DEG), &params).unwrap();
        assert_abs_diff_eq!(corrected.azimuth_deg, 96.75, epsilon = 1e-12);
        assert_abs_diff_eq!(corrected.elevation_deg, 8.45, epsilon = 1e-12);
        assert_abs_diff_eq!(corrected.tolerance_deg, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn azimuth_offset_grows_with_elevation() {
        let params = Feed::Xmas.params();
        let corrected = correct(&sample(200.0, 60.0), &params).unwrap();
        let ratio = ELEVATION_FLOOR_DEG.to_radians().cos() / 0.5;
        assert_abs_diff_eq!(corrected.azimuth_deg, 200.0 + 3.25 * ratio, epsilon = 1e-9);
        assert_abs_diff_eq!(corrected.elevation_deg, 56.55, epsilon = 1e-12);
        assert_abs_diff_eq!(corrected.tolerance_deg, ratio, epsilon = 1e-12);
    }

    #[test]
    fn nooffsets_is_identity_on_position() {
        let params = Feed::NoOffsets.params();
        for elevation in [-45.0, 0.0, 11.9, 45.0, 89.0] {
            let corrected = correct(&sample(123.4, elevation), &params).unwrap();
            assert_eq!(corrected.azimuth_deg, 123.4);
            assert_eq!(corrected.elevation_deg, elevation);
        }
    }

    #[test]
    fn remove_offsets_inverts_correct() {
        for feed in Feed::ALL {
            let params = feed.params();
            let mut elevation = -89.5;
            while elevation < 89.5 {
                let original = sample(47.0, elevation);
                let corrected = correct(&original, &params).unwrap();
                let recovered = remove_offsets(&corrected, &params).unwrap();
                assert_abs_diff_eq!(recovered.azimuth_deg, 47.0, epsilon = 1e-9);
                assert_abs_diff_eq!(recovered.elevation_deg, elevation, epsilon = 1e-9);
                elevation += 0.5;
            }
        }
    }

    #[test]
    fn zenith_is_rejected() {
        // cos(90 deg) in f64 is ~6e-17, not zero
        assert!(matches!(
            correct(&sample(0.0, 90.0), &Feed::Chime.params()),
            Err(PointingError::ZenithSingularity { index: 0, .. })
        ));
    }

    #[test]
    fn trajectory_error_carries_index() {
        let base = sample(10.0, 45.0);
        let samples = (0..3)
            .map(|i| HorizontalSample {
                timestamp: base.timestamp + chrono::Duration::seconds(i),
                elevation_deg: if i == 2 { -90.0 } else { 45.0 },
                ..base
            })
            .collect();
        let trajectory = Trajectory::new(samples).unwrap();
        assert!(matches!(
            correct_trajectory(&trajectory, &Feed::Hirax.params()),
            Err(PointingError::ZenithSingularity { index: 2, .. })
        ));
    }
}
