use chrono::{DateTime, Utc};

use super::coord::EquatorialCoord;
use super::error::SkyError;
use super::observer::Observer;
use crate::pointing::{HorizontalSample, Trajectory};

const ARCSEC_TO_RAD: f64 = std::f64::consts::PI / (180.0 * 3600.0);
const J2000_JD: f64 = 2_451_545.0;
const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Source of apparent horizontal positions for a pointing schedule.
pub trait HorizontalTransform {
    /// One sample per instant, in the same order.
    fn transform(
        &self,
        source: &EquatorialCoord,
        instants: &[DateTime<Utc>],
    ) -> Result<Trajectory, SkyError>;
}

/// Low precision J2000 -> horizontal conversion.
///
/// Applies IAU 1976 precession and Greenwich mean sidereal time. Nutation,
/// aberration and refraction are ignored, which is well inside the one degree
/// pointing tolerance of the dish.
#[derive(Debug, Clone, Copy)]
pub struct EquatorialTransform {
    observer: Observer,
}

impl EquatorialTransform {
    pub fn new(observer: Observer) -> Self {
        Self { observer }
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }

    pub fn horizontal(
        &self,
        source: &EquatorialCoord,
        instant: DateTime<Utc>,
    ) -> HorizontalSample {
        let (ra, dec) = precess_from_j2000(source, julian_centuries_since_j2000(&instant));

        let gmst = sgp4::iau_epoch_to_sidereal_time(sgp4::julian_years_since_j2000(
            &instant.naive_utc(),
        ));
        let hour_angle = gmst + self.observer.lon_rad() - ra;

        let lat = self.observer.lat_rad();
        let (sin_lat, cos_lat) = lat.sin_cos();
        let (sin_dec, cos_dec) = dec.sin_cos();
        let (sin_ha, cos_ha) = hour_angle.sin_cos();

        let elevation = (sin_lat * sin_dec + cos_lat * cos_dec * cos_ha)
            .clamp(-1.0, 1.0)
            .asin();
        let azimuth = (-cos_dec * sin_ha).atan2(sin_dec * cos_lat - cos_dec * cos_ha * sin_lat);

        HorizontalSample {
            timestamp: instant,
            azimuth_deg: azimuth.to_degrees().rem_euclid(360.0),
            elevation_deg: elevation.to_degrees(),
        }
    }
}

impl HorizontalTransform for EquatorialTransform {
    fn transform(
        &self,
        source: &EquatorialCoord,
        instants: &[DateTime<Utc>],
    ) -> Result<Trajectory, SkyError> {
        let samples = instants
            .iter()
            .map(|instant| self.horizontal(source, *instant))
            .collect();
        Ok(Trajectory::new(samples)?)
    }
}

fn julian_centuries_since_j2000(instant: &DateTime<Utc>) -> f64 {
    let seconds = instant.timestamp() as f64 + instant.timestamp_subsec_nanos() as f64 * 1e-9;
    let jd = UNIX_EPOCH_JD + seconds / 86_400.0;
    (jd - J2000_JD) / 36_525.0
}

/// Mean place at epoch `t` (Julian centuries) of a J2000 position, in radians.
fn precess_from_j2000(source: &EquatorialCoord, t: f64) -> (f64, f64) {
    let zeta = (2306.2181 * t + 0.30188 * t * t + 0.017998 * t * t * t) * ARCSEC_TO_RAD;
    let z = (2306.2181 * t + 1.09468 * t * t + 0.018203 * t * t * t) * ARCSEC_TO_RAD;
    let theta = (2004.3109 * t - 0.42665 * t * t - 0.041833 * t * t * t) * ARCSEC_TO_RAD;

    let ra0 = source.ra_deg.to_radians();
    let dec0 = source.dec_deg.to_radians();
    let (sin_dec0, cos_dec0) = dec0.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();
    let (sin_a, cos_a) = (ra0 + zeta).sin_cos();

    let a = cos_dec0 * sin_a;
    let b = cos_theta * cos_dec0 * cos_a - sin_theta * sin_dec0;
    let c = sin_theta * cos_dec0 * cos_a + cos_theta * sin_dec0;

    (a.atan2(b) + z, c.clamp(-1.0, 1.0).asin())
}
