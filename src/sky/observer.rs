use super::error::SkyError;

// WGS-84
const SEMI_MAJOR_AXIS_M: f64 = 6_378_137.0;
const ECCENTRICITY_SQ: f64 = 0.00669437999014;

/// Geocentric position of the Algonquin Radio Observatory 46 m dish.
pub const ARO_ECEF_M: [f64; 3] = [918_034.4879, -4_346_132.3267, 4_561_971.2292];

/// Geodetic location of the telescope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observer {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_m: f64,
}

impl Default for Observer {
    fn default() -> Self {
        Self::from_ecef(ARO_ECEF_M)
    }
}

impl Observer {
    /// Parses `"lat, lon"` in decimal degrees.
    pub fn from_coordinates(
        coordinates: &str,
        altitude_m: Option<f64>,
    ) -> Result<Self, SkyError> {
        let invalid = || SkyError::InvalidObserver(coordinates.to_string());
        let parts: Vec<_> = coordinates.split(',').map(|s| s.trim()).collect();
        if parts.len() != 2 {
            return Err(invalid());
        }
        let latitude_deg: f64 = parts[0].parse().map_err(|_| invalid())?;
        let longitude_deg: f64 = parts[1].parse().map_err(|_| invalid())?;
        if !(-90.0..=90.0).contains(&latitude_deg) || !(-180.0..=360.0).contains(&longitude_deg) {
            return Err(invalid());
        }
        Ok(Self {
            latitude_deg,
            longitude_deg,
            altitude_m: altitude_m.unwrap_or(0.0),
        })
    }

    /// Geodetic position from geocentric metres (Bowring iteration).
    pub fn from_ecef(ecef_m: [f64; 3]) -> Self {
        let [x, y, z] = ecef_m;
        let p = x.hypot(y);
        let lon = y.atan2(x);

        let mut lat = z.atan2(p * (1.0 - ECCENTRICITY_SQ));
        let mut height = 0.0;
        for _ in 0..6 {
            let sin_lat = lat.sin();
            let n = SEMI_MAJOR_AXIS_M / (1.0 - ECCENTRICITY_SQ * sin_lat * sin_lat).sqrt();
            height = p / lat.cos() - n;
            lat = z.atan2(p * (1.0 - ECCENTRICITY_SQ * n / (n + height)));
        }

        Self {
            latitude_deg: lat.to_degrees(),
            longitude_deg: lon.to_degrees(),
            altitude_m: height,
        }
    }

    pub fn lat_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }

    pub fn lon_rad(&self) -> f64 {
        self.longitude_deg.to_radians()
    }

    pub fn position_ecef_m(&self) -> [f64; 3] {
        let lat = self.lat_rad();
        let lon = self.lon_rad();
        let sin_lat = lat.sin();
        let cos_lat = lat.cos();
        let n = SEMI_MAJOR_AXIS_M / (1.0 - ECCENTRICITY_SQ * sin_lat * sin_lat).sqrt();
        let x = (n + self.altitude_m) * cos_lat * lon.cos();
        let y = (n + self.altitude_m) * cos_lat * lon.sin();
        let z = (n * (1.0 - ECCENTRICITY_SQ) + self.altitude_m) * sin_lat;
        [x, y, z]
    }
}
