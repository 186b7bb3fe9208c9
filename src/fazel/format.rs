use chrono::{DateTime, Utc};

use super::error::FazelError;
use crate::pointing::CorrectedSample;

/// Rate terms are not used by the antenna controller but must be present.
pub const RATE_PLACEHOLDER: &str = "-0.0";

const TENTHS_PER_DEGREE: u64 = 36_000;
const TENTHS_PER_ARCMIN: u64 = 600;

/// Renders an angle as `D M S.s`, rounded to a tenth of an arcsecond.
pub fn format_angle(degrees: f64) -> String {
    let tenths = (degrees.abs() * TENTHS_PER_DEGREE as f64).round() as u64;
    let whole_degrees = tenths / TENTHS_PER_DEGREE;
    let arcmin = (tenths % TENTHS_PER_DEGREE) / TENTHS_PER_ARCMIN;
    let arcsec_tenths = tenths % TENTHS_PER_ARCMIN;
    // Keep the sign even when the degree field is zero.
    let sign = if degrees < 0.0 && tenths > 0 { "-" } else { "" };

    format!(
        "{}{} {} {}.{}",
        sign,
        whole_degrees,
        arcmin,
        arcsec_tenths / 10,
        arcsec_tenths % 10
    )
}

/// `YYYY.DDD.HH:MM:SS`, fractional seconds dropped.
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y.%j.%H:%M:%S").to_string()
}

pub fn format_line(sample: &CorrectedSample) -> String {
    format!(
        "{} {} {} {} {}",
        format_timestamp(&sample.timestamp),
        format_angle(sample.azimuth_deg),
        RATE_PLACEHOLDER,
        format_angle(sample.elevation_deg),
        RATE_PLACEHOLDER
    )
}

/// Builds the whole pointing file in memory.
pub fn render(header: &str, corrected: &[CorrectedSample]) -> Result<String, FazelError> {
    let header = header.strip_suffix('\n').unwrap_or(header);
    if !header.starts_with('#') || header.contains('\n') {
        return Err(FazelError::InvalidHeader(header.to_string()));
    }

    let mut out = String::with_capacity(header.len() + 1 + corrected.len() * 48);
    out.push_str(header);
    out.push('\n');
    for sample in corrected {
        out.push_str(&format_line(sample));
        out.push('\n');
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn dms(d: f64, m: f64, s: f64) -> f64 {
        d + m / 60.0 + s / 3600.0
    }

    fn sample(azimuth_deg: f64, elevation_deg: f64) -> CorrectedSample {
        CorrectedSample {
            timestamp: Utc.with_ymd_and_hms(2015, 6, 1, 4, 0, 0).unwrap(),
            azimuth_deg,
            elevation_deg,
            tolerance_deg: 1.0,
        }
    }

    #[test]
    fn reference_line() {
        let line = format_line(&sample(dms(10.0, 20.0, 30.5), dms(5.0, 6.0, 7.8)));
        assert_eq!(line, "2015.152.04:00:00 10 20 30.5 -0.0 5 6 7.8 -0.0");
    }

    #[test]
    fn negative_angles_keep_their_sign() {
        assert_eq!(format_angle(-dms(5.0, 6.0, 7.8)), "-5 6 7.8");
        assert_eq!(format_angle(-0.5), "-0 30 0.0");
        assert_eq!(format_angle(-0.000_001), "0 0 0.0");
    }

    #[test]
    fn rounding_carries_into_minutes_and_degrees() {
        assert_eq!(format_angle(dms(10.0, 59.0, 59.96)), "11 0 0.0");
        assert_eq!(format_angle(dms(3.0, 4.0, 59.97)), "3 5 0.0");
        assert_eq!(format_angle(0.0), "0 0 0.0");
        assert_eq!(format_angle(359.5), "359 30 0.0");
    }

    #[test]
    fn timestamp_pads_day_of_year_and_truncates_seconds() {
        let t = Utc.with_ymd_and_hms(2015, 1, 5, 23, 59, 59).unwrap() + Duration::milliseconds(900);
        assert_eq!(format_timestamp(&t), "2015.005.23:59:59");
    }

    #[test]
    fn render_writes_header_then_one_line_per_sample() {
        let mut second = sample(dms(11.0, 0.0, 0.0), dms(6.0, 0.0, 0.0));
        second.timestamp += Duration::seconds(1000);
        let text = render(
            "#Crab Fazel for chime feed, 2015-06-01\n",
            &[sample(dms(10.0, 20.0, 30.5), dms(5.0, 6.0, 7.8)), second],
        )
        .unwrap();
        assert_eq!(
            text,
            "#Crab Fazel for chime feed, 2015-06-01\n\
             2015.152.04:00:00 10 20 30.5 -0.0 5 6 7.8 -0.0\n\
             2015.152.04:16:40 11 0 0.0 -0.0 6 0 0.0 -0.0\n"
        );
    }

    #[test]
    fn render_rejects_bad_headers() {
        assert!(matches!(
            render("Crab", &[]),
            Err(FazelError::InvalidHeader(_))
        ));
        assert!(matches!(
            render("#Crab\n#again", &[]),
            Err(FazelError::InvalidHeader(_))
        ));
    }
}
