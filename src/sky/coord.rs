use serde::Deserialize;

use super::error::SkyError;

/// J2000 equatorial position of a source, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquatorialCoord {
    pub ra_deg: f64,
    pub dec_deg: f64,
}

/// Textual form used by the config file and the command line.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CoordText {
    pub ra: String,
    pub dec: String,
}

impl EquatorialCoord {
    /// Right ascension as `05h34m31.94s`, `05:34:31.94`, `83d37m59s` or decimal degrees.
    /// Declination as `+22d00m52.2s`, `+22:00:52.2` or decimal degrees.
    pub fn parse(ra: &str, dec: &str) -> Result<Self, SkyError> {
        // `10d00m` is degrees, `10h00m` and `10:00` are hours.
        let ra_in_degrees = ra.contains('d');
        let ra_deg = match parse_sexagesimal(ra) {
            Some(Sexagesimal::Components(degrees)) if ra_in_degrees => degrees,
            Some(Sexagesimal::Components(hours)) => hours * 15.0,
            Some(Sexagesimal::Decimal(degrees)) => degrees,
            None => return Err(SkyError::InvalidRightAscension(ra.to_string())),
        };
        if !(0.0..360.0).contains(&ra_deg) {
            return Err(SkyError::InvalidRightAscension(ra.to_string()));
        }

        let dec_deg = match parse_sexagesimal(dec) {
            Some(Sexagesimal::Components(v) | Sexagesimal::Decimal(v)) => v,
            None => return Err(SkyError::InvalidDeclination(dec.to_string())),
        };
        if !(-90.0..=90.0).contains(&dec_deg) {
            return Err(SkyError::InvalidDeclination(dec.to_string()));
        }

        Ok(Self { ra_deg, dec_deg })
    }
}

impl TryFrom<&CoordText> for EquatorialCoord {
    type Error = SkyError;

    fn try_from(text: &CoordText) -> Result<Self, Self::Error> {
        Self::parse(&text.ra, &text.dec)
    }
}

enum Sexagesimal {
    /// `a + b/60 + c/3600` in the unit of the first field.
    Components(f64),
    Decimal(f64),
}

fn parse_sexagesimal(text: &str) -> Option<Sexagesimal> {
    let text = text.trim();
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    let is_component_form = unsigned.contains(['h', 'd', 'm', ':', ' ']);
    if !is_component_form {
        let value: f64 = unsigned.parse().ok()?;
        return Some(Sexagesimal::Decimal(if negative { -value } else { value }));
    }

    let fields: Vec<f64> = unsigned
        .trim_end_matches('s')
        .split(['h', 'd', 'm', ':', ' '])
        .filter(|f| !f.is_empty())
        .map(|f| f.parse::<f64>())
        .collect::<Result<_, _>>()
        .ok()?;
    if fields.is_empty() || fields.len() > 3 || fields.iter().any(|f| *f < 0.0) {
        return None;
    }
    if fields[1..].iter().any(|f| *f >= 60.0) {
        return None;
    }

    let value = fields
        .iter()
        .zip([1.0, 60.0, 3600.0])
        .map(|(field, scale)| field / scale)
        .sum::<f64>();
    Some(Sexagesimal::Components(if negative { -value } else { value }))
}
