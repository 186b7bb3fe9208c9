use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

use crate::pointing::{
    HazardBounds, CABLE_WRAP_MARGIN_DEG, CLOCKWISE_LIMIT_DEG, COUNTER_CLOCKWISE_LIMIT_DEG,
};
use crate::sky::{CoordText, EquatorialCoord, Observer, SkyError, ARO_ECEF_M};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("observer: {0}")]
    Observer(#[source] SkyError),
    #[error("source {name}: {source}")]
    Source { name: String, source: SkyError },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub observer: ObserverConfig,
    pub hazard: HazardConfig,
    /// Named J2000 positions, looked up case-insensitively with spaces ignored.
    pub sources: BTreeMap<String, CoordText>,
}

/// Either `coordinates: "lat, lon"` with `altitude_m`, or `ecef_m: [x, y, z]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObserverConfig {
    pub name: Option<String>,
    pub coordinates: Option<String>,
    pub altitude_m: f64,
    pub ecef_m: Option<[f64; 3]>,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            name: Some("ARO".to_string()),
            coordinates: None,
            altitude_m: 0.0,
            ecef_m: Some(ARO_ECEF_M),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HazardConfig {
    pub clockwise_limit_deg: f64,
    pub counter_clockwise_limit_deg: f64,
    pub margin_deg: f64,
}

impl Default for HazardConfig {
    fn default() -> Self {
        Self {
            clockwise_limit_deg: CLOCKWISE_LIMIT_DEG,
            counter_clockwise_limit_deg: COUNTER_CLOCKWISE_LIMIT_DEG,
            margin_deg: CABLE_WRAP_MARGIN_DEG,
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        // Surface bad entries at load time rather than when first used.
        config.observer()?;
        for (name, coord) in &config.sources {
            EquatorialCoord::try_from(coord).map_err(|source| ConfigError::Source {
                name: name.clone(),
                source,
            })?;
        }
        Ok(config)
    }

    pub fn observer(&self) -> Result<Observer, ConfigError> {
        match (&self.observer.coordinates, self.observer.ecef_m) {
            (Some(coordinates), _) => {
                Observer::from_coordinates(coordinates, Some(self.observer.altitude_m))
                    .map_err(ConfigError::Observer)
            }
            (None, Some(ecef)) => Ok(Observer::from_ecef(ecef)),
            (None, None) => Ok(Observer::default()),
        }
    }

    pub fn hazard_bounds(&self) -> HazardBounds {
        HazardBounds::from_limits(
            self.hazard.clockwise_limit_deg,
            self.hazard.counter_clockwise_limit_deg,
            self.hazard.margin_deg,
        )
    }

    /// Looks up `name` as given, simplified (`"PSR B1957+20"` -> `"psrb1957+20"`),
    /// and with a `psr` prefix.
    pub fn find_source(&self, name: &str) -> Option<(String, EquatorialCoord)> {
        let simplified = simplify_source_name(name);
        let candidates = [name.to_string(), simplified.clone(), format!("psr{simplified}")];

        candidates.iter().find_map(|candidate| {
            self.sources
                .iter()
                .find(|(key, _)| *key == candidate || simplify_source_name(key) == *candidate)
                .and_then(|(key, coord)| {
                    EquatorialCoord::try_from(coord)
                        .ok()
                        .map(|c| (simplify_source_name(key), c))
                })
        })
    }
}

/// Lower case with spaces removed, as used in file names.
pub fn simplify_source_name(name: &str) -> String {
    name.to_lowercase().replace(' ', "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const YAML: &str = r#"
observer:
  name: DRAO
  coordinates: "49.3208, -119.6236"
  altitude_m: 545
hazard:
  margin_deg: 5
sources:
  crab:
    ra: "05h34m31.94s"
    dec: "+22d00m52.2s"
  psrb0329+54:
    ra: "03:32:59.368"
    dec: "+54:34:43.57"
  Cas A:
    ra: "350.866"
    dec: "58.8117"
"#;

    #[test]
    fn defaults_to_aro() {
        let config = Config::from_yaml("{}").unwrap();
        let observer = config.observer().unwrap();
        assert_abs_diff_eq!(observer.latitude_deg, 45.9555, epsilon = 1e-3);
        assert_eq!(config.hazard_bounds(), HazardBounds::default());
        assert!(config.sources.is_empty());
    }

    #[test]
    fn parses_full_file() {
        let config = Config::from_yaml(YAML).unwrap();
        let observer = config.observer().unwrap();
        assert_eq!(observer.latitude_deg, 49.3208);
        assert_eq!(observer.altitude_m, 545.0);

        let bounds = config.hazard_bounds();
        assert_eq!(bounds.clockwise_deg, 46.0);
        assert_eq!(bounds.counter_clockwise_deg, 46.0);
    }

    #[test]
    fn finds_sources_by_loose_name() {
        let config = Config::from_yaml(YAML).unwrap();

        let (name, crab) = config.find_source("Crab").unwrap();
        assert_eq!(name, "crab");
        assert_abs_diff_eq!(crab.ra_deg, 83.633_083, epsilon = 1e-6);

        let (name, _) = config.find_source("B0329+54").unwrap();
        assert_eq!(name, "psrb0329+54");

        let (name, cas_a) = config.find_source("cas a").unwrap();
        assert_eq!(name, "casa");
        assert_eq!(cas_a.dec_deg, 58.8117);

        assert!(config.find_source("Vela").is_none());
    }

    #[test]
    fn rejects_bad_source_entries() {
        let yaml = "sources:\n  bad:\n    ra: \"25h\"\n    dec: \"0\"\n";
        assert!(matches!(
            Config::from_yaml(yaml),
            Err(ConfigError::Source { name, .. }) if name == "bad"
        ));
    }

    #[test]
    fn rejects_bad_observer() {
        let yaml = "observer:\n  coordinates: \"north\"\n";
        assert!(matches!(
            Config::from_yaml(yaml),
            Err(ConfigError::Observer(_))
        ));
    }

    #[test]
    fn reads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fazel.yaml");
        std::fs::write(&path, YAML).unwrap();
        assert_eq!(Config::from_file(&path).unwrap().sources.len(), 3);
        assert!(matches!(
            Config::from_file(&dir.path().join("missing.yaml")),
            Err(ConfigError::Io(_))
        ));
    }
}
