use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::{
    DEFAULT_TIMEOUT_SECS, FORECAST_URL, GEOCODING_URL, Geolocation,
    forecast::{TemperatureUnit, WindSpeedUnit},
};

/// A saved place used when no location is given on the command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedLocation {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<&Geolocation> for SavedLocation {
    fn from(place: &Geolocation) -> Self {
        Self {
            name: place.display_name(),
            latitude: place.latitude,
            longitude: place.longitude,
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// language = "de"
/// temperature_unit = "celsius"
///
/// [default_location]
/// name = "Berlin, Land Berlin, Germany"
/// latitude = 52.52437
/// longitude = 13.41053
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub forecast_url: String,
    pub geocoding_url: String,
    pub timeout_secs: u64,

    /// Language for geocoding results, e.g. "en" or "de".
    pub language: Option<String>,
    pub temperature_unit: Option<TemperatureUnit>,
    pub windspeed_unit: Option<WindSpeedUnit>,
    pub default_location: Option<SavedLocation>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            forecast_url: FORECAST_URL.to_string(),
            geocoding_url: GEOCODING_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            language: None,
            temperature_unit: None,
            windspeed_unit: None,
            default_location: None,
        }
    }
}

impl Config {
    /// The configured default location, or an error telling the user how to set one.
    pub fn require_default_location(&self) -> Result<&SavedLocation> {
        self.default_location.as_ref().ok_or_else(|| {
            anyhow!(
                "No location given and no default location configured.\n\
                 Hint: pass a place name, use --lat/--lon, or run `meteo configure` first."
            )
        })
    }

    pub fn set_default_location(&mut self, location: SavedLocation) {
        self.default_location = Some(location);
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        fs::write(&path, self.to_toml()?)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Invalid configuration TOML")
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "meteo", "meteo-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_public_endpoints() {
        let cfg = Config::default();

        assert_eq!(cfg.forecast_url, "https://api.open-meteo.com/v1/forecast");
        assert_eq!(cfg.geocoding_url, "https://geocoding-api.open-meteo.com/v1/search");
        assert_eq!(cfg.timeout_secs, 30);
        assert!(cfg.default_location.is_none());
    }

    #[test]
    fn require_default_location_errors_when_not_set() {
        let cfg = Config::default();
        let err = cfg.require_default_location().unwrap_err();

        assert!(err.to_string().contains("no default location configured"));
        assert!(err.to_string().contains("meteo configure"));
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let cfg = Config::from_toml(
            r#"
            language = "de"
            windspeed_unit = "kn"

            [default_location]
            name = "Berlin"
            latitude = 52.52
            longitude = 13.41
            "#,
        )
        .expect("valid config");

        assert_eq!(cfg.language.as_deref(), Some("de"));
        assert_eq!(cfg.windspeed_unit, Some(WindSpeedUnit::Knots));
        assert_eq!(cfg.temperature_unit, None);
        assert_eq!(cfg.forecast_url, FORECAST_URL);
        assert_eq!(cfg.require_default_location().expect("set").name, "Berlin");
    }

    #[test]
    fn unknown_unit_is_rejected() {
        let err = Config::from_toml(r#"temperature_unit = "kelvin""#).unwrap_err();
        assert!(err.to_string().contains("Invalid configuration TOML"));
    }

    #[test]
    fn toml_round_trip_preserves_settings() {
        let mut cfg = Config {
            temperature_unit: Some(TemperatureUnit::Fahrenheit),
            language: Some("fr".into()),
            ..Config::default()
        };
        cfg.set_default_location(SavedLocation {
            name: "Paris, Île-de-France, France".into(),
            latitude: 48.85341,
            longitude: 2.3488,
        });

        let text = cfg.to_toml().expect("serializes");
        let parsed = Config::from_toml(&text).expect("parses");

        assert_eq!(parsed, cfg);
    }
}
