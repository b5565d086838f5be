//! Run configuration.
//!
//! A `SimulationConfig` is edited freely between runs. A run reads it once,
//! in `Session::start`, and plays back with the values it started with.

use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ProfileError};
use crate::vehicles::VehicleKind;

/// Accepted release altitudes in meters.
pub const ALTITUDE_RANGE: RangeInclusive<f64> = 100.0..=30_000.0;

/// Accepted playback speed multipliers (samples advanced per frame).
pub const PLAYBACK_SPEED_RANGE: RangeInclusive<u32> = 1..=100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub vehicle: VehicleKind,
    pub altitude_m: f64,
    pub duration_s: f64,
    pub time_step_s: f64,
    pub playback_speed: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            vehicle: VehicleKind::Brick,
            altitude_m: 9000.0,
            duration_s: 120.0,
            time_step_s: 0.01,
            playback_speed: 1,
        }
    }
}

impl SimulationConfig {
    /// Parse a config from YAML. Missing fields take their defaults.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ProfileError> {
        Ok(serde_yaml::from_str(contents)?)
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ProfileError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_altitude(self.altitude_m)?;
        check_playback_speed(self.playback_speed)?;
        if !(self.duration_s > 0.0) {
            return Err(ConfigError::InvalidDuration(self.duration_s));
        }
        if !(self.time_step_s > 0.0 && self.time_step_s <= self.duration_s) {
            return Err(ConfigError::InvalidTimeStep(self.time_step_s));
        }
        Ok(())
    }
}

pub(crate) fn check_altitude(altitude_m: f64) -> Result<(), ConfigError> {
    if ALTITUDE_RANGE.contains(&altitude_m) {
        Ok(())
    } else {
        Err(ConfigError::AltitudeOutOfRange {
            value: altitude_m,
            min: *ALTITUDE_RANGE.start(),
            max: *ALTITUDE_RANGE.end(),
        })
    }
}

pub(crate) fn check_playback_speed(speed: u32) -> Result<(), ConfigError> {
    if PLAYBACK_SPEED_RANGE.contains(&speed) {
        Ok(())
    } else {
        Err(ConfigError::PlaybackSpeedOutOfRange {
            value: speed,
            min: *PLAYBACK_SPEED_RANGE.start(),
            max: *PLAYBACK_SPEED_RANGE.end(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let config = SimulationConfig {
            altitude_m: 50.0,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::AltitudeOutOfRange { .. })
        ));

        let config = SimulationConfig {
            playback_speed: 0,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PlaybackSpeedOutOfRange { value: 0, .. })
        ));

        let config = SimulationConfig {
            time_step_s: 0.0,
            ..SimulationConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidTimeStep(0.0)));

        let config = SimulationConfig {
            duration_s: f64::NAN,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDuration(_))
        ));
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = SimulationConfig::from_yaml_str("vehicle: blueberry\naltitude_m: 3000\n")
            .unwrap();
        assert_eq!(config.vehicle, VehicleKind::Blueberry);
        assert_eq!(config.altitude_m, 3000.0);
        assert_eq!(config.duration_s, 120.0);
        assert_eq!(config.playback_speed, 1);
    }

    #[test]
    fn test_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.yaml");
        fs::write(&path, "vehicle: bowlingball\nplayback_speed: 10\n").unwrap();
        let config = SimulationConfig::from_yaml_file(&path).unwrap();
        assert_eq!(config.vehicle, VehicleKind::BowlingBall);
        assert_eq!(config.playback_speed, 10);
    }
}
