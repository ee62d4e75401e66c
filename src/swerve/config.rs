use std::{fs, path::Path};

use serde::Deserialize;

use crate::error::{Result, SwerveError};

pub const DEFAULT_SWERVE_TIME_S: f64 = 0.2;
pub const DEFAULT_SWERVE_DELAY_S: f64 = 0.8;
pub const DEFAULT_SWERVE_COUNT: i32 = 8;
pub const DEFAULT_MOVE_MAGNITUDE_THRESHOLD: f32 = 0.1;

/// Raw interaction parameters.
///
/// Fields hold whatever the host supplied. Any value that is not strictly
/// positive stands for "use the built-in default"; the `*_or_default`
/// accessors resolve that on every read so edits apply on the next sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SwerveSettings {
    /// Max seconds between two opposite moves for them to form one swerve.
    pub swerve_time: f64,
    /// Max seconds between successive swerves before the gesture is canceled.
    pub swerve_delay: f64,
    /// Swerves required to perform the gesture.
    pub swerve_count: i32,
    /// Delta magnitude a sample must exceed to count as a move.
    pub move_magnitude_threshold: f32,
}

impl SwerveSettings {
    pub fn swerve_time_or_default(&self) -> f64 {
        positive_or(self.swerve_time, DEFAULT_SWERVE_TIME_S)
    }

    pub fn swerve_delay_or_default(&self) -> f64 {
        positive_or(self.swerve_delay, DEFAULT_SWERVE_DELAY_S)
    }

    pub fn swerve_count_or_default(&self) -> u32 {
        if self.swerve_count > 0 {
            self.swerve_count as u32
        } else {
            DEFAULT_SWERVE_COUNT as u32
        }
    }

    pub fn move_magnitude_threshold_or_default(&self) -> f32 {
        positive_or(
            self.move_magnitude_threshold,
            DEFAULT_MOVE_MAGNITUDE_THRESHOLD,
        )
    }

    /// Time budget of a complete gesture: every swerve at its slowest plus
    /// the longest allowed pause between consecutive swerves.
    pub fn total_timeout_completion_time(&self) -> f64 {
        let count = f64::from(self.swerve_count_or_default());
        let time = self.swerve_time_or_default();
        let delay = self.swerve_delay_or_default();
        time * count + (count - 1.0) * delay
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let file: SettingsFile = toml::from_str(raw)?;
        Ok(file.swerve)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| SwerveError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SettingsFile {
    swerve: SwerveSettings,
}

// NaN fails the comparison and falls back as well.
fn positive_or<T>(value: T, default: T) -> T
where
    T: PartialOrd + Default,
{
    if value > T::default() {
        value
    } else {
        default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroed_settings_resolve_to_defaults() {
        let settings = SwerveSettings::default();
        assert_eq!(settings.swerve_time_or_default(), DEFAULT_SWERVE_TIME_S);
        assert_eq!(settings.swerve_delay_or_default(), DEFAULT_SWERVE_DELAY_S);
        assert_eq!(settings.swerve_count_or_default(), 8);
        assert_eq!(
            settings.move_magnitude_threshold_or_default(),
            DEFAULT_MOVE_MAGNITUDE_THRESHOLD
        );
    }

    #[test]
    fn negative_and_nan_values_fall_back() {
        let settings = SwerveSettings {
            swerve_time: -1.0,
            swerve_delay: f64::NAN,
            swerve_count: -3,
            move_magnitude_threshold: 0.0,
        };
        assert_eq!(settings.swerve_time_or_default(), DEFAULT_SWERVE_TIME_S);
        assert_eq!(settings.swerve_delay_or_default(), DEFAULT_SWERVE_DELAY_S);
        assert_eq!(settings.swerve_count_or_default(), 8);
        assert_eq!(
            settings.move_magnitude_threshold_or_default(),
            DEFAULT_MOVE_MAGNITUDE_THRESHOLD
        );
    }

    #[test]
    fn positive_values_are_kept() {
        let settings = SwerveSettings {
            swerve_time: 0.35,
            swerve_delay: 1.5,
            swerve_count: 3,
            move_magnitude_threshold: 2.0,
        };
        assert_eq!(settings.swerve_time_or_default(), 0.35);
        assert_eq!(settings.swerve_delay_or_default(), 1.5);
        assert_eq!(settings.swerve_count_or_default(), 3);
        assert_eq!(settings.move_magnitude_threshold_or_default(), 2.0);
    }

    #[test]
    fn total_timeout_spans_every_swerve_and_gap() {
        let settings = SwerveSettings {
            swerve_time: 0.5,
            swerve_delay: 1.0,
            swerve_count: 3,
            move_magnitude_threshold: 0.0,
        };
        assert!((settings.total_timeout_completion_time() - 3.5).abs() < 1e-9);
    }

    #[test]
    fn toml_table_is_partial() {
        let settings = SwerveSettings::from_toml_str(
            "[swerve]\nswerve_count = 4\nswerve_time = 0.25\n",
        )
        .expect("valid toml");
        assert_eq!(settings.swerve_count, 4);
        assert_eq!(settings.swerve_time, 0.25);
        assert_eq!(settings.swerve_delay, 0.0);
        assert_eq!(settings.swerve_delay_or_default(), DEFAULT_SWERVE_DELAY_S);
    }

    #[test]
    fn missing_table_means_defaults() {
        let settings = SwerveSettings::from_toml_str("").expect("empty toml");
        assert_eq!(settings, SwerveSettings::default());
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let err = SwerveSettings::from_toml_str("[swerve]\nswerve_count = \"lots\"\n")
            .expect_err("string count must not parse");
        assert!(matches!(err, SwerveError::Toml(_)));
    }
}
