//! Multi-swerve ("shake") gesture recognition.
//!
//! A swerve is a swift horizontal move followed, within `swerve_time`, by a
//! swift move in the opposite direction. The gesture starts on the first
//! swerve and is performed once `swerve_count` swerves have been chained, each
//! no more than `swerve_delay` after the previous one.

mod classify;
mod config;
mod core;
mod timer;

pub use classify::{classify_move, Delta, MoveClass, Sample, SwerveDirection};
pub use config::{
    SwerveSettings, DEFAULT_MOVE_MAGNITUDE_THRESHOLD, DEFAULT_SWERVE_COUNT,
    DEFAULT_SWERVE_DELAY_S, DEFAULT_SWERVE_TIME_S,
};
pub use self::core::{SwerveDetector, SwervePhase, SwerveSignal, SwerveSnapshot};
pub use timer::{DeadlineTimer, SwerveTimer};
