//! Mouse-shake gesture detection.
//!
//! [`swerve`] holds the detector state machine and its collaborators,
//! [`interaction`] drives it the way an input host does, and [`trace`] /
//! [`replay`] feed recorded pointer traces through it.

pub mod error;
pub mod interaction;
pub mod replay;
pub mod swerve;
pub mod trace;

pub use error::{Result, SwerveError};
pub use interaction::{ActionEvent, ActionPhase, SwerveInteraction};
pub use swerve::{
    DeadlineTimer, Sample, SwerveDetector, SwerveDirection, SwervePhase, SwerveSettings,
    SwerveSignal, SwerveTimer,
};
