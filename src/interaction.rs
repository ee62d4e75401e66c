use log::{debug, trace};

use crate::swerve::{
    DeadlineTimer, Delta, Sample, SwerveDetector, SwerveSettings, SwerveSignal,
};

/// Phase of the bound action as a host would report it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ActionPhase {
    #[default]
    Waiting,
    Started,
    Performed,
    Canceled,
}

impl ActionPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Started => "started",
            Self::Performed => "performed",
            Self::Canceled => "canceled",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActionEvent {
    pub signal: SwerveSignal,
    pub time: f64,
    /// Swerves counted when the signal was emitted.
    pub swerve_count: u32,
}

/// Drives a [`SwerveDetector`] the way an input host does: it owns the
/// timeout, turns the clock into expiry flags, and resets the detector after
/// every Performed or Canceled outcome.
pub struct SwerveInteraction {
    detector: SwerveDetector<DeadlineTimer>,
    phase: ActionPhase,
    started_at: Option<f64>,
}

impl SwerveInteraction {
    pub fn new(settings: SwerveSettings) -> Self {
        Self {
            detector: SwerveDetector::new(settings, DeadlineTimer::new()),
            phase: ActionPhase::Waiting,
            started_at: None,
        }
    }

    pub fn phase(&self) -> ActionPhase {
        self.phase
    }

    pub fn detector(&self) -> &SwerveDetector<DeadlineTimer> {
        &self.detector
    }

    pub fn settings_mut(&mut self) -> &mut SwerveSettings {
        self.detector.settings_mut()
    }

    pub fn pending_deadline(&self) -> Option<f64> {
        self.detector.timer().deadline()
    }

    /// Feeds one pointer sample. A timeout that ran out before `sample.time`
    /// cancels the gesture and the sample is dropped.
    pub fn update(&mut self, sample: Sample) -> Option<ActionEvent> {
        self.settle();
        trace!(
            "swerve: sample t={:.3} distance={:.3} angle={:.1}",
            sample.time,
            sample.magnitude(),
            sample.angle_degrees()
        );

        let expired = self.detector.timer_mut().poll_expired(sample.time);
        self.dispatch(sample, expired)
    }

    /// Fires the pending timeout if it is due at `now`, without a new sample.
    pub fn poll_timeout(&mut self, now: f64) -> Option<ActionEvent> {
        self.settle();
        if !self.detector.timer_mut().poll_expired(now) {
            return None;
        }
        let idle = Sample {
            delta: Delta::default(),
            time: now,
        };
        self.dispatch(idle, true)
    }

    /// Fraction of the whole-gesture time budget used since the gesture
    /// started.
    pub fn timeout_completion(&self, now: f64) -> f32 {
        match (self.phase, self.started_at) {
            (ActionPhase::Performed, _) => 1.0,
            (ActionPhase::Started, Some(started_at)) => {
                let budget = self.detector.settings().total_timeout_completion_time();
                ((now - started_at) / budget).clamp(0.0, 1.0) as f32
            }
            _ => 0.0,
        }
    }

    pub fn reset(&mut self) {
        self.detector.reset();
        self.phase = ActionPhase::Waiting;
        self.started_at = None;
    }

    fn dispatch(&mut self, sample: Sample, timer_expired: bool) -> Option<ActionEvent> {
        let signal = self.detector.process(sample, timer_expired)?;
        let event = ActionEvent {
            signal,
            time: sample.time,
            swerve_count: self.detector.swerve_count(),
        };

        match signal {
            SwerveSignal::Started => {
                self.phase = ActionPhase::Started;
                self.started_at = Some(sample.time);
            }
            SwerveSignal::Performed => {
                self.phase = ActionPhase::Performed;
                self.detector.reset();
            }
            SwerveSignal::Canceled => {
                self.phase = ActionPhase::Canceled;
                self.started_at = None;
                self.detector.reset();
            }
        }
        debug!(
            "swerve: action phase={} t={:.3} count={}",
            self.phase.as_str(),
            event.time,
            event.swerve_count
        );

        Some(event)
    }

    // Performed and Canceled last for one tick before the action waits again.
    fn settle(&mut self) {
        if matches!(self.phase, ActionPhase::Performed | ActionPhase::Canceled) {
            self.phase = ActionPhase::Waiting;
            self.started_at = None;
        }
    }
}
