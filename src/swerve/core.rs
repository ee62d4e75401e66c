use log::{debug, trace};
use statig::{blocking::IntoStateMachineExt as _, prelude::*};

use super::{
    classify::{classify_move, Sample, SwerveDirection},
    config::SwerveSettings,
    timer::SwerveTimer,
};

/// Notification produced by one `process` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwerveSignal {
    /// First swerve recognized; the delay timeout has been armed.
    Started,
    /// Required number of swerves reached.
    Performed,
    /// The armed timeout fired before the next swerve.
    Canceled,
}

impl SwerveSignal {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::Performed => "performed",
            Self::Canceled => "canceled",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwervePhase {
    WaitingForFirstSwerve,
    WaitingForAnotherSwerve,
}

impl SwervePhase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::WaitingForFirstSwerve => "waiting_for_first_swerve",
            Self::WaitingForAnotherSwerve => "waiting_for_another_swerve",
        }
    }
}

/// Observable detector state, for callers that need to compare runs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwerveSnapshot {
    pub phase: SwervePhase,
    pub swerve_count: u32,
    pub last_direction: SwerveDirection,
    pub last_move_time: f64,
}

#[derive(Clone, Copy, Debug)]
enum SwerveHsmEvent {
    Sample(Sample),
    TimerExpired,
}

#[derive(Clone, Copy, Debug)]
struct DispatchContext {
    settings: SwerveSettings,
    signal: Option<SwerveSignal>,
    arm_timeout_s: Option<f64>,
}

impl DispatchContext {
    fn new(settings: SwerveSettings) -> Self {
        Self {
            settings,
            signal: None,
            arm_timeout_s: None,
        }
    }

    fn emit(&mut self, signal: SwerveSignal) {
        self.signal = Some(signal);
    }

    fn arm_delay_timeout(&mut self) {
        self.arm_timeout_s = Some(self.settings.swerve_delay_or_default());
    }
}

/// Detects a chain of left/right swerves in a stream of pointer deltas.
///
/// The detector never resets itself: after `Performed` it keeps counting, and
/// after `Canceled` it stays in its current phase. The owner is expected to
/// call [`SwerveDetector::reset`] after either outcome.
pub struct SwerveDetector<T> {
    machine: statig::blocking::StateMachine<SwerveHsm>,
    settings: SwerveSettings,
    timer: T,
}

impl<T: SwerveTimer> SwerveDetector<T> {
    pub fn new(settings: SwerveSettings, timer: T) -> Self {
        Self {
            machine: SwerveHsm::new().state_machine(),
            settings,
            timer,
        }
    }

    /// Feeds one tick. When `timer_expired` is set the sample is ignored and
    /// the tick always yields `Canceled`.
    pub fn process(&mut self, sample: Sample, timer_expired: bool) -> Option<SwerveSignal> {
        let event = if timer_expired {
            SwerveHsmEvent::TimerExpired
        } else {
            SwerveHsmEvent::Sample(sample)
        };

        let mut context = DispatchContext::new(self.settings);
        self.machine.handle_with_context(&event, &mut context);

        if let Some(timeout_s) = context.arm_timeout_s {
            self.timer.arm(timeout_s);
        }
        context.signal
    }

    pub fn reset(&mut self) {
        self.machine = SwerveHsm::new().state_machine();
        self.timer.cancel();
    }

    pub fn phase(&self) -> SwervePhase {
        match self.machine.state() {
            State::WaitingForFirstSwerve { .. } => SwervePhase::WaitingForFirstSwerve,
            State::WaitingForAnotherSwerve { .. } => SwervePhase::WaitingForAnotherSwerve,
        }
    }

    pub fn swerve_count(&self) -> u32 {
        self.machine.swerve_count
    }

    pub fn last_direction(&self) -> SwerveDirection {
        self.machine.last_direction
    }

    pub fn last_move_time(&self) -> f64 {
        self.machine.last_move_time
    }

    pub fn snapshot(&self) -> SwerveSnapshot {
        SwerveSnapshot {
            phase: self.phase(),
            swerve_count: self.swerve_count(),
            last_direction: self.last_direction(),
            last_move_time: self.last_move_time(),
        }
    }

    pub fn settings(&self) -> &SwerveSettings {
        &self.settings
    }

    /// Edits take effect on the next `process` call.
    pub fn settings_mut(&mut self) -> &mut SwerveSettings {
        &mut self.settings
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }
}

struct SwerveHsm {
    last_direction: SwerveDirection,
    last_move_time: f64,
    swerve_count: u32,
}

impl SwerveHsm {
    fn new() -> Self {
        Self {
            last_direction: SwerveDirection::None,
            last_move_time: 0.0,
            swerve_count: 0,
        }
    }

    /// Records a horizontal swift move and reports whether it reversed the
    /// previous one inside the swerve window.
    fn observe_move(&mut self, settings: &SwerveSettings, sample: &Sample) -> bool {
        let class = classify_move(
            sample.delta,
            settings.move_magnitude_threshold_or_default(),
        );
        let Some(direction) = class.swerve_direction() else {
            return false;
        };

        let now = sample.time;
        let swerve_window_s = settings.swerve_time_or_default();
        let reversed = self.last_direction != SwerveDirection::None
            && direction != self.last_direction
            && now < self.last_move_time + swerve_window_s;

        trace!(
            "swerve: move dir={} t={:.3} reversed={}",
            direction.as_str(),
            now,
            reversed
        );

        self.last_direction = direction;
        self.last_move_time = now;
        reversed
    }
}

#[state_machine(initial = "State::waiting_for_first_swerve()")]
impl SwerveHsm {
    #[superstate]
    fn tracking(&mut self, context: &mut DispatchContext, event: &SwerveHsmEvent) -> Outcome<State> {
        match event {
            SwerveHsmEvent::TimerExpired => {
                debug!("swerve: canceled count={}", self.swerve_count);
                context.emit(SwerveSignal::Canceled);
                Handled
            }
            SwerveHsmEvent::Sample(_) => Handled,
        }
    }

    #[state(superstate = "tracking")]
    fn waiting_for_first_swerve(
        &mut self,
        context: &mut DispatchContext,
        event: &SwerveHsmEvent,
    ) -> Outcome<State> {
        match event {
            SwerveHsmEvent::Sample(sample) => {
                if self.observe_move(&context.settings, sample) {
                    self.swerve_count = 1;
                    context.emit(SwerveSignal::Started);
                    context.arm_delay_timeout();
                    debug!("swerve: started count=1 t={:.3}", sample.time);
                    return Transition(State::waiting_for_another_swerve());
                }
                Handled
            }
            SwerveHsmEvent::TimerExpired => Super,
        }
    }

    #[state(superstate = "tracking")]
    fn waiting_for_another_swerve(
        &mut self,
        context: &mut DispatchContext,
        event: &SwerveHsmEvent,
    ) -> Outcome<State> {
        match event {
            SwerveHsmEvent::Sample(sample) => {
                if self.observe_move(&context.settings, sample) {
                    self.swerve_count = self.swerve_count.saturating_add(1);
                    let target = context.settings.swerve_count_or_default();
                    if self.swerve_count >= target {
                        debug!(
                            "swerve: performed count={} target={} t={:.3}",
                            self.swerve_count, target, sample.time
                        );
                        context.emit(SwerveSignal::Performed);
                    } else {
                        debug!(
                            "swerve: continued count={} target={} t={:.3}",
                            self.swerve_count, target, sample.time
                        );
                        context.arm_delay_timeout();
                    }
                }
                Handled
            }
            SwerveHsmEvent::TimerExpired => Super,
        }
    }
}
