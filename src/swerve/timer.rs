/// One-shot timeout the detector asks its host for.
///
/// Arming while a timeout is pending replaces it. An armed timeout must be
/// reported as expired at most once.
pub trait SwerveTimer {
    fn arm(&mut self, timeout_s: f64);
    fn cancel(&mut self);
}

/// Deadline-based timer driven by the caller's clock.
///
/// `advance` must be called with the current time before the detector gets a
/// chance to arm, so deadlines are measured from the sample being processed.
#[derive(Clone, Copy, Debug, Default)]
pub struct DeadlineTimer {
    now: f64,
    deadline: Option<f64>,
}

impl DeadlineTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, now: f64) {
        self.now = now;
    }

    pub fn deadline(&self) -> Option<f64> {
        self.deadline
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Advances to `now` and reports whether the pending deadline has passed.
    /// An expired deadline is consumed.
    pub fn poll_expired(&mut self, now: f64) -> bool {
        self.advance(now);
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

impl SwerveTimer for DeadlineTimer {
    fn arm(&mut self, timeout_s: f64) {
        self.deadline = Some(self.now + timeout_s);
    }

    fn cancel(&mut self) {
        self.deadline = None;
    }
}
