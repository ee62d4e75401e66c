// tan(30°) ≈ √3/3.
const SWERVE_CONE_TAN: f32 = 0.577;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Delta {
    pub x: f32,
    pub y: f32,
}

impl Delta {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn magnitude(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Angle from the positive x axis, in degrees.
    pub fn angle_degrees(self) -> f32 {
        self.y.atan2(self.x).to_degrees()
    }
}

/// One pointer-delta reading and the monotonic time (seconds) it was taken at.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Sample {
    pub delta: Delta,
    pub time: f64,
}

impl Sample {
    pub const fn new(dx: f32, dy: f32, time: f64) -> Self {
        Self {
            delta: Delta::new(dx, dy),
            time,
        }
    }

    pub fn magnitude(&self) -> f32 {
        self.delta.magnitude()
    }

    pub fn angle_degrees(&self) -> f32 {
        self.delta.angle_degrees()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SwerveDirection {
    #[default]
    None,
    Left,
    Right,
}

impl SwerveDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Classifier verdict for one delta.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveClass {
    /// Magnitude at or below the threshold.
    Small,
    /// Large move. `SwerveDirection::None` when it falls outside both horizontal cones.
    Swift(SwerveDirection),
}

impl MoveClass {
    /// The direction of a large move inside one of the horizontal cones.
    pub fn swerve_direction(self) -> Option<SwerveDirection> {
        match self {
            Self::Swift(SwerveDirection::None) | Self::Small => None,
            Self::Swift(direction) => Some(direction),
        }
    }
}

pub fn classify_move(delta: Delta, magnitude_threshold: f32) -> MoveClass {
    if delta.magnitude() <= magnitude_threshold {
        return MoveClass::Small;
    }

    let abs_dy = delta.y.abs();
    let direction = if delta.x > 0.0 && abs_dy < delta.x * SWERVE_CONE_TAN {
        SwerveDirection::Right
    } else if delta.x < 0.0 && abs_dy < -delta.x * SWERVE_CONE_TAN {
        SwerveDirection::Left
    } else {
        SwerveDirection::None
    };

    MoveClass::Swift(direction)
}
