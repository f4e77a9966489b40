use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimeUnit {
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
}

impl TimeUnit {
    /// Convert a count of this unit to seconds.
    pub fn to_seconds(&self, value: f64) -> f64 {
        match self {
            TimeUnit::Milliseconds => value / 1000.0,
            TimeUnit::Seconds => value,
            TimeUnit::Minutes => value * 60.0,
            TimeUnit::Hours => value * 3600.0,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            TimeUnit::Milliseconds => "ms",
            TimeUnit::Seconds => "s",
            TimeUnit::Minutes => "m",
            TimeUnit::Hours => "h",
        }
    }
}

/// Which way a step button moves the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Backward,
    Forward,
}

impl Direction {
    pub fn sign(&self) -> i64 {
        match self {
            Direction::Backward => -1,
            Direction::Forward => 1,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StepError {
    #[error("unsupported step size '{0}'")]
    UnknownToken(String),
}

/// The closed set of step sizes offered by the step selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepSize {
    Ms10,
    Ms100,
    #[default]
    S1,
    S10,
    M1,
    M30,
    H1,
}

impl StepSize {
    pub const ALL: &'static [StepSize] = &[
        StepSize::Ms10,
        StepSize::Ms100,
        StepSize::S1,
        StepSize::S10,
        StepSize::M1,
        StepSize::M30,
        StepSize::H1,
    ];

    pub fn magnitude(&self) -> u32 {
        match self {
            StepSize::Ms10 => 10,
            StepSize::Ms100 => 100,
            StepSize::S1 => 1,
            StepSize::S10 => 10,
            StepSize::M1 => 1,
            StepSize::M30 => 30,
            StepSize::H1 => 1,
        }
    }

    pub(crate) fn unit(&self) -> TimeUnit {
        match self {
            StepSize::Ms10 | StepSize::Ms100 => TimeUnit::Milliseconds,
            StepSize::S1 | StepSize::S10 => TimeUnit::Seconds,
            StepSize::M1 | StepSize::M30 => TimeUnit::Minutes,
            StepSize::H1 => TimeUnit::Hours,
        }
    }

    pub fn seconds(&self) -> f64 {
        self.unit().to_seconds(self.magnitude() as f64)
    }

    /// The label shown in the step selector, e.g. `"100 ms"`.
    pub fn label(&self) -> String {
        format!("{} {}", self.magnitude(), self.unit().symbol())
    }

    /// Signed frame delta for one step, truncated toward zero.
    pub fn frame_delta(&self, direction: Direction, sampling_frequency: f64) -> i64 {
        (direction.sign() as f64 * self.seconds() * sampling_frequency) as i64
    }
}

impl FromStr for StepSize {
    type Err = StepError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let normalized = token.split_whitespace().collect::<Vec<_>>().join(" ");
        Self::ALL
            .iter()
            .copied()
            .find(|step| step.label() == normalized)
            .ok_or_else(|| StepError::UnknownToken(token.to_string()))
    }
}

impl std::fmt::Display for StepSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}
