//! The timestep interval type consumed by component updates.

use std::fmt;

/// One iteration's time interval: a start instant and a duration.
///
/// Both values are seconds of simulated time. A `TimestepTime` is
/// constructed by the driver loop for each step and handed down the
/// iterant tree; consumers never mutate it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimestepTime {
    /// Start of the interval, seconds since the model epoch.
    pub start: f64,
    /// Length of the interval in seconds.
    pub step: f64,
}

impl TimestepTime {
    /// Construct an interval from its start and duration.
    pub fn new(start: f64, step: f64) -> Self {
        Self { start, step }
    }

    /// End of the interval: `start + step`.
    pub fn end(&self) -> f64 {
        self.start + self.step
    }
}

impl fmt::Display for TimestepTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_is_start_plus_step() {
        let t = TimestepTime::new(7200.0, 3600.0);
        assert_eq!(t.end(), 10800.0);
    }
}
