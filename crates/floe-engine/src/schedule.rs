//! The run schedule and the between-steps cancellation flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use floe_core::{ConfigError, ConfigStore, TimestepTime};

/// Simulated-time extent of a run: start, stop, and timestep length,
/// all in seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Schedule {
    /// First instant of the run.
    pub start: f64,
    /// Instant at which iteration ceases (exclusive).
    pub stop: f64,
    /// Timestep length.
    pub step: f64,
}

impl Schedule {
    /// Construct a validated schedule.
    ///
    /// `step` must be finite and positive; `stop` must not precede
    /// `start`. The errors carry the configuration key names the values
    /// conventionally come from.
    pub fn new(start: f64, stop: f64, step: f64) -> Result<Self, ConfigError> {
        if !step.is_finite() || step <= 0.0 {
            return Err(ConfigError::OutOfRange {
                key: "model.step".to_string(),
                value: step,
                min: f64::MIN_POSITIVE,
                max: f64::MAX,
            });
        }
        if !start.is_finite() || !stop.is_finite() || stop < start {
            return Err(ConfigError::OutOfRange {
                key: "model.stop".to_string(),
                value: stop,
                min: start,
                max: f64::MAX,
            });
        }
        Ok(Self { start, stop, step })
    }

    /// Read the schedule from `model.start` (default 0), `model.step`,
    /// and either `model.duration` or `model.stop`.
    ///
    /// When both are present, `model.duration` takes precedence and the
    /// stop time is `start + duration`.
    pub fn from_config(config: &ConfigStore) -> Result<Self, ConfigError> {
        let start = config.real_or("model.start", 0.0)?;
        let step = config.real("model.step")?;
        let stop = if config.contains("model.duration") {
            start + config.real("model.duration")?
        } else {
            config.real("model.stop")?
        };
        Self::new(start, stop, step)
    }

    /// Number of timesteps the schedule will run.
    pub fn steps(&self) -> u64 {
        self.times().count() as u64
    }

    /// The successive timestep intervals.
    ///
    /// Interval `i` starts at `start + i * step` (computed from the
    /// index, not accumulated, so rounding does not drift) and the
    /// iteration ends at the first interval whose start reaches `stop`.
    pub fn times(&self) -> TimestepIter {
        TimestepIter {
            schedule: *self,
            index: 0,
        }
    }
}

/// Iterator over a schedule's [`TimestepTime`] intervals.
#[derive(Clone, Debug)]
pub struct TimestepIter {
    schedule: Schedule,
    index: u64,
}

impl Iterator for TimestepIter {
    type Item = TimestepTime;

    fn next(&mut self) -> Option<TimestepTime> {
        let start = self.schedule.start + self.index as f64 * self.schedule.step;
        if start >= self.schedule.stop {
            return None;
        }
        self.index += 1;
        Some(TimestepTime::new(start, self.schedule.step))
    }
}

/// Cloneable cancellation flag, checked by the driver between timesteps
/// only; a component is never cancelled mid-update.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Create an unset flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. The in-flight timestep, if any, completes;
    /// its writes persist.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use floe_core::ConfigValue;
    use proptest::prelude::*;

    #[test]
    fn ten_hourly_steps() {
        let s = Schedule::new(0.0, 36_000.0, 3600.0).unwrap();
        assert_eq!(s.steps(), 10);
        let times: Vec<_> = s.times().collect();
        assert_eq!(times[0], TimestepTime::new(0.0, 3600.0));
        assert_eq!(times[9], TimestepTime::new(32_400.0, 3600.0));
    }

    #[test]
    fn zero_or_negative_step_rejected() {
        assert!(Schedule::new(0.0, 10.0, 0.0).is_err());
        assert!(Schedule::new(0.0, 10.0, -1.0).is_err());
        assert!(Schedule::new(0.0, 10.0, f64::NAN).is_err());
    }

    #[test]
    fn stop_before_start_rejected() {
        assert!(Schedule::new(10.0, 0.0, 1.0).is_err());
    }

    #[test]
    fn empty_schedule_runs_zero_steps() {
        let s = Schedule::new(5.0, 5.0, 1.0).unwrap();
        assert_eq!(s.steps(), 0);
    }

    #[test]
    fn duration_overrides_stop() {
        let config = ConfigStore::new()
            .with("model.start", ConfigValue::Real(100.0))
            .with("model.step", ConfigValue::Real(10.0))
            .with("model.stop", ConfigValue::Real(999.0))
            .with("model.duration", ConfigValue::Real(50.0));
        let s = Schedule::from_config(&config).unwrap();
        assert_eq!(s.stop, 150.0);
        assert_eq!(s.steps(), 5);
    }

    #[test]
    fn missing_step_names_the_key() {
        let config = ConfigStore::new().with("model.stop", ConfigValue::Real(10.0));
        let err = Schedule::from_config(&config).unwrap_err();
        assert!(err.to_string().contains("model.step"));
    }

    #[test]
    fn cancel_flag_is_shared() {
        let flag = CancelFlag::new();
        let other = flag.clone();
        assert!(!other.is_cancelled());
        flag.cancel();
        assert!(other.is_cancelled());
    }

    proptest! {
        /// Every interval starts strictly before `stop`, intervals are
        /// spaced exactly one step apart, and the count matches.
        #[test]
        fn intervals_cover_the_schedule(
            start in -1.0e6_f64..1.0e6,
            len in 0.0_f64..1.0e5,
            step in 0.5_f64..1.0e4,
        ) {
            let s = Schedule::new(start, start + len, step).unwrap();
            let times: Vec<_> = s.times().collect();
            prop_assert_eq!(times.len() as u64, s.steps());
            for (i, t) in times.iter().enumerate() {
                prop_assert!(t.start < s.stop);
                prop_assert_eq!(t.start, start + i as f64 * step);
                prop_assert_eq!(t.step, step);
            }
            // The next interval after the last would start at or past stop.
            prop_assert!(start + times.len() as f64 * step >= s.stop);
        }
    }
}
