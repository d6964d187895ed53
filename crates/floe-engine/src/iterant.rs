//! The composable start/step/stop protocol.
//!
//! An [`Iterant`] is one unit of the timestep-iteration tree: started
//! once before the loop, stepped once per timestep, stopped once after
//! the loop or on early termination. [`Sequence`] composes children into
//! a fixed-order tree; children never run concurrently within one step.

use std::error::Error;
use std::fmt;

use floe_core::{TimestepTime, UpdateError};

/// Lifecycle state of an iterant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Constructed, `start` not yet called.
    Unstarted,
    /// Between `start` and `stop`; `step` is valid.
    Running,
    /// After `stop`; terminal.
    Stopped,
}

impl Default for Phase {
    fn default() -> Self {
        Self::Unstarted
    }
}

/// Errors from driving an iterant.
#[derive(Clone, Debug, PartialEq)]
pub enum IterateError {
    /// `start` called on an iterant that is not Unstarted.
    AlreadyStarted,
    /// `step` called outside the Running phase.
    NotRunning,
    /// A component's update failed during a step.
    Component {
        /// Name of the failing component.
        name: String,
        /// The underlying update error.
        reason: UpdateError,
    },
}

impl fmt::Display for IterateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyStarted => write!(f, "iterant already started"),
            Self::NotRunning => write!(f, "iterant is not running"),
            Self::Component { name, reason } => {
                write!(f, "component '{name}' failed: {reason}")
            }
        }
    }
}

impl Error for IterateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Component { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

/// A composable step object: start once, step N times, stop once.
///
/// # Contract
///
/// - `start` is valid only in the Unstarted phase and fails with
///   [`IterateError::AlreadyStarted`] otherwise.
/// - `step` is valid only while Running.
/// - `stop` is infallible cleanup. The driver guarantees it is called
///   exactly once, even when a `step` returned an error; implementations
///   must tolerate `stop` in any phase.
pub trait Iterant {
    /// Enter the Running phase. `at` is the simulated start time in
    /// seconds.
    fn start(&mut self, at: f64) -> Result<(), IterateError>;

    /// Advance one timestep over the given interval.
    fn step(&mut self, time: TimestepTime) -> Result<(), IterateError>;

    /// Leave the Running phase and release per-run state. `at` is the
    /// simulated time at which iteration ended.
    fn stop(&mut self, at: f64);
}

/// A composite iterant sequencing children in declared order.
///
/// `start` and `stop` are forwarded to every child exactly once; each
/// `step` is forwarded to all children in the same fixed order before
/// returning. A child's step error propagates immediately; the driver
/// is responsible for the subsequent `stop`. A child's start error
/// stops the children already started and leaves the sequence Stopped.
#[derive(Default)]
pub struct Sequence {
    children: Vec<Box<dyn Iterant>>,
    phase: Phase,
}

impl Sequence {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a child; it will run after all previously added children.
    pub fn push(&mut self, child: Box<dyn Iterant>) {
        self.children.push(child);
    }

    /// Chainable [`push`](Sequence::push).
    pub fn with(mut self, child: Box<dyn Iterant>) -> Self {
        self.push(child);
        self
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether the sequence has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }
}

impl Iterant for Sequence {
    fn start(&mut self, at: f64) -> Result<(), IterateError> {
        if self.phase != Phase::Unstarted {
            return Err(IterateError::AlreadyStarted);
        }
        for i in 0..self.children.len() {
            if let Err(err) = self.children[i].start(at) {
                // Unwind the children started so far; stop is their
                // guaranteed cleanup.
                for child in &mut self.children[..i] {
                    child.stop(at);
                }
                self.phase = Phase::Stopped;
                return Err(err);
            }
        }
        self.phase = Phase::Running;
        Ok(())
    }

    fn step(&mut self, time: TimestepTime) -> Result<(), IterateError> {
        if self.phase != Phase::Running {
            return Err(IterateError::NotRunning);
        }
        for child in &mut self.children {
            child.step(time)?;
        }
        Ok(())
    }

    fn stop(&mut self, at: f64) {
        if self.phase == Phase::Running {
            for child in &mut self.children {
                child.stop(at);
            }
        }
        self.phase = Phase::Stopped;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records every call it receives, tagged with its name.
    struct Recorder {
        name: &'static str,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl Iterant for Recorder {
        fn start(&mut self, _at: f64) -> Result<(), IterateError> {
            self.log.borrow_mut().push(format!("{}:start", self.name));
            Ok(())
        }
        fn step(&mut self, time: TimestepTime) -> Result<(), IterateError> {
            self.log
                .borrow_mut()
                .push(format!("{}:step@{}", self.name, time.start));
            Ok(())
        }
        fn stop(&mut self, _at: f64) {
            self.log.borrow_mut().push(format!("{}:stop", self.name));
        }
    }

    fn recorder(name: &'static str, log: &Rc<RefCell<Vec<String>>>) -> Box<dyn Iterant> {
        Box::new(Recorder {
            name,
            log: log.clone(),
        })
    }

    #[test]
    fn children_run_in_declared_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut seq = Sequence::new()
            .with(recorder("a", &log))
            .with(recorder("b", &log));

        seq.start(0.0).unwrap();
        seq.step(TimestepTime::new(0.0, 1.0)).unwrap();
        seq.step(TimestepTime::new(1.0, 1.0)).unwrap();
        seq.stop(2.0);

        assert_eq!(
            *log.borrow(),
            vec![
                "a:start", "b:start", "a:step@0", "b:step@0", "a:step@1", "b:step@1", "a:stop",
                "b:stop",
            ]
        );
    }

    /// Starts successfully `readiness` times, then fails.
    struct Unready {
        readiness: usize,
    }

    impl Iterant for Unready {
        fn start(&mut self, _at: f64) -> Result<(), IterateError> {
            if self.readiness == 0 {
                return Err(IterateError::Component {
                    name: "unready".to_string(),
                    reason: UpdateError::ExecutionFailed {
                        reason: "resource unavailable".to_string(),
                    },
                });
            }
            self.readiness -= 1;
            Ok(())
        }
        fn step(&mut self, _time: TimestepTime) -> Result<(), IterateError> {
            Ok(())
        }
        fn stop(&mut self, _at: f64) {}
    }

    #[test]
    fn failed_start_stops_already_started_children() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut seq = Sequence::new()
            .with(recorder("a", &log))
            .with(Box::new(Unready { readiness: 0 }))
            .with(recorder("c", &log));

        assert!(seq.start(0.0).is_err());

        // The child started before the failure was stopped; the one
        // after it was never touched.
        assert_eq!(*log.borrow(), vec!["a:start", "a:stop"]);
        assert_eq!(seq.phase(), Phase::Stopped);
        assert_eq!(seq.start(0.0), Err(IterateError::AlreadyStarted));
    }

    #[test]
    fn double_start_rejected() {
        let mut seq = Sequence::new();
        seq.start(0.0).unwrap();
        assert_eq!(seq.start(0.0), Err(IterateError::AlreadyStarted));
    }

    #[test]
    fn step_requires_running() {
        let mut seq = Sequence::new();
        assert_eq!(
            seq.step(TimestepTime::new(0.0, 1.0)),
            Err(IterateError::NotRunning)
        );
        seq.start(0.0).unwrap();
        seq.stop(0.0);
        assert_eq!(
            seq.step(TimestepTime::new(0.0, 1.0)),
            Err(IterateError::NotRunning)
        );
    }

    #[test]
    fn stop_forwards_to_children_once() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut seq = Sequence::new().with(recorder("a", &log));
        seq.start(0.0).unwrap();
        seq.stop(1.0);
        seq.stop(1.0); // second stop is a guarded no-op
        assert_eq!(*log.borrow(), vec!["a:start", "a:stop"]);
    }

    #[test]
    fn stop_before_start_is_safe() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut seq = Sequence::new().with(recorder("a", &log));
        seq.stop(0.0);
        assert!(log.borrow().is_empty());
        // Terminal: cannot be restarted.
        assert_eq!(seq.start(0.0), Err(IterateError::AlreadyStarted));
    }

    #[test]
    fn nested_sequences_compose() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let inner = Sequence::new()
            .with(recorder("i1", &log))
            .with(recorder("i2", &log));
        let mut outer = Sequence::new()
            .with(recorder("o1", &log))
            .with(Box::new(inner));

        outer.start(0.0).unwrap();
        outer.step(TimestepTime::new(0.0, 1.0)).unwrap();
        outer.stop(1.0);

        assert_eq!(
            *log.borrow(),
            vec![
                "o1:start", "i1:start", "i2:start", "o1:step@0", "i1:step@0", "i2:step@0",
                "o1:stop", "i1:stop", "i2:stop",
            ]
        );
    }
}
