//! Position controller: walks the current position toward the latest target
//! in bounded steps and hands each step to the actuator writer.
//!
//! The hand-off is a zero-capacity channel, so `send` blocks until the
//! writer has finished its previous write and rate-limit sleep. That is the
//! only pacing the controller has; it never sleeps itself.
use crossbeam_channel as xch;
use std::time::Duration;
use tracing::{debug, trace};

use crate::error::{BuildError, ServoError};
use crate::target::TargetListener;

/// Relative slack on the snap threshold. Repeated `+= step` accumulates
/// rounding error, which would otherwise leave a sub-ulp remainder and cost
/// an extra tick at the end of a long move.
const SNAP_TOLERANCE: f64 = 1e-9;

/// Maximum change in normalized position per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepSize(f64);

impl StepSize {
    /// `move_interval / max_move`. A zero `max_move` means no smoothing:
    /// every target is reached in a single tick.
    pub fn new(move_interval: Duration, max_move: Duration) -> Result<Self, BuildError> {
        if move_interval.is_zero() {
            return Err(BuildError::InvalidConfig("move interval must be > 0"));
        }
        if max_move.is_zero() {
            return Ok(Self::unbounded());
        }
        Ok(Self(move_interval.as_secs_f64() / max_move.as_secs_f64()))
    }

    /// Step size that jumps straight to every target.
    pub fn unbounded() -> Self {
        Self(f64::INFINITY)
    }

    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn is_unbounded(self) -> bool {
        self.0.is_infinite()
    }
}

/// Next position on the way from `current` to `target`.
///
/// Snaps to `target` when there is no known position yet or the remaining
/// distance is less than one step; otherwise moves exactly one step closer.
pub fn next_position(current: Option<f64>, target: f64, step: StepSize) -> f64 {
    let Some(cur) = current else {
        return target;
    };
    let distance = (target - cur).abs();
    if distance < step.0 * (1.0 + SNAP_TOLERANCE) {
        return target;
    }
    if cur < target {
        cur + step.0
    } else {
        cur - step.0
    }
}

/// What the controller should do next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControllerState {
    /// Nothing to do; wait for a new target or for the input to close.
    Idle,
    /// Current position differs from (or predates) the target.
    Moving { target: f64 },
    /// Input closed and the last target has been reached.
    Terminal,
}

/// Outcome of a finished control loop.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControllerReport {
    /// Last position handed to the writer.
    pub final_position: Option<f64>,
    /// Number of positions emitted.
    pub ticks: u64,
}

pub struct PositionController {
    listener: TargetListener,
    moves: xch::Sender<f64>,
    step: StepSize,
    current: Option<f64>,
    ticks: u64,
}

impl PositionController {
    pub fn new(listener: TargetListener, moves: xch::Sender<f64>, step: StepSize) -> Self {
        Self {
            listener,
            moves,
            step,
            current: None,
            ticks: 0,
        }
    }

    /// Start from a known position instead of "unknown". The first target
    /// is then approached in steps rather than placed directly.
    pub fn with_position(mut self, position: f64) -> Self {
        self.current = Some(position);
        self
    }

    fn evaluate(&self, input_closed: bool) -> ControllerState {
        match self.listener.current() {
            Some(target) if self.current != Some(target) => ControllerState::Moving { target },
            _ if input_closed => ControllerState::Terminal,
            _ => ControllerState::Idle,
        }
    }

    /// Run until the input is closed and the last target is reached.
    ///
    /// Dropping `self` at the end closes the move channel, which lets the
    /// writer finish the queued write and exit.
    pub fn run(mut self) -> Result<ControllerReport, ServoError> {
        let mut input_closed = false;
        debug!(step = self.step.get(), "position controller started");

        loop {
            match self.evaluate(input_closed) {
                ControllerState::Moving { target } => {
                    let next = next_position(self.current, target, self.step);
                    self.moves
                        .send(next)
                        .map_err(|_| ServoError::WriterStopped)?;
                    self.current = Some(next);
                    self.ticks += 1;
                    trace!(position = next, target, "move");
                }
                ControllerState::Idle => {
                    trace!(position = ?self.current, "idle");
                    if !self.listener.wait() {
                        debug!("input closed; finishing last move");
                        input_closed = true;
                    }
                }
                ControllerState::Terminal => break,
            }
        }

        debug!(
            position = ?self.current,
            ticks = self.ticks,
            "position controller finished"
        );
        Ok(ControllerReport {
            final_position: self.current,
            ticks: self.ticks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::target_channel;

    fn step(v: f64) -> StepSize {
        StepSize(v)
    }

    #[test]
    fn step_size_is_interval_over_max_move() {
        let s = StepSize::new(Duration::from_millis(5), Duration::from_millis(500)).unwrap();
        assert!((s.get() - 0.01).abs() < 1e-12);
    }

    #[test]
    fn zero_max_move_disables_smoothing() {
        let s = StepSize::new(Duration::from_millis(5), Duration::ZERO).unwrap();
        assert!(s.is_unbounded());
        assert_eq!(next_position(Some(0.0), 1.0, s), 1.0);
    }

    #[test]
    fn zero_interval_is_rejected() {
        assert!(StepSize::new(Duration::ZERO, Duration::from_millis(500)).is_err());
    }

    #[test]
    fn interval_longer_than_max_move_jumps() {
        let s = StepSize::new(Duration::from_millis(800), Duration::from_millis(500)).unwrap();
        assert_eq!(next_position(Some(0.0), 1.0, s), 1.0);
    }

    #[test]
    fn unknown_position_places_directly() {
        assert_eq!(next_position(None, 0.7, step(0.01)), 0.7);
    }

    #[test]
    fn steps_toward_target_in_both_directions() {
        assert!((next_position(Some(0.5), 1.0, step(0.1)) - 0.6).abs() < 1e-12);
        assert!((next_position(Some(0.5), 0.0, step(0.1)) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn snaps_when_closer_than_one_step() {
        assert_eq!(next_position(Some(0.0), 0.005, step(0.01)), 0.005);
        assert_eq!(next_position(Some(0.5), 0.495, step(0.01)), 0.495);
    }

    #[test]
    fn idle_until_target_then_terminal_after_close() {
        let (producer, listener) = target_channel();
        let (tx, rx) = xch::bounded(0);
        let ctl = PositionController::new(listener, tx, step(0.5));
        assert_eq!(ctl.evaluate(false), ControllerState::Idle);
        assert_eq!(ctl.evaluate(true), ControllerState::Terminal);
        producer.submit(1.0).unwrap();
        assert_eq!(ctl.evaluate(true), ControllerState::Moving { target: 1.0 });
        drop(rx);
    }

    #[test]
    fn reports_writer_gone() {
        let (producer, listener) = target_channel();
        let (tx, rx) = xch::bounded(0);
        drop(rx);
        producer.submit(0.3).unwrap();
        producer.close();
        let err = PositionController::new(listener, tx, step(0.1))
            .run()
            .expect_err("writer is gone");
        assert_eq!(err, ServoError::WriterStopped);
    }
}
