//! Configuration types for the servo pipeline.
//!
//! These are the runtime configuration structs used by the runner. They are
//! separate from the TOML-deserialized config in `servo_config`; see
//! `conversions` for the mapping.

use std::time::Duration;

/// Timing of the control loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotionCfg {
    /// Tick period; the writer sleeps this long after every write.
    pub move_interval: Duration,
    /// Time to traverse the full range. Zero disables smoothing.
    pub max_move: Duration,
    /// Pause after the last move before the output is released.
    pub settle: Duration,
}

impl Default for MotionCfg {
    fn default() -> Self {
        Self {
            move_interval: Duration::from_millis(5),
            max_move: Duration::from_millis(500),
            settle: Duration::from_secs(1),
        }
    }
}

/// Pulse widths for the two ends of the normalized range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PulseCfg {
    pub min_pulse: Duration,
    pub max_pulse: Duration,
}

impl Default for PulseCfg {
    fn default() -> Self {
        Self {
            min_pulse: Duration::from_millis(1),
            max_pulse: Duration::from_millis(2),
        }
    }
}

/// Accepted range of raw input values.
#[derive(Debug, Clone, PartialEq)]
pub struct InputCfg {
    pub min: f64,
    pub max: f64,
}

impl Default for InputCfg {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}
