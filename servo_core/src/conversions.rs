//! `From` implementations bridging `servo_config` types to `servo_core` types.

use crate::config::{InputCfg, MotionCfg, PulseCfg};
use std::time::Duration;

// ── MotionCfg ────────────────────────────────────────────────────────────────

impl From<&servo_config::Motion> for MotionCfg {
    fn from(c: &servo_config::Motion) -> Self {
        Self {
            move_interval: Duration::from_millis(c.move_interval_ms),
            max_move: Duration::from_millis(c.max_move_ms),
            settle: Duration::from_millis(c.settle_ms),
        }
    }
}

// ── PulseCfg ─────────────────────────────────────────────────────────────────

impl From<&servo_config::Pulse> for PulseCfg {
    fn from(c: &servo_config::Pulse) -> Self {
        Self {
            min_pulse: Duration::from_micros(c.min_us),
            max_pulse: Duration::from_micros(c.max_us),
        }
    }
}

// ── InputCfg ─────────────────────────────────────────────────────────────────

impl From<&servo_config::Input> for InputCfg {
    fn from(c: &servo_config::Input) -> Self {
        Self {
            min: c.min,
            max: c.max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_file_config_matches_core_defaults() {
        let file = servo_config::Config::default();
        assert_eq!(MotionCfg::from(&file.motion), MotionCfg::default());
        assert_eq!(PulseCfg::from(&file.pulse), PulseCfg::default());
        assert_eq!(InputCfg::from(&file.input), InputCfg::default());
    }
}
