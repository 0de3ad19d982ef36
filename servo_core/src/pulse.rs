//! Normalized position → pulse width → device duty cycle.

use crate::config::PulseCfg;
use crate::error::BuildError;
use crate::util::pwm_period;
use servo_traits::Duty;
use std::time::Duration;

/// Linear map from a duty fraction in `[0, 1]` to a pulse inside the
/// configured bounds, expressed against the fixed output period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseMap {
    min_ns: f64,
    span_ns: f64,
    period_ns: f64,
}

impl PulseMap {
    pub fn new(cfg: &PulseCfg) -> Result<Self, BuildError> {
        let period = pwm_period();
        if cfg.min_pulse >= cfg.max_pulse {
            return Err(BuildError::InvalidConfig(
                "min pulse must be shorter than max pulse",
            ));
        }
        if cfg.max_pulse > period {
            return Err(BuildError::InvalidConfig(
                "max pulse must fit inside the output period",
            ));
        }
        Ok(Self {
            min_ns: cfg.min_pulse.as_nanos() as f64,
            span_ns: (cfg.max_pulse - cfg.min_pulse).as_nanos() as f64,
            period_ns: period.as_nanos() as f64,
        })
    }

    /// Pulse width for a normalized position.
    pub fn pulse_for(&self, value: f64) -> Duration {
        Duration::from_nanos(self.pulse_ns(value).round().max(0.0) as u64)
    }

    /// Device duty for a normalized position.
    pub fn duty_for(&self, value: f64) -> Duty {
        Duty::from_fraction(self.pulse_ns(value) / self.period_ns)
    }

    #[inline]
    fn pulse_ns(&self, value: f64) -> f64 {
        self.min_ns + value * self.span_ns
    }
}
