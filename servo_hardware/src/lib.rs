pub mod error;
#[cfg(feature = "hardware")]
pub mod pwm;

#[cfg(feature = "hardware")]
pub use pwm::HardwarePwm;

use error::{HwError, Result};
use servo_traits::{Duty, PwmOutput};
use std::sync::{Arc, Mutex};

/// Range of selectable PWM outputs.
pub const OUTPUTS: std::ops::RangeInclusive<u8> = 1..=2;

/// Device name of a selectable output, e.g. `PWM0_OUT` for output 1.
pub fn output_name(num: u8) -> Result<String> {
    if !OUTPUTS.contains(&num) {
        return Err(HwError::UnknownOutput(num));
    }
    Ok(format!("PWM{}_OUT", num - 1))
}

#[derive(Debug, Default)]
struct SimState {
    writes: Vec<(Duty, f64)>,
    halts: usize,
    enabled: bool,
}

/// Simulated PWM output.
///
/// Records every write and halt; a [`SimProbe`] taken before the output is
/// handed off can inspect them afterwards.
#[derive(Debug, Default)]
pub struct SimulatedPwm {
    state: Arc<Mutex<SimState>>,
    fail_after: Option<usize>,
}

impl SimulatedPwm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every write after `n` successful ones.
    pub fn with_fail_after(mut self, n: usize) -> Self {
        self.fail_after = Some(n);
        self
    }

    pub fn probe(&self) -> SimProbe {
        SimProbe {
            state: self.state.clone(),
        }
    }
}

impl PwmOutput for SimulatedPwm {
    fn write_duty(
        &mut self,
        duty: Duty,
        frequency_hz: f64,
    ) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut st = self
            .state
            .lock()
            .map_err(|_| HwError::Pwm("simulator state poisoned".into()))?;
        if let Some(n) = self.fail_after
            && st.writes.len() >= n
        {
            return Err(HwError::SimulatedFailure(n).into());
        }
        st.writes.push((duty, frequency_hz));
        st.enabled = true;
        tracing::debug!(%duty, frequency_hz, "pwm write (simulated)");
        Ok(())
    }

    fn halt(&mut self) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut st = self
            .state
            .lock()
            .map_err(|_| HwError::Pwm("simulator state poisoned".into()))?;
        st.halts += 1;
        st.enabled = false;
        tracing::debug!(halts = st.halts, "pwm halted (simulated)");
        Ok(())
    }
}

/// Read-only view into a [`SimulatedPwm`]'s recorded activity.
#[derive(Debug, Clone)]
pub struct SimProbe {
    state: Arc<Mutex<SimState>>,
}

impl SimProbe {
    pub fn writes(&self) -> Vec<(Duty, f64)> {
        self.state
            .lock()
            .map(|s| s.writes.clone())
            .unwrap_or_default()
    }

    pub fn halts(&self) -> usize {
        self.state.lock().map(|s| s.halts).unwrap_or(0)
    }

    pub fn is_enabled(&self) -> bool {
        self.state.lock().map(|s| s.enabled).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulated_pwm_records_writes_and_halts() {
        let mut pwm = SimulatedPwm::new();
        let probe = pwm.probe();
        pwm.write_duty(Duty::from_fraction(0.05), 50.0).unwrap();
        pwm.write_duty(Duty::from_fraction(0.10), 50.0).unwrap();
        assert!(probe.is_enabled());
        pwm.halt().unwrap();
        pwm.halt().unwrap();
        assert_eq!(probe.writes().len(), 2);
        assert_eq!(probe.halts(), 2);
        assert!(!probe.is_enabled());
    }

    #[test]
    fn test_simulated_failure_after_n_writes() {
        let mut pwm = SimulatedPwm::new().with_fail_after(1);
        pwm.write_duty(Duty::from_fraction(0.05), 50.0).unwrap();
        let err = pwm
            .write_duty(Duty::from_fraction(0.06), 50.0)
            .expect_err("second write should fail");
        assert!(err.to_string().contains("simulated write failure"));
    }
}
