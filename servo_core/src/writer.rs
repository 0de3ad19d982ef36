//! Actuator writer: turns positions into PWM writes at a bounded rate.
use crossbeam_channel as xch;
use servo_traits::{Clock, Duty, PwmOutput};
use std::time::Duration;
use tracing::{trace, warn};

use crate::error::ServoError;
use crate::output::OutputHandle;
use crate::pulse::PulseMap;
use crate::util::PWM_FREQUENCY_HZ;

/// Outcome of a finished writer loop.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WriterReport {
    /// Positions written (or printed, in dry-run mode).
    pub writes: u64,
    /// Duty of the last write.
    pub last_duty: Option<Duty>,
}

pub struct ActuatorWriter<P, C> {
    output: OutputHandle<P>,
    pulse: PulseMap,
    interval: Duration,
    dry_run: bool,
    clock: C,
}

impl<P: PwmOutput, C: Clock> ActuatorWriter<P, C> {
    pub fn new(output: OutputHandle<P>, pulse: PulseMap, interval: Duration, clock: C) -> Self {
        Self {
            output,
            pulse,
            interval,
            dry_run: false,
            clock,
        }
    }

    /// Print would-be writes to stdout instead of touching the output.
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Consume positions until the controller closes the channel.
    ///
    /// Each write is followed by a sleep of one move interval, during which
    /// the controller's next `send` stays blocked. The first failed write
    /// ends the loop; dropping the receiver then unblocks the controller.
    pub fn run(self, moves: xch::Receiver<f64>) -> Result<WriterReport, ServoError> {
        let mut report = WriterReport::default();
        for value in moves.iter() {
            let duty = self.write_one(value).inspect_err(|e| {
                warn!(error = %e, position = value, "pwm write failed; writer stopping");
            })?;
            report.writes += 1;
            report.last_duty = Some(duty);
            self.clock.sleep(self.interval);
        }
        trace!(writes = report.writes, "actuator writer drained");
        Ok(report)
    }

    fn write_one(&self, value: f64) -> Result<Duty, ServoError> {
        let duty = self.pulse.duty_for(value);
        if self.dry_run {
            println!("dry-run: would write {duty} to PWM device");
        } else {
            self.output.write(duty, f64::from(PWM_FREQUENCY_HZ))?;
        }
        trace!(position = value, %duty, "wrote position");
        Ok(duty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PulseCfg;
    use servo_hardware::SimulatedPwm;
    use servo_traits::clock::test_clock::TestClock;
    use std::thread;

    fn writer(sim: SimulatedPwm, clock: TestClock) -> ActuatorWriter<SimulatedPwm, TestClock> {
        let pulse = PulseMap::new(&PulseCfg::default()).unwrap();
        ActuatorWriter::new(
            OutputHandle::new(sim),
            pulse,
            Duration::from_millis(5),
            clock,
        )
    }

    #[test]
    fn writes_in_order_and_sleeps_after_each() {
        let sim = SimulatedPwm::new();
        let probe = sim.probe();
        let clock = TestClock::new();
        let (tx, rx) = xch::bounded(0);
        let w = writer(sim, clock.clone());
        let h = thread::spawn(move || w.run(rx));
        for v in [0.0, 0.5, 1.0] {
            tx.send(v).unwrap();
        }
        drop(tx);
        let report = h.join().unwrap().unwrap();

        assert_eq!(report.writes, 3);
        let fractions: Vec<f64> = probe.writes().iter().map(|(d, _)| d.fraction()).collect();
        assert_eq!(fractions.len(), 3);
        assert!((fractions[0] - 0.05).abs() < 1e-6);
        assert!((fractions[1] - 0.075).abs() < 1e-6);
        assert!((fractions[2] - 0.10).abs() < 1e-6);
        assert!(probe.writes().iter().all(|(_, hz)| (*hz - 50.0).abs() < f64::EPSILON));
        assert_eq!(clock.sleeps(), vec![Duration::from_millis(5); 3]);
    }

    #[test]
    fn dry_run_never_touches_the_output() {
        let sim = SimulatedPwm::new();
        let probe = sim.probe();
        let (tx, rx) = xch::bounded(1);
        tx.send(1.0).unwrap();
        drop(tx);
        let report = writer(sim, TestClock::new()).dry_run(true).run(rx).unwrap();
        assert_eq!(report.writes, 1);
        assert!((report.last_duty.unwrap().fraction() - 0.10).abs() < 1e-6);
        assert!(probe.writes().is_empty());
    }

    #[test]
    fn stops_on_first_failed_write() {
        let sim = SimulatedPwm::new().with_fail_after(2);
        let probe = sim.probe();
        let clock = TestClock::new();
        let (tx, rx) = xch::bounded(8);
        for v in [0.1, 0.2, 0.3, 0.4] {
            tx.send(v).unwrap();
        }
        drop(tx);
        let err = writer(sim, clock.clone()).run(rx).expect_err("third write fails");
        assert!(matches!(
            err,
            ServoError::HardwareFault(_) | ServoError::Hardware(_)
        ));
        assert_eq!(probe.writes().len(), 2);
        assert_eq!(clock.sleeps().len(), 2);
    }
}
