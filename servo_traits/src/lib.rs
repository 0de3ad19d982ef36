pub mod clock;
pub mod duty;

pub use clock::{Clock, MonotonicClock};
pub use duty::Duty;

/// A single PWM output line driving the actuator.
///
/// `write_duty` reconfigures (and enables, if needed) the output; `halt`
/// disables it and must be safe to call more than once.
pub trait PwmOutput {
    fn write_duty(
        &mut self,
        duty: Duty,
        frequency_hz: f64,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    fn halt(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
