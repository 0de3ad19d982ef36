//! Hardware PWM output backed by the Linux sysfs PWM driver (via rppal).

use rppal::pwm::{Channel, Polarity, Pwm};
use servo_traits::{Duty, PwmOutput};
use tracing::{debug, trace};

use crate::error::{HwError, Result};

/// Output frequency used when the channel is first opened; the writer passes
/// the frequency explicitly on every write.
const OPEN_FREQUENCY_HZ: f64 = 50.0;

pub struct HardwarePwm {
    pwm: Pwm,
    num: u8,
    enabled: bool,
}

impl HardwarePwm {
    /// Open PWM output `num` (1 → PWM0, 2 → PWM1), initially disabled.
    pub fn open(num: u8) -> Result<Self> {
        let channel = channel_for(num)?;
        let name = crate::output_name(num)?;
        let pwm = Pwm::with_frequency(channel, OPEN_FREQUENCY_HZ, 0.0, Polarity::Normal, false)
            .map_err(|e| HwError::Pwm(format!("open {name}: {e}")))?;
        debug!(num, output = %name, "pwm output opened");
        Ok(Self {
            pwm,
            num,
            enabled: false,
        })
    }
}

fn channel_for(num: u8) -> Result<Channel> {
    match num {
        1 => Ok(Channel::Pwm0),
        2 => Ok(Channel::Pwm1),
        other => Err(HwError::UnknownOutput(other)),
    }
}

impl PwmOutput for HardwarePwm {
    fn write_duty(
        &mut self,
        duty: Duty,
        frequency_hz: f64,
    ) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.pwm
            .set_frequency(frequency_hz, duty.fraction())
            .map_err(|e| HwError::Pwm(e.to_string()))?;
        if !self.enabled {
            self.pwm.enable().map_err(|e| HwError::Pwm(e.to_string()))?;
            self.enabled = true;
        }
        trace!(num = self.num, %duty, "pwm write");
        Ok(())
    }

    fn halt(&mut self) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.pwm
            .disable()
            .map_err(|e| HwError::Pwm(e.to_string()))?;
        self.enabled = false;
        debug!(num = self.num, "pwm output halted");
        Ok(())
    }
}
