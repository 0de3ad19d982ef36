//! Common time/period helpers for servo_core.

use std::time::Duration;

/// Number of microseconds in one second.
pub const MICROS_PER_SEC: u64 = 1_000_000;

/// Output frequency of the PWM line (standard hobby-servo framing).
pub const PWM_FREQUENCY_HZ: u32 = 50;

/// Compute the period in microseconds for a given rate in Hz.
/// - Clamps `hz` to at least 1 to avoid division by zero.
/// - Ensures result is at least 1 microsecond.
#[inline]
pub fn period_us(hz: u32) -> u64 {
    (MICROS_PER_SEC / u64::from(hz.max(1))).max(1)
}

/// Output period as a `Duration` (20 ms at 50 Hz).
#[inline]
pub fn pwm_period() -> Duration {
    Duration::from_micros(period_us(PWM_FREQUENCY_HZ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_of_fifty_hz_is_twenty_ms() {
        assert_eq!(period_us(50), 20_000);
        assert_eq!(pwm_period(), Duration::from_millis(20));
    }

    #[test]
    fn zero_hz_is_clamped() {
        assert_eq!(period_us(0), MICROS_PER_SEC);
    }
}
