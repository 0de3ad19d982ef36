//! Maps `Box<dyn Error>` from trait boundaries to typed `ServoError`.
//!
//! `servo_traits::PwmOutput` uses `Box<dyn Error + Send + Sync>` so any
//! driver can plug in; this module converts those to our typed error enum,
//! with an optional feature-gated path for `servo_hardware::HwError`
//! downcasting.

use crate::error::ServoError;

/// Map a trait-boundary error to a typed `ServoError`.
///
/// Attempts to downcast known hardware error types first, then falls back
/// to a generic hardware error carrying the message.
pub fn map_hw_error(e: &(dyn std::error::Error + 'static)) -> ServoError {
    #[cfg(feature = "hardware-errors")]
    {
        if let Some(hw) = e.downcast_ref::<servo_hardware::error::HwError>() {
            return match hw {
                servo_hardware::error::HwError::UnknownOutput(n) => {
                    ServoError::Config(format!("unknown PWM output {n}"))
                }
                other => ServoError::HardwareFault(other.to_string()),
            };
        }
    }

    ServoError::Hardware(e.to_string())
}
