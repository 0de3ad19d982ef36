//! Shared, releasable handle to the PWM output.
//!
//! The writer thread writes through one clone while the normal shutdown path
//! and the signal handler each hold another. Whichever calls `release` first
//! halts the device; later calls are no-ops, and writes after release fail.
use servo_traits::{Duty, PwmOutput};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::ServoError;
use crate::hw_error::map_hw_error;

pub struct OutputHandle<P> {
    inner: Arc<Mutex<P>>,
    released: Arc<AtomicBool>,
}

impl<P> Clone for OutputHandle<P> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            released: self.released.clone(),
        }
    }
}

impl<P: PwmOutput> OutputHandle<P> {
    pub fn new(output: P) -> Self {
        Self {
            inner: Arc::new(Mutex::new(output)),
            released: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Write a duty cycle. Fails with `Released` once the output was halted.
    pub fn write(&self, duty: Duty, frequency_hz: f64) -> Result<(), ServoError> {
        if self.is_released() {
            return Err(ServoError::Released);
        }
        let mut out = self
            .inner
            .lock()
            .map_err(|_| ServoError::State("output lock poisoned".into()))?;
        // release() flips the flag before taking the lock
        if self.is_released() {
            return Err(ServoError::Released);
        }
        out.write_duty(duty, frequency_hz)
            .map_err(|e| map_hw_error(e.as_ref()))
    }

    /// Halt the output. Returns `Ok(true)` if this call performed the halt,
    /// `Ok(false)` if the output had already been released.
    pub fn release(&self) -> Result<bool, ServoError> {
        if self.released.swap(true, Ordering::AcqRel) {
            return Ok(false);
        }
        let mut out = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        out.halt().map_err(|e| map_hw_error(e.as_ref()))?;
        tracing::debug!("pwm output released");
        Ok(true)
    }

    #[inline]
    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::Acquire)
    }
}
