//! Test and helper mocks for servo_core

use servo_traits::{Duty, PwmOutput};
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// An output that timestamps every write, for checking pacing from the
/// outside. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingOutput {
    log: Arc<Mutex<Vec<(Instant, Duty)>>>,
    halts: Arc<Mutex<usize>>,
    faulty: bool,
}

impl RecordingOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// An output whose writes and halts are logged and then fail.
    pub fn faulty() -> Self {
        Self {
            faulty: true,
            ..Self::default()
        }
    }

    /// Recorded writes in order.
    pub fn writes(&self) -> Vec<(Instant, Duty)> {
        self.log.lock().map(|l| l.clone()).unwrap_or_default()
    }

    pub fn halts(&self) -> usize {
        self.halts.lock().map(|h| *h).unwrap_or(0)
    }
}

impl PwmOutput for RecordingOutput {
    fn write_duty(
        &mut self,
        duty: Duty,
        _frequency_hz: f64,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.log
            .lock()
            .map_err(|_| std::io::Error::other("recording log poisoned"))?
            .push((Instant::now(), duty));
        if self.faulty {
            return Err(std::io::Error::other("write refused").into());
        }
        Ok(())
    }

    fn halt(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        *self
            .halts
            .lock()
            .map_err(|_| std::io::Error::other("recording log poisoned"))? += 1;
        if self.faulty {
            return Err(std::io::Error::other("halt refused").into());
        }
        Ok(())
    }
}
