//! Latest-target register plus the coalescing wake-up channel.
//!
//! The producer overwrites the register and nudges the controller through a
//! capacity-1 channel with `try_send`; a full channel already guarantees the
//! controller will look at the register again, so the nudge is dropped.
//! Dropping the producer closes the channel, which the controller reads as
//! "no more targets will arrive".
use crossbeam_channel as xch;
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::ServoError;

/// Most recently requested normalized target. Last write wins.
#[derive(Debug, Default)]
pub struct TargetRegister {
    target: Mutex<Option<f64>>,
}

impl TargetRegister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the stored target.
    pub fn set(&self, value: f64) {
        // A poisoned lock still holds a whole Option<f64>; nothing can be torn.
        *self.target.lock().unwrap_or_else(PoisonError::into_inner) = Some(value);
    }

    /// Current target, `None` if none was ever set.
    pub fn get(&self) -> Option<f64> {
        *self.target.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Producer side: owned by the input reader.
#[derive(Debug)]
pub struct TargetProducer {
    register: Arc<TargetRegister>,
    wake: xch::Sender<()>,
}

/// Consumer side: owned by the position controller.
#[derive(Debug)]
pub struct TargetListener {
    register: Arc<TargetRegister>,
    wake: xch::Receiver<()>,
}

/// Create a connected producer/listener pair sharing one register.
pub fn target_channel() -> (TargetProducer, TargetListener) {
    let register = Arc::new(TargetRegister::new());
    let (tx, rx) = xch::bounded(1);
    (
        TargetProducer {
            register: register.clone(),
            wake: tx,
        },
        TargetListener { register, wake: rx },
    )
}

impl TargetProducer {
    /// Store `value` and wake the controller if it is idle.
    ///
    /// Never blocks. Fails only when the listener is gone, i.e. the
    /// controller has stopped and nothing will act on further targets.
    pub fn submit(&self, value: f64) -> Result<(), ServoError> {
        self.register.set(value);
        match self.wake.try_send(()) {
            Ok(()) | Err(xch::TrySendError::Full(())) => Ok(()),
            Err(xch::TrySendError::Disconnected(())) => Err(ServoError::State(
                "position controller is no longer running".into(),
            )),
        }
    }

    /// Signal that no further targets will arrive.
    pub fn close(self) {
        drop(self);
    }
}

impl TargetListener {
    /// Latest target, if any.
    #[inline]
    pub fn current(&self) -> Option<f64> {
        self.register.get()
    }

    /// Block until a new target is announced. Returns `false` once the
    /// producer has closed and all pending notifications are consumed.
    pub fn wait(&self) -> bool {
        self.wake.recv().is_ok()
    }
}
