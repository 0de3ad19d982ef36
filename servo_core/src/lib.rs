#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Core servo positioning logic (hardware-agnostic).
//!
//! All hardware interaction goes through `servo_traits::PwmOutput`.
//!
//! ## Architecture
//!
//! - **Input**: textual lines are parsed and rescaled to `[0, 1]` (`input`)
//! - **Target register**: latest target plus a coalescing wake-up (`target`)
//! - **Controller**: steps the position toward the target at a bounded rate (`controller`)
//! - **Writer**: maps positions to pulse widths and writes them (`writer`, `pulse`)
//! - **Output**: shared handle that halts the device exactly once (`output`)
//! - **Runner**: wires the above together for one run (`runner`)
//!
//! The controller and writer run on their own threads joined by a
//! zero-capacity channel, so the writer's per-write sleep paces the whole
//! pipeline.

pub mod config;
pub mod controller;
pub mod conversions;
pub mod error;
pub mod hw_error;
pub mod input;
pub mod mocks;
pub mod output;
pub mod pulse;
pub mod runner;
pub mod target;
pub mod util;
pub mod writer;

pub use config::{InputCfg, MotionCfg, PulseCfg};
pub use controller::{
    ControllerReport, ControllerState, PositionController, StepSize, next_position,
};
pub use error::{BuildError, InputError, Report, Result, ServoError};
pub use input::InputRange;
pub use output::OutputHandle;
pub use pulse::PulseMap;
pub use runner::{Pipeline, RunParams, RunSummary, run};
pub use target::{TargetListener, TargetProducer, TargetRegister, target_channel};
pub use writer::{ActuatorWriter, WriterReport};
