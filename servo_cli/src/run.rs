//! Command execution: config merging, output selection, and the `set` run.

use crate::cli::SetArgs;
use crate::signals::install_release_on_interrupt;
use servo_config::Config;
use servo_core::error::{Result as CoreResult, ServoError};
use servo_core::runner::{RunParams, RunSummary};
use servo_core::{OutputHandle, hw_error::map_hw_error};
use servo_hardware::SimulatedPwm;
use servo_traits::{MonotonicClock, PwmOutput};
use std::path::Path;

/// Test hook: make the simulated output fail after this many writes.
#[cfg(not(feature = "hardware"))]
pub const SIM_FAIL_AFTER_ENV: &str = "SERVO_TEST_SIM_FAIL_AFTER";

/// Load the config file, or the defaults when no file was given.
pub fn load_config(path: Option<&Path>) -> CoreResult<Config> {
    match path {
        Some(p) => servo_config::load_file(p)
            .map_err(|e| ServoError::Config(format!("{e:#}")).into()),
        None => Ok(Config::default()),
    }
}

/// Apply command-line overrides on top of the file values.
pub fn apply_overrides(cfg: &mut Config, args: &SetArgs) {
    if let Some(n) = args.num {
        cfg.output.num = n;
    }
    if let Some(ms) = args.move_interval_ms {
        cfg.motion.move_interval_ms = ms;
    }
    if let Some(ms) = args.max_move_ms {
        cfg.motion.max_move_ms = ms;
    }
    if let Some(ms) = args.settle_ms {
        cfg.motion.settle_ms = ms;
    }
    if let Some(v) = args.min_input {
        cfg.input.min = v;
    }
    if let Some(v) = args.max_input {
        cfg.input.max = v;
    }
    if let Some(us) = args.min_pulse_us {
        cfg.pulse.min_us = us;
    }
    if let Some(us) = args.max_pulse_us {
        cfg.pulse.max_us = us;
    }
    if args.dry_run {
        cfg.output.dry_run = true;
    }
}

pub fn validate(cfg: &Config) -> CoreResult<()> {
    cfg.validate()
        .map_err(|e| ServoError::Config(e.to_string()).into())
}

fn run_params(cfg: &Config) -> RunParams {
    RunParams {
        motion: (&cfg.motion).into(),
        pulse: (&cfg.pulse).into(),
        input: (&cfg.input).into(),
        dry_run: cfg.output.dry_run,
    }
}

#[cfg(not(feature = "hardware"))]
fn simulator() -> CoreResult<SimulatedPwm> {
    let sim = SimulatedPwm::new();
    match std::env::var(SIM_FAIL_AFTER_ENV) {
        Ok(v) => {
            let n: usize = v.trim().parse().map_err(|_| {
                ServoError::Config(format!("{SIM_FAIL_AFTER_ENV}={v:?} is not a count"))
            })?;
            Ok(sim.with_fail_after(n))
        }
        Err(_) => Ok(sim),
    }
}

#[cfg(feature = "hardware")]
fn open_hardware(num: u8) -> CoreResult<servo_hardware::HardwarePwm> {
    servo_hardware::HardwarePwm::open(num).map_err(|e| map_hw_error(&e).into())
}

/// Resolve the output device name for logs; rejects unknown outputs.
fn output_name(num: u8) -> CoreResult<String> {
    servo_hardware::output_name(num).map_err(|e| map_hw_error(&e).into())
}

/// `servo set`: drive the selected output from stdin until EOF.
pub fn run_set(cfg: &Config) -> CoreResult<RunSummary> {
    let name = output_name(cfg.output.num)?;
    let params = run_params(cfg);
    if cfg.output.dry_run {
        tracing::info!(output = %name, "dry run; PWM device is not touched");
        return drive(SimulatedPwm::new(), params);
    }

    #[cfg(feature = "hardware")]
    {
        let pwm = open_hardware(cfg.output.num)?;
        tracing::info!(output = %name, "driving PWM output");
        drive(pwm, params)
    }
    #[cfg(not(feature = "hardware"))]
    {
        tracing::info!(output = %name, "hardware feature disabled; using simulated PWM output");
        drive(simulator()?, params)
    }
}

fn drive<P: PwmOutput + Send + 'static>(pwm: P, params: RunParams) -> CoreResult<RunSummary> {
    let output = OutputHandle::new(pwm);
    install_release_on_interrupt(output.clone());
    let stdin = std::io::stdin().lock();
    servo_core::runner::run(output, params, stdin, MonotonicClock::new())
}

/// `servo self-check`: open the selected output, release it again.
pub fn self_check(cfg: &Config) -> CoreResult<()> {
    let name = output_name(cfg.output.num)?;

    #[cfg(feature = "hardware")]
    let output = OutputHandle::new(open_hardware(cfg.output.num)?);
    #[cfg(not(feature = "hardware"))]
    let output = OutputHandle::new(simulator()?);

    output.release()?;
    tracing::info!(output = %name, "self-check passed");
    Ok(())
}
