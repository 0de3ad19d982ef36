//! Wires input, controller, writer and output together for one run.
use crossbeam_channel as xch;
use servo_traits::{Clock, Duty, PwmOutput};
use std::io::BufRead;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::{InputCfg, MotionCfg, PulseCfg};
use crate::controller::{ControllerReport, PositionController, StepSize};
use crate::error::{Result as CoreResult, ServoError};
use crate::input::InputRange;
use crate::output::OutputHandle;
use crate::pulse::PulseMap;
use crate::target::{TargetListener, TargetProducer, target_channel};
use crate::writer::{ActuatorWriter, WriterReport};

/// Everything a run needs besides the output, the input and the clock.
#[derive(Debug, Clone, Default)]
pub struct RunParams {
    pub motion: MotionCfg,
    pub pulse: PulseCfg,
    pub input: InputCfg,
    pub dry_run: bool,
}

/// What happened during a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// Input lines accepted as targets.
    pub accepted: u64,
    /// Input lines rejected (unparsable or out of range).
    pub rejected: u64,
    /// Positions emitted by the controller.
    pub ticks: u64,
    /// Positions written by the writer.
    pub writes: u64,
    pub final_position: Option<f64>,
    pub last_duty: Option<Duty>,
}

/// Controller and writer threads plus the producer handle that feeds them.
///
/// Targets go in through [`Pipeline::submit`]; [`Pipeline::finish`] closes
/// the input, waits for the actuator to reach the last target and joins
/// both threads. The output is not released here.
pub struct Pipeline {
    producer: TargetProducer,
    controller: JoinHandle<Result<ControllerReport, ServoError>>,
    writer: JoinHandle<Result<WriterReport, ServoError>>,
}

impl Pipeline {
    pub fn spawn<P, C>(
        output: OutputHandle<P>,
        step: StepSize,
        pulse: PulseMap,
        move_interval: Duration,
        dry_run: bool,
        clock: C,
    ) -> Result<Self, ServoError>
    where
        P: PwmOutput + Send + 'static,
        C: Clock + Send + 'static,
    {
        let writer = ActuatorWriter::new(output, pulse, move_interval, clock).dry_run(dry_run);
        Self::spawn_with(
            move |listener, moves| PositionController::new(listener, moves, step),
            writer,
        )
    }

    /// Like [`Pipeline::spawn`] but with a controller that already knows
    /// where the actuator is.
    pub fn spawn_from<P, C>(
        output: OutputHandle<P>,
        step: StepSize,
        pulse: PulseMap,
        move_interval: Duration,
        dry_run: bool,
        clock: C,
        position: f64,
    ) -> Result<Self, ServoError>
    where
        P: PwmOutput + Send + 'static,
        C: Clock + Send + 'static,
    {
        let writer = ActuatorWriter::new(output, pulse, move_interval, clock).dry_run(dry_run);
        Self::spawn_with(
            move |listener, moves| {
                PositionController::new(listener, moves, step).with_position(position)
            },
            writer,
        )
    }

    fn spawn_with<P, C, F>(
        make_controller: F,
        writer: ActuatorWriter<P, C>,
    ) -> Result<Self, ServoError>
    where
        P: PwmOutput + Send + 'static,
        C: Clock + Send + 'static,
        F: FnOnce(TargetListener, xch::Sender<f64>) -> PositionController,
    {
        let (producer, listener) = target_channel();
        let (move_tx, move_rx) = xch::bounded::<f64>(0);

        let writer = thread::Builder::new()
            .name("servo-writer".into())
            .spawn(move || writer.run(move_rx))
            .map_err(|e| ServoError::Io(format!("spawn writer thread: {e}")))?;

        let controller = make_controller(listener, move_tx);
        let controller = thread::Builder::new()
            .name("servo-controller".into())
            .spawn(move || controller.run())
            .map_err(|e| ServoError::Io(format!("spawn controller thread: {e}")))?;

        Ok(Self {
            producer,
            controller,
            writer,
        })
    }

    /// Hand a normalized target to the controller. Never blocks.
    pub fn submit(&self, target: f64) -> Result<(), ServoError> {
        self.producer.submit(target)
    }

    /// Close the input and wait for both threads.
    ///
    /// A writer failure takes precedence over the controller's
    /// `WriterStopped`, since it carries the actual hardware error.
    pub fn finish(self) -> Result<(ControllerReport, WriterReport), ServoError> {
        self.producer.close();
        let controller = self
            .controller
            .join()
            .map_err(|_| ServoError::State("controller thread panicked".into()))?;
        let writer = self
            .writer
            .join()
            .map_err(|_| ServoError::State("writer thread panicked".into()))?;
        match (controller, writer) {
            (_, Err(e)) | (Err(e), Ok(_)) => Err(e),
            (Ok(c), Ok(w)) => Ok((c, w)),
        }
    }
}

/// Drive the output from line-oriented input until end of input.
///
/// Configuration problems surface as `BuildError` before any thread is
/// spawned. On every other path the output is released before returning;
/// the handle makes that a no-op if a signal handler got there first.
pub fn run<P, C, R>(
    output: OutputHandle<P>,
    params: RunParams,
    input: R,
    clock: C,
) -> CoreResult<RunSummary>
where
    P: PwmOutput + Send + 'static,
    C: Clock + Clone + Send + 'static,
    R: BufRead,
{
    let step = StepSize::new(params.motion.move_interval, params.motion.max_move)?;
    let pulse = PulseMap::new(&params.pulse)?;
    let range = InputRange::new(&params.input)?;

    let pipeline = match Pipeline::spawn(
        output.clone(),
        step,
        pulse,
        params.motion.move_interval,
        params.dry_run,
        clock.clone(),
    ) {
        Ok(p) => p,
        Err(e) => {
            if let Err(re) = output.release() {
                warn!(error = %re, "release after failed start also failed");
            }
            return Err(e.into());
        }
    };
    info!(
        step = step.get(),
        move_interval_ms = params.motion.move_interval.as_millis() as u64,
        dry_run = params.dry_run,
        "servo pipeline started"
    );

    let mut summary = RunSummary::default();
    let mut read_error = None;
    for line in input.split(b'\n') {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                warn!(error = %e, "input read failed; treating as end of input");
                read_error = Some(e);
                break;
            }
        };
        match range.parse_bytes(&line) {
            Ok(target) => {
                summary.accepted += 1;
                debug!(input = %String::from_utf8_lossy(&line).trim(), target, "target accepted");
                if let Err(e) = pipeline.submit(target) {
                    warn!(error = %e, "pipeline stopped; no longer reading input");
                    break;
                }
            }
            Err(e) => {
                summary.rejected += 1;
                warn!(error = %e, "input rejected");
            }
        }
    }

    let outcome = pipeline.finish();
    if outcome.is_ok() {
        clock.sleep(params.motion.settle);
    }
    let released = output.release();

    let (controller, writer) = match outcome {
        Ok(reports) => reports,
        Err(e) => {
            if let Err(re) = released {
                warn!(error = %re, "release after failed run also failed");
            }
            return Err(e.into());
        }
    };
    released?;
    summary.ticks = controller.ticks;
    summary.final_position = controller.final_position;
    summary.writes = writer.writes;
    summary.last_duty = writer.last_duty;

    if let Some(e) = read_error {
        return Err(ServoError::Io(e.to_string()).into());
    }

    info!(
        accepted = summary.accepted,
        rejected = summary.rejected,
        writes = summary.writes,
        final_position = ?summary.final_position,
        "servo run complete"
    );
    Ok(summary)
}
