//! SIGINT/SIGTERM handling: release the output, then exit.

use crate::error_fmt::EXIT_INTERRUPTED;
use servo_core::OutputHandle;
use servo_traits::PwmOutput;

/// Install a handler that halts `output` and exits with status 130.
///
/// Only one handler can exist per process; a second install is logged and
/// ignored, the normal shutdown path still releases the output.
pub fn install_release_on_interrupt<P>(output: OutputHandle<P>)
where
    P: PwmOutput + Send + 'static,
{
    let res = ctrlc::set_handler(move || {
        tracing::warn!("interrupted; releasing PWM output");
        match output.release() {
            Ok(true) => tracing::info!("PWM output released"),
            Ok(false) => {}
            Err(e) => tracing::error!(error = %e, "failed to release PWM output"),
        }
        crate::logging::flush();
        std::process::exit(EXIT_INTERRUPTED);
    });
    if let Err(e) = res {
        tracing::warn!(error = %e, "could not install signal handler");
    }
}
