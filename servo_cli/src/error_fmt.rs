//! Human-readable error descriptions and structured JSON error formatting.

use servo_core::error::{BuildError, ServoError};

/// Exit status for configuration problems (file, flags, derived parameters).
pub const EXIT_CONFIG: i32 = 2;
/// Exit status for hardware discovery or write failures.
pub const EXIT_HARDWARE: i32 = 3;
/// Exit status after SIGINT/SIGTERM.
pub const EXIT_INTERRUPTED: i32 = 130;

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    if let Some(BuildError::InvalidConfig(msg)) = err.downcast_ref::<BuildError>() {
        return format!(
            "What happened: Invalid configuration ({msg}).\nLikely causes: Out-of-range values in the TOML or on the command line.\nHow to fix: Correct the value, then rerun. `servo set --help` lists every override."
        );
    }

    if let Some(se) = err.downcast_ref::<ServoError>() {
        return match se {
            ServoError::Config(msg) => format!(
                "What happened: Invalid configuration ({msg}).\nLikely causes: Missing file, TOML syntax error, or out-of-range values.\nHow to fix: Edit the config file or the command-line overrides, then rerun."
            ),
            ServoError::Hardware(msg) | ServoError::HardwareFault(msg) => format!(
                "What happened: The PWM output failed ({msg}).\nLikely causes: PWM overlay not enabled, wrong output number, or missing permission on /sys/class/pwm.\nHow to fix: Enable dtoverlay=pwm-2chan in config.txt, check --num, and run as a user with PWM access."
            ),
            ServoError::Io(msg) => format!(
                "What happened: Reading input failed ({msg}).\nLikely causes: The process feeding stdin exited or closed the pipe abnormally.\nHow to fix: Check the producer of the input stream. The servo was moved to the last accepted target and released."
            ),
            other => format!(
                "What happened: {other}.\nLikely causes: See logs.\nHow to fix: Re-run with --log-level=debug or set RUST_LOG for more detail."
            ),
        };
    }

    // Generic fallback
    let msg = err.to_string();
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Stable name for the error class, used as `reason` in JSON output.
pub fn reason_name(err: &eyre::Report) -> &'static str {
    if err.downcast_ref::<BuildError>().is_some() {
        return "Config";
    }
    match err.downcast_ref::<ServoError>() {
        Some(ServoError::Config(_)) => "Config",
        Some(ServoError::Hardware(_) | ServoError::HardwareFault(_)) => "Hardware",
        Some(ServoError::Io(_)) => "Io",
        _ => "Error",
    }
}

/// Map the error class to a process exit status.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    match reason_name(err) {
        "Config" => EXIT_CONFIG,
        "Hardware" => EXIT_HARDWARE,
        _ => 1,
    }
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    serde_json::json!({
        "reason": reason_name(err),
        "message": humanize(err),
        "exit_code": exit_code_for_error(err),
    })
    .to_string()
}
