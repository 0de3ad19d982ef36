//! CLI argument definitions and shared statics.

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(name = "servo", version, about = "Smoothed hobby-servo driver")]
pub struct Cli {
    /// Path to config TOML; built-in defaults apply when omitted
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log (and report errors) as JSON lines instead of pretty text
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace); overrides logging.level
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

/// Per-run overrides; each one wins over the config file.
#[derive(Args, Debug, Default, Clone)]
pub struct SetArgs {
    /// PWM output to drive (1 or 2)
    #[arg(long, value_name = "N")]
    pub num: Option<u8>,
    /// Time between two writes
    #[arg(long, value_name = "MS")]
    pub move_interval_ms: Option<u64>,
    /// Time to traverse the full range; 0 disables smoothing
    #[arg(long, value_name = "MS")]
    pub max_move_ms: Option<u64>,
    /// Input value mapped to the minimum position
    #[arg(long, value_name = "V", allow_hyphen_values = true)]
    pub min_input: Option<f64>,
    /// Input value mapped to the maximum position
    #[arg(long, value_name = "V", allow_hyphen_values = true)]
    pub max_input: Option<f64>,
    /// Pulse width for the minimum position
    #[arg(long, value_name = "US")]
    pub min_pulse_us: Option<u64>,
    /// Pulse width for the maximum position
    #[arg(long, value_name = "US")]
    pub max_pulse_us: Option<u64>,
    /// Wait after the last move before releasing the output
    #[arg(long, value_name = "MS")]
    pub settle_ms: Option<u64>,
    /// Print would-be writes to stdout instead of driving the output
    #[arg(long, action = ArgAction::SetTrue)]
    pub dry_run: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read targets from stdin (one number per line) and move the servo
    Set(SetArgs),
    /// Validate the configuration and open/release the selected output
    SelfCheck {
        /// PWM output to check (1 or 2)
        #[arg(long, value_name = "N")]
        num: Option<u8>,
    },
}
