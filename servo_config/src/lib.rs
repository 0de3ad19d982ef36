#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schema for the servo driver.
//!
//! - `Config` and sub-structs are deserialized from TOML and validated.
//! - Every section is optional; missing sections take the documented
//!   defaults, so an empty file is a valid configuration.
use eyre::WrapErr;
use serde::Deserialize;
use std::path::Path;

/// PWM output period in microseconds (50 Hz). Pulses longer than this
/// cannot be expressed as a duty cycle.
pub const PERIOD_US: u64 = 20_000;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Output {
    /// PWM output number (1..=2)
    pub num: u8,
    /// Print would-be writes instead of touching the device
    pub dry_run: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self {
            num: 1,
            dry_run: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Motion {
    /// Minimum time between two writes (one control tick)
    pub move_interval_ms: u64,
    /// Time to traverse the full input range. 0 disables smoothing.
    pub max_move_ms: u64,
    /// Wait after the final move before the output is released
    pub settle_ms: u64,
}

impl Default for Motion {
    fn default() -> Self {
        Self {
            move_interval_ms: 5,
            max_move_ms: 500,
            settle_ms: 1000,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Input {
    /// Input value mapped to the minimum position
    pub min: f64,
    /// Input value mapped to the maximum position
    pub max: f64,
}

impl Default for Input {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Pulse {
    /// Pulse width for the minimum position. Below 1000 µs is dangerous for most servos.
    pub min_us: u64,
    /// Pulse width for the maximum position. Above 2000 µs is dangerous for most servos.
    pub max_us: u64,
}

impl Default for Pulse {
    fn default() -> Self {
        Self {
            min_us: 1000,
            max_us: 2000,
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct Config {
    pub output: Output,
    pub motion: Motion,
    pub input: Input,
    pub pulse: Pulse,
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

/// Read and parse a config file (not validated).
pub fn load_file(path: &Path) -> eyre::Result<Config> {
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("read config {}", path.display()))?;
    load_toml(&text).wrap_err_with(|| format!("parse config {}", path.display()))
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Output
        if !(1..=2).contains(&self.output.num) {
            eyre::bail!(
                "output.num must be in the range 1-2, got {}",
                self.output.num
            );
        }

        // Input
        if !self.input.min.is_finite() || !self.input.max.is_finite() {
            eyre::bail!("input.min and input.max must be finite");
        }
        if self.input.min >= self.input.max {
            eyre::bail!(
                "input.min should be less than input.max: {} {}",
                self.input.min,
                self.input.max
            );
        }
        if !(self.input.max - self.input.min).is_finite() {
            eyre::bail!("input.max - input.min must be finite");
        }

        // Pulse
        if self.pulse.min_us >= self.pulse.max_us {
            eyre::bail!(
                "pulse.min_us should be less than pulse.max_us: {} {}",
                self.pulse.min_us,
                self.pulse.max_us
            );
        }
        if self.pulse.max_us > PERIOD_US {
            eyre::bail!("pulse.max_us must not exceed the {PERIOD_US} us output period");
        }

        // Motion
        if self.motion.move_interval_ms == 0 {
            eyre::bail!("motion.move_interval_ms must be >= 1");
        }
        if self.motion.settle_ms > 60 * 1000 {
            eyre::bail!("motion.settle_ms is unreasonably large (>60s)");
        }

        // Logging
        if let Some(rot) = self.logging.rotation.as_deref()
            && !matches!(rot, "never" | "daily" | "hourly")
        {
            eyre::bail!("logging.rotation must be one of never|daily|hourly, got {rot:?}");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let cfg = load_toml("").expect("empty TOML parses");
        assert_eq!(cfg.output.num, 1);
        assert!(!cfg.output.dry_run);
        assert_eq!(cfg.motion.move_interval_ms, 5);
        assert_eq!(cfg.motion.max_move_ms, 500);
        assert_eq!(cfg.motion.settle_ms, 1000);
        assert_eq!(cfg.pulse.min_us, 1000);
        assert_eq!(cfg.pulse.max_us, 2000);
        assert!((cfg.input.max - 1.0).abs() < f64::EPSILON);
        cfg.validate().expect("defaults are valid");
    }

    #[test]
    fn unknown_rotation_is_rejected() {
        let cfg = load_toml("[logging]\nrotation = \"weekly\"\n").expect("parse");
        let err = cfg.validate().expect_err("weekly is not a rotation");
        assert!(err.to_string().contains("logging.rotation"));
    }
}
