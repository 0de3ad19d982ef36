//! Parsing and rescaling of textual target lines.

use crate::config::InputCfg;
use crate::error::{BuildError, InputError};

/// Accepted input bounds and the linear rescale to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputRange {
    min: f64,
    max: f64,
}

impl InputRange {
    pub fn new(cfg: &InputCfg) -> Result<Self, BuildError> {
        if !cfg.min.is_finite() || !cfg.max.is_finite() {
            return Err(BuildError::InvalidConfig("input bounds must be finite"));
        }
        if cfg.min >= cfg.max {
            return Err(BuildError::InvalidConfig(
                "min input must be less than max input",
            ));
        }
        if !(cfg.max - cfg.min).is_finite() {
            return Err(BuildError::InvalidConfig("input range is too wide"));
        }
        Ok(Self {
            min: cfg.min,
            max: cfg.max,
        })
    }

    /// Rescale an in-range value to the normalized `[0, 1]` range.
    #[inline]
    pub fn normalize(&self, value: f64) -> f64 {
        (value - self.min) / (self.max - self.min)
    }

    /// Parse one input line into a normalized target.
    ///
    /// Surrounding whitespace is ignored. NaN and infinities are rejected
    /// before the range check so they can never reach the controller.
    pub fn parse_line(&self, line: &str) -> Result<f64, InputError> {
        let s = line.trim();
        let value: f64 = s
            .parse()
            .map_err(|_| InputError::NotANumber(s.to_string()))?;
        if !value.is_finite() {
            return Err(InputError::NotFinite(s.to_string()));
        }
        if value < self.min || value > self.max {
            return Err(InputError::OutOfRange {
                value,
                min: self.min,
                max: self.max,
            });
        }
        Ok(self.normalize(value))
    }

    /// Like [`parse_line`](Self::parse_line) for a raw line read from a byte
    /// stream. Bytes that are not UTF-8 reject the line, not the stream.
    pub fn parse_bytes(&self, line: &[u8]) -> Result<f64, InputError> {
        match std::str::from_utf8(line) {
            Ok(text) => self.parse_line(text),
            Err(_) => Err(InputError::NotUtf8(
                String::from_utf8_lossy(line).trim().to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_map_to_unit_interval() {
        let range = InputRange::new(&InputCfg {
            min: -90.0,
            max: 90.0,
        })
        .unwrap();
        assert_eq!(range.parse_line("-90").unwrap(), 0.0);
        assert_eq!(range.parse_line("90").unwrap(), 1.0);
        assert_eq!(range.parse_line(" 0.0 ").unwrap(), 0.5);
    }

    #[test]
    fn rejects_garbage_and_non_finite() {
        let range = InputRange::new(&InputCfg::default()).unwrap();
        assert_eq!(
            range.parse_line("abc"),
            Err(InputError::NotANumber("abc".into()))
        );
        assert_eq!(range.parse_line(""), Err(InputError::NotANumber("".into())));
        assert_eq!(
            range.parse_line("NaN"),
            Err(InputError::NotFinite("NaN".into()))
        );
        assert!(matches!(
            range.parse_line("inf"),
            Err(InputError::NotFinite(_))
        ));
    }

    #[test]
    fn non_utf8_bytes_reject_only_that_line() {
        let range = InputRange::new(&InputCfg::default()).unwrap();
        assert_eq!(
            range.parse_bytes(b"\xff\xfe0.5"),
            Err(InputError::NotUtf8("\u{fffd}\u{fffd}0.5".into()))
        );
        assert_eq!(range.parse_bytes(b" 0.5\r"), Ok(0.5));
    }

    #[test]
    fn rejects_out_of_range() {
        let range = InputRange::new(&InputCfg::default()).unwrap();
        assert!(matches!(
            range.parse_line("1.0001"),
            Err(InputError::OutOfRange { .. })
        ));
        assert!(matches!(
            range.parse_line("-0.5"),
            Err(InputError::OutOfRange { .. })
        ));
    }

    #[test]
    fn inverted_bounds_fail_to_build() {
        let err = InputRange::new(&InputCfg { min: 1.0, max: 0.0 }).unwrap_err();
        assert_eq!(
            err,
            BuildError::InvalidConfig("min input must be less than max input")
        );
    }
}
