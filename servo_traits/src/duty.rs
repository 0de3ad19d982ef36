//! Device-native duty-cycle representation.

use std::fmt;

/// Fraction of the output period during which the PWM line is held high.
///
/// Stored as fixed point where [`Duty::MAX`] is 100 %, so conversions to
/// drivers that want either a fraction or a raw count stay lossless enough
/// for servo work (24 bits ≈ 1.2 ns at 50 Hz).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Duty(u32);

impl Duty {
    pub const MAX: Duty = Duty(1 << 24);

    /// Build from a fraction of the period. Out-of-range and NaN inputs clamp
    /// to `[0, MAX]`.
    pub fn from_fraction(fraction: f64) -> Self {
        if fraction.is_nan() || fraction <= 0.0 {
            return Duty(0);
        }
        if fraction >= 1.0 {
            return Self::MAX;
        }
        Duty((fraction * f64::from(Self::MAX.0)).round() as u32)
    }

    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn fraction(self) -> f64 {
        f64::from(self.0) / f64::from(Self::MAX.0)
    }
}

impl fmt::Display for Duty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.fraction() * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_out_of_range_fractions() {
        assert_eq!(Duty::from_fraction(-0.5), Duty(0));
        assert_eq!(Duty::from_fraction(f64::NAN), Duty(0));
        assert_eq!(Duty::from_fraction(1.5), Duty::MAX);
    }

    #[test]
    fn displays_as_percentage() {
        assert_eq!(Duty::from_fraction(0.1).to_string(), "10.00%");
        assert_eq!(Duty::from_fraction(0.05).to_string(), "5.00%");
    }

    #[test]
    fn fraction_is_close_to_input() {
        let d = Duty::from_fraction(0.075);
        assert!((d.fraction() - 0.075).abs() < 1e-7);
    }
}
