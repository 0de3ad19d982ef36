use thiserror::Error;

#[derive(Debug, Error)]
pub enum HwError {
    #[error("pwm error: {0}")]
    Pwm(String),
    #[error("unknown PWM output {0} (expected 1 or 2)")]
    UnknownOutput(u8),
    #[error("simulated write failure after {0} writes")]
    SimulatedFailure(usize),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HwError>;
