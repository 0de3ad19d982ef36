use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ServoError {
    #[error("hardware error: {0}")]
    Hardware(String),
    #[error("hardware fault: {0}")]
    HardwareFault(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("actuator writer stopped before the controller finished")]
    WriterStopped,
    #[error("output already released")]
    Released,
    #[error("invalid state: {0}")]
    State(String),
    #[error("io error: {0}")]
    Io(String),
}

/// Why an input line was not accepted as a target.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InputError {
    #[error("line is not valid UTF-8: {0:?}")]
    NotUtf8(String),
    #[error("not a number: {0:?}")]
    NotANumber(String),
    #[error("value must be finite: {0:?}")]
    NotFinite(String),
    #[error("value must be in the range {min}-{max}: {value}")]
    OutOfRange { value: f64, min: f64, max: f64 },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
