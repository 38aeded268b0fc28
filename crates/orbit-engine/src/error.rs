use crate::ring::RingId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
    #[error("min ({min}) must be smaller than max ({max})")]
    EmptyRange { min: f64, max: f64 },
    #[error("step must be positive, got {0}")]
    NonPositiveStep(f64),
    #[error("step ({step}) is larger than the range {min}..{max}")]
    StepExceedsRange { step: f64, min: f64, max: f64 },
    #[error("step ({step}) is too small to divide the range {min}..{max}")]
    TooManySteps { step: f64, min: f64, max: f64 },
    #[error("value ({value}) can not be smaller than min ({min})")]
    ValueBelowMin { value: f64, min: f64 },
    #[error("value ({value}) can not be larger than max ({max})")]
    ValueAboveMax { value: f64, max: f64 },
    #[error("thickness must be positive, got {0}")]
    NonPositiveThickness(f64),
    #[error("{field} can not be negative, got {value}")]
    NegativeLength { field: &'static str, value: f64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot create ring `{0}` (id collision)")]
pub struct DuplicateIdError(pub RingId);

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    DuplicateId(#[from] DuplicateIdError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color `{input}`: expected a hex value such as #1e90ff")]
pub struct ColorParseError {
    pub input: String,
}
