//! Error taxonomy for the masking engine.
//!
//! Every variant carries option values, lengths and field names only. The text
//! being masked never reaches an error message, so errors are safe to log.

use thiserror::Error;

/// Failure raised before any masking strategy runs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MaskError {
    /// Input was not text and the call path rejects non-text values
    #[error("Invalid input type: expected a string, got {found}")]
    InvalidType { found: &'static str },

    #[error("Input length {length} exceeds maximum allowed length of {max}")]
    LengthExceeded { length: usize, max: usize },

    #[error("Invalid mask character: {reason}")]
    InvalidMaskChar { reason: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidNumericParam { field: &'static str, reason: String },

    #[error("{field} ({value}) exceeds input length ({length})")]
    ParamExceedsLength {
        field: &'static str,
        value: usize,
        length: usize,
    },

    #[error("prefixLength ({prefix}) + suffixLength ({suffix}) exceeds input length ({length})")]
    CombinedLengthExceeded {
        prefix: usize,
        suffix: usize,
        length: usize,
    },

    #[error("Invalid percentage: {reason}")]
    InvalidPercentage { reason: String },

    #[error("Invalid pattern: {reason}")]
    InvalidPattern { reason: String },

    #[error("Unknown preset '{name}' (expected one of: email, creditCard, phone)")]
    UnknownPreset { name: String },

    #[error("Invalid flag {field}: must be a boolean")]
    InvalidFlag { field: &'static str },
}

impl MaskError {
    /// Stable identifier for the error kind, suitable for metrics and exit reports
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidType { .. } => "INVALID_TYPE",
            Self::LengthExceeded { .. } => "LENGTH_EXCEEDED",
            Self::InvalidMaskChar { .. } => "INVALID_MASK_CHAR",
            Self::InvalidNumericParam { .. } => "INVALID_NUMERIC_PARAM",
            Self::ParamExceedsLength { .. } => "PARAM_EXCEEDS_LENGTH",
            Self::CombinedLengthExceeded { .. } => "COMBINED_LENGTH_EXCEEDED",
            Self::InvalidPercentage { .. } => "INVALID_PERCENTAGE",
            Self::InvalidPattern { .. } => "INVALID_PATTERN",
            Self::UnknownPreset { .. } => "UNKNOWN_PRESET",
            Self::InvalidFlag { .. } => "INVALID_FLAG",
        }
    }
}

pub type MaskResult<T> = Result<T, MaskError>;
