use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MaskError;

/// Named masking recipes tuned for a known data shape.
///
/// Design principles:
/// - Outputs are pinned by tests; changing one is a breaking change
/// - No heap allocations in enum (all variants are `Copy`)
/// - Wire names match the option values callers already send
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Preset {
    Email,
    CreditCard,
    Phone,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::CreditCard => "creditCard",
            Self::Phone => "phone",
        }
    }
}

impl FromStr for Preset {
    type Err = MaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(Self::Email),
            "creditCard" => Ok(Self::CreditCard),
            "phone" => Ok(Self::Phone),
            other => Err(MaskError::UnknownPreset {
                name: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape-aware masking family selected by the `pattern` option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Pattern {
    Email,
    Phone,
    Generic,
    /// Classify the input first, then dispatch
    Auto,
}

impl Pattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Generic => "generic",
            Self::Auto => "auto",
        }
    }
}

impl FromStr for Pattern {
    type Err = MaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(Self::Email),
            "phone" => Ok(Self::Phone),
            "generic" => Ok(Self::Generic),
            "auto" => Ok(Self::Auto),
            other => Err(MaskError::InvalidPattern {
                reason: format!("unknown pattern '{other}'"),
            }),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shapes the auto classifier can recognise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Email,
    Phone,
}
