//! Masking strategies.
//!
//! Each strategy is a pure function of (input, sanitized options). Strategies
//! return `Cow::Borrowed` when the input passes through unchanged.

mod basic;
mod shape;

use crate::input::CharBuf;
use crate::options::MaskOptions;
use crate::types::{Pattern, Preset, Shape};
use crate::validator::Sanitized;
use std::borrow::Cow;

/// The single policy chosen for a call.
///
/// Precedence when several option families are set:
/// preset > pattern > fullMask > percentage > reverseMask > randomMask >
/// preservePattern > standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Strategy {
    Preset(Preset),
    Pattern(Pattern),
    Full,
    Percentage,
    Reverse,
    Random,
    PreservePattern,
    Standard,
}

impl Strategy {
    pub fn select(options: &MaskOptions) -> Self {
        if let Some(preset) = options.preset {
            Self::Preset(preset)
        } else if let Some(pattern) = options.pattern {
            Self::Pattern(pattern)
        } else if options.full_mask {
            Self::Full
        } else if options.percentage.is_some() {
            Self::Percentage
        } else if options.reverse_mask {
            Self::Reverse
        } else if options.random_mask {
            Self::Random
        } else if options.preserve_pattern.is_some() {
            Self::PreservePattern
        } else {
            Self::Standard
        }
    }

    /// Settle the input-dependent fallbacks of the pattern family: `auto`
    /// takes the shape of the input, and email without an `@` is standard.
    pub fn resolve(self, text: &str) -> Self {
        match self {
            Self::Pattern(Pattern::Auto) => match shape::classify(text) {
                Some(Shape::Email) => Self::Pattern(Pattern::Email).resolve(text),
                Some(Shape::Phone) => Self::Pattern(Pattern::Phone),
                None => Self::Standard,
            },
            Self::Pattern(Pattern::Email) if !text.contains('@') => Self::Standard,
            other => other,
        }
    }

    /// Strategies that keep a prefix and suffix visible around a masked middle.
    /// Call on a resolved strategy; `auto` itself is never framed.
    pub fn is_framed(&self) -> bool {
        matches!(
            self,
            Self::Standard | Self::Random | Self::PreservePattern | Self::Pattern(Pattern::Generic)
        )
    }

    /// Same input and options always give the same output
    pub fn is_deterministic(&self) -> bool {
        !matches!(self, Self::Random)
    }

    pub fn apply<'a>(&self, text: &'a str, chars: &CharBuf, options: &Sanitized) -> Cow<'a, str> {
        match self {
            Self::Preset(Preset::Email) => shape::email_preset(text, chars, options),
            Self::Preset(Preset::CreditCard) => {
                shape::digits_preset(text, chars, shape::CARD_MIN_DIGITS, options)
            }
            Self::Preset(Preset::Phone) => {
                shape::digits_preset(text, chars, shape::PHONE_MIN_DIGITS, options)
            }
            Self::Pattern(Pattern::Email) => shape::email_pattern(text, chars, options),
            Self::Pattern(Pattern::Phone) => shape::phone_pattern(text, chars, options),
            Self::Pattern(Pattern::Generic) => basic::standard(text, chars, options),
            Self::Pattern(Pattern::Auto) => self.resolve(text).apply(text, chars, options),
            Self::Full => basic::full(text, chars, options),
            Self::Percentage => basic::percentage(text, chars, options),
            Self::Reverse => basic::reverse(text, chars, options),
            Self::Random => basic::random(text, chars, options),
            Self::PreservePattern => basic::preserve(text, chars, options),
            Self::Standard => basic::standard(text, chars, options),
        }
    }
}

/// Append `count` characters cycling through `mask`
fn fill(out: &mut String, mask: &[char], count: usize) {
    out.extend(mask.iter().cycle().take(count));
}

/// Length of the masked middle for a prefix/suffix frame, or `None` when the
/// input is too short or the middle falls under `min_mask_length`.
fn masked_middle(len: usize, options: &Sanitized) -> Option<usize> {
    let visible = options.prefix_length.saturating_add(options.suffix_length);
    if len <= visible {
        return None;
    }
    let middle = len - visible;
    if options.min_mask_length > 0 && middle < options.min_mask_length {
        return None;
    }
    Some(middle)
}

#[cfg(test)]
pub(crate) fn run(text: &str, options: &MaskOptions) -> String {
    let chars = CharBuf::new(text);
    let sanitized = crate::validator::validate(text, options).unwrap();
    sanitized
        .strategy
        .apply(text, &chars, &sanitized)
        .into_owned()
}
