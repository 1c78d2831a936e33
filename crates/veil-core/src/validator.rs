//! Option validation.
//!
//! Turns caller options into [`Sanitized`] options checked against one input.
//! Runs before any strategy and before the cache is consulted. Errors name the
//! offending field but never include the input.

use crate::error::{MaskError, MaskResult};
use crate::options::MaskOptions;
use crate::strategy::Strategy;
use crate::MAX_MASK_CHAR_LENGTH;
use regex::{Regex, RegexBuilder};

/// Compiled-size ceiling for caller-supplied preserve patterns
const PRESERVE_PATTERN_SIZE_LIMIT: usize = 1 << 20;

/// Options checked against a specific input, ready for a strategy.
#[derive(Debug, Clone)]
pub(crate) struct Sanitized {
    pub mask_char: String,
    pub prefix_length: usize,
    pub suffix_length: usize,
    pub min_mask_length: usize,
    pub percentage: Option<f64>,
    pub preserve: Option<Regex>,
    pub cache: bool,
    pub strategy: Strategy,
}

impl Sanitized {
    /// Mask characters, cycled to fill masked runs
    pub fn mask_chars(&self) -> Vec<char> {
        self.mask_char.chars().collect()
    }

    /// First mask character, used where one character replaces exactly one
    pub fn mask_unit(&self) -> char {
        self.mask_char.chars().next().unwrap_or('*')
    }
}

/// Validate `options` for one input.
///
/// Rules, in order: maximum length, mask character, prefix/suffix fit (only in
/// strict mode and only when the strategy resolved for this input is framed by
/// prefix and suffix), percentage range, preserve-pattern compilation.
pub(crate) fn validate(text: &str, options: &MaskOptions) -> MaskResult<Sanitized> {
    let length = text.chars().count();
    if options.max_length == 0 {
        return Err(MaskError::InvalidNumericParam {
            field: "maxLength",
            reason: "must be greater than 0".to_string(),
        });
    }
    if length > options.max_length {
        return Err(MaskError::LengthExceeded {
            length,
            max: options.max_length,
        });
    }

    let mask_len = options.mask_char.chars().count();
    if mask_len == 0 {
        return Err(MaskError::InvalidMaskChar {
            reason: "must be a non-empty string".to_string(),
        });
    }
    if mask_len > MAX_MASK_CHAR_LENGTH {
        return Err(MaskError::InvalidMaskChar {
            reason: format!(
                "must be at most {MAX_MASK_CHAR_LENGTH} characters, got {mask_len}"
            ),
        });
    }

    let strategy = Strategy::select(options).resolve(text);

    if options.strict && strategy.is_framed() {
        check_fit(length, options.prefix_length, options.suffix_length)?;
    }

    if let Some(percentage) = options.percentage {
        if !(0.0..=100.0).contains(&percentage) {
            return Err(MaskError::InvalidPercentage {
                reason: format!("must be between 0 and 100, got {percentage}"),
            });
        }
    }

    let preserve = options
        .preserve_pattern
        .as_deref()
        .map(compile_preserve_pattern)
        .transpose()?;

    Ok(Sanitized {
        mask_char: options.mask_char.clone(),
        prefix_length: options.prefix_length,
        suffix_length: options.suffix_length,
        min_mask_length: options.min_mask_length,
        percentage: options.percentage,
        preserve,
        cache: options.cache,
        strategy,
    })
}

fn check_fit(length: usize, prefix: usize, suffix: usize) -> MaskResult<()> {
    if prefix > length {
        return Err(MaskError::ParamExceedsLength {
            field: "prefixLength",
            value: prefix,
            length,
        });
    }
    if suffix > length {
        return Err(MaskError::ParamExceedsLength {
            field: "suffixLength",
            value: suffix,
            length,
        });
    }
    if prefix.saturating_add(suffix) > length {
        return Err(MaskError::CombinedLengthExceeded {
            prefix,
            suffix,
            length,
        });
    }
    Ok(())
}

/// The regex crate guarantees linear-time matching, so the only guard needed
/// against hostile sources is a bound on compiled size.
fn compile_preserve_pattern(source: &str) -> MaskResult<Regex> {
    RegexBuilder::new(source)
        .size_limit(PRESERVE_PATTERN_SIZE_LIMIT)
        .build()
        .map_err(|e| MaskError::InvalidPattern {
            reason: format!("preservePattern does not compile: {e}"),
        })
}
