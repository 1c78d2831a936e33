use crate::input::Input;
use crate::options::MaskOptions;
use serde::{Deserialize, Serialize};

pub const REASON_ABSENT: &str = "Input is null or undefined";
pub const REASON_EMPTY: &str = "Input is an empty string";
pub const REASON_TOO_SHORT: &str = "Input is too short to mask with the given prefix and suffix";
pub const REASON_BELOW_MINIMUM: &str = "Masked section would be shorter than minMaskLength";

/// Dry-run report of what standard or full masking would do to an input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaskInfo {
    pub will_be_masked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub masked_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_chars: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub masked_chars: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_mask_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask_length: Option<usize>,
}

impl MaskInfo {
    fn skipped(reason: &str) -> Self {
        Self {
            will_be_masked: false,
            reason: Some(reason.to_string()),
            ..Self::default()
        }
    }
}

/// Classify `input` without masking it. Only the frame, minimum and full-mask
/// options are consulted; nothing here can fail.
pub(crate) fn describe(input: &Input<'_>, options: &MaskOptions) -> MaskInfo {
    let text = match input.resolve(options.non_text) {
        Ok(Some(text)) => text,
        Ok(None) | Err(_) => return MaskInfo::skipped(REASON_ABSENT),
    };
    if text.is_empty() {
        return MaskInfo::skipped(REASON_EMPTY);
    }

    let len = text.chars().count();
    if options.full_mask {
        return MaskInfo {
            will_be_masked: true,
            original_length: Some(len),
            masked_length: Some(len),
            visible_chars: Some(0),
            masked_chars: Some(len),
            ..MaskInfo::default()
        };
    }

    let (prefix, suffix) = (options.prefix_length, options.suffix_length);
    let visible = prefix.saturating_add(suffix);
    if len <= visible {
        return MaskInfo {
            original_length: Some(len),
            prefix_length: Some(prefix),
            suffix_length: Some(suffix),
            ..MaskInfo::skipped(REASON_TOO_SHORT)
        };
    }

    let mask_length = len - visible;
    if options.min_mask_length > 0 && mask_length < options.min_mask_length {
        return MaskInfo {
            original_length: Some(len),
            mask_length: Some(mask_length),
            min_mask_length: Some(options.min_mask_length),
            ..MaskInfo::skipped(REASON_BELOW_MINIMUM)
        };
    }

    MaskInfo {
        will_be_masked: true,
        original_length: Some(len),
        masked_length: Some(len),
        visible_chars: Some(visible),
        masked_chars: Some(mask_length),
        prefix_length: Some(prefix),
        suffix_length: Some(suffix),
        ..MaskInfo::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn info(input: impl Into<Input<'static>>, options: &MaskOptions) -> MaskInfo {
        describe(&input.into(), options)
    }

    #[test]
    fn test_absent_and_empty() {
        let options = MaskOptions::default();
        assert_eq!(info(None::<&'static str>, &options).reason.as_deref(), Some(REASON_ABSENT));
        assert_eq!(info("", &options).reason.as_deref(), Some(REASON_EMPTY));
        // non-text without coercion reads as absent
        assert_eq!(info(12345678u64, &options).reason.as_deref(), Some(REASON_ABSENT));
    }

    #[test]
    fn test_maskable() {
        let report = info("mysecretkey", &MaskOptions::default());
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({
                "willBeMasked": true,
                "originalLength": 11,
                "maskedLength": 11,
                "visibleChars": 6,
                "maskedChars": 5,
                "prefixLength": 3,
                "suffixLength": 3
            })
        );
    }

    #[test]
    fn test_too_short() {
        let report = info("short", &MaskOptions::default());
        assert!(!report.will_be_masked);
        assert_eq!(report.reason.as_deref(), Some(REASON_TOO_SHORT));
        assert_eq!(report.original_length, Some(5));
        assert_eq!(report.prefix_length, Some(3));
        assert_eq!(report.masked_chars, None);
    }

    #[test]
    fn test_below_minimum() {
        let options = MaskOptions::builder().min_mask_length(10).build();
        let report = info("mysecretkey", &options);
        assert!(!report.will_be_masked);
        assert_eq!(report.reason.as_deref(), Some(REASON_BELOW_MINIMUM));
        assert_eq!(report.mask_length, Some(5));
        assert_eq!(report.min_mask_length, Some(10));
    }

    #[test]
    fn test_full_mask_ignores_frame() {
        let report = info("abc", &MaskOptions::full());
        assert!(report.will_be_masked);
        assert_eq!(report.visible_chars, Some(0));
        assert_eq!(report.masked_chars, Some(3));
    }

    #[test]
    fn test_coerced_numbers_are_described() {
        let options = MaskOptions::builder()
            .non_text(crate::options::NonTextPolicy::Coerce)
            .build();
        let report = info(1234567890u64, &options);
        assert!(report.will_be_masked);
        assert_eq!(report.original_length, Some(10));
    }

    #[test]
    fn test_invalid_options_do_not_fail() {
        let options = MaskOptions::builder().mask_char("").percentage(900.0).build();
        assert!(info("mysecretkey", &options).will_be_masked);
    }
}
