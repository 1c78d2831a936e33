//! Shape-aware strategies: the `preset` recipes and the `pattern` family.
//!
//! Both families mask emails and phone numbers but with different outputs:
//!
//! | option            | input                  | output                 |
//! |-------------------|------------------------|------------------------|
//! | preset email      | `john.doe@example.com` | `jo******@example.com` |
//! | pattern email     | `john.doe@example.com` | `j******e@example.com` |
//! | preset phone      | `555-123-4567`         | `******4567`           |
//! | pattern phone     | `555-12`               | `*5512`                |
//! | preset creditCard | `4111 1111 1111 1111`  | `************1111`     |
//!
//! The outputs are pinned by tests; callers rely on each family's shape.

use super::{basic, fill};
use crate::detector::Classifier;
use crate::input::CharBuf;
use crate::types::Shape;
use crate::validator::Sanitized;
use once_cell::sync::Lazy;
use std::borrow::Cow;

/// Digits always left visible by the digit strategies
const VISIBLE_DIGITS: usize = 4;

/// Fewest digits the credit card preset masks; shorter input passes through
pub(super) const CARD_MIN_DIGITS: usize = 8;
/// Fewest digits the phone preset masks
pub(super) const PHONE_MIN_DIGITS: usize = 7;

/// Upper bound on visible local-part characters for the email preset
const EMAIL_PRESET_VISIBLE: usize = 2;

static CLASSIFIER: Lazy<Classifier> = Lazy::new(Classifier::default);

fn last_at(chars: &CharBuf) -> Option<usize> {
    chars.iter().rposition(|&c| c == '@')
}

fn digits(chars: &CharBuf) -> CharBuf {
    CharBuf::from_chars(chars.iter().copied().filter(char::is_ascii_digit).collect())
}

/// Mask run followed by the last four digits; formatting is dropped
fn mask_all_but_last_digits(digits: &CharBuf, options: &Sanitized) -> String {
    let hidden = digits.len() - VISIBLE_DIGITS;
    let mut out = String::with_capacity(digits.len());
    fill(&mut out, &options.mask_chars(), hidden);
    out.extend(&digits[hidden..]);
    out
}

/// Shows up to two leading characters of the local part (at most a third of
/// it); the domain is always shown.
pub(super) fn email_preset<'a>(text: &'a str, chars: &CharBuf, options: &Sanitized) -> Cow<'a, str> {
    let Some(at) = last_at(chars) else {
        return Cow::Borrowed(text);
    };
    let local_len = at;
    if local_len <= 2 {
        return Cow::Borrowed(text);
    }

    let visible = EMAIL_PRESET_VISIBLE.min(local_len / 3);
    let mut out = String::with_capacity(text.len());
    out.extend(&chars[..visible]);
    fill(&mut out, &options.mask_chars(), local_len - visible);
    out.extend(&chars[at..]);
    Cow::Owned(out)
}

pub(super) fn digits_preset<'a>(
    text: &'a str,
    chars: &CharBuf,
    min_digits: usize,
    options: &Sanitized,
) -> Cow<'a, str> {
    let digits = digits(chars);
    if digits.len() < min_digits {
        return Cow::Borrowed(text);
    }
    Cow::Owned(mask_all_but_last_digits(&digits, options))
}

/// Shows the first and last character of the local part. Falls back to
/// standard masking when there is no `@`.
pub(super) fn email_pattern<'a>(text: &'a str, chars: &CharBuf, options: &Sanitized) -> Cow<'a, str> {
    let Some(at) = last_at(chars) else {
        return basic::standard(text, chars, options);
    };
    let local_len = at;
    if local_len <= 2 {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    out.push(chars[0]);
    fill(&mut out, &options.mask_chars(), local_len - 2);
    out.extend(&chars[at - 1..]);
    Cow::Owned(out)
}

/// Last four digits shown, everything else masked
pub(super) fn phone_pattern<'a>(text: &'a str, chars: &CharBuf, options: &Sanitized) -> Cow<'a, str> {
    let digits = digits(chars);
    if digits.len() <= VISIBLE_DIGITS {
        return Cow::Borrowed(text);
    }
    Cow::Owned(mask_all_but_last_digits(&digits, options))
}

/// Shape used by `pattern: auto`, or `None` for standard masking
pub(super) fn classify(text: &str) -> Option<Shape> {
    CLASSIFIER.classify(text)
}

#[cfg(test)]
mod tests {
    use crate::options::MaskOptions;
    use crate::strategy::run;
    use crate::types::{Pattern, Preset};
    use pretty_assertions::assert_eq;

    fn preset(p: Preset) -> MaskOptions {
        MaskOptions::for_preset(p)
    }

    fn pattern(p: Pattern) -> MaskOptions {
        MaskOptions::builder().pattern(p).build()
    }

    #[test]
    fn test_email_preset() {
        let options = preset(Preset::Email);
        assert_eq!(run("john.doe@example.com", &options), "jo******@example.com");
        // a third of 3 is 1
        assert_eq!(run("abc@x.io", &options), "a**@x.io");
        assert_eq!(run("abcdef@x.io", &options), "ab****@x.io");
    }

    #[test]
    fn test_email_preset_passthrough() {
        let options = preset(Preset::Email);
        assert_eq!(run("no-at-sign", &options), "no-at-sign");
        assert_eq!(run("ab@example.com", &options), "ab@example.com");
    }

    #[test]
    fn test_email_preset_splits_at_last_at() {
        let options = preset(Preset::Email);
        assert_eq!(run("a@b@example.com", &options), "a**@example.com");
    }

    #[test]
    fn test_credit_card_preset() {
        let options = preset(Preset::CreditCard);
        assert_eq!(run("4111111111111111", &options), "************1111");
        // formatting is dropped
        assert_eq!(run("4111 1111 1111 1111", &options), "************1111");
        // 7 digits < 8
        assert_eq!(run("1234-567", &options), "1234-567");
    }

    #[test]
    fn test_phone_preset() {
        let options = preset(Preset::Phone);
        assert_eq!(run("555-123-4567", &options), "******4567");
        assert_eq!(run("123-4567", &options), "***4567");
        // 6 digits < 7
        assert_eq!(run("12-3456", &options), "12-3456");
    }

    #[test]
    fn test_preset_respects_mask_char() {
        let options = MaskOptions::builder()
            .preset(Preset::CreditCard)
            .mask_char("X")
            .build();
        assert_eq!(run("4111111111111111", &options), "XXXXXXXXXXXX1111");
    }

    #[test]
    fn test_email_pattern_shows_first_and_last_local_char() {
        let options = pattern(Pattern::Email);
        assert_eq!(run("john.doe@example.com", &options), "j******e@example.com");
        assert_eq!(run("abc@x.io", &options), "a*c@x.io");
        assert_eq!(run("ab@x.io", &options), "ab@x.io");
    }

    #[test]
    fn test_email_pattern_without_at_falls_back_to_standard() {
        let options = pattern(Pattern::Email);
        assert_eq!(run("mysecretkey", &options), "mys*****key");
    }

    #[test]
    fn test_phone_pattern() {
        let options = pattern(Pattern::Phone);
        assert_eq!(run("+1 (555) 123-4567", &options), "*******4567");
        assert_eq!(run("555-12", &options), "*5512");
        assert_eq!(run("12-34", &options), "12-34");
    }

    #[test]
    fn test_generic_pattern_is_standard() {
        assert_eq!(run("mysecretkey", &pattern(Pattern::Generic)), "mys*****key");
    }

    #[test]
    fn test_auto_dispatches_on_shape() {
        let options = pattern(Pattern::Auto);
        assert_eq!(run("john.doe@example.com", &options), "j******e@example.com");
        assert_eq!(run("555-123-4567", &options), "******4567");
        assert_eq!(run("mysecretkey", &options), "mys*****key");
    }
}
