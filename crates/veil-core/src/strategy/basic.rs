use super::{fill, masked_middle};
use crate::input::CharBuf;
use crate::validator::Sanitized;
use rand::Rng;
use std::borrow::Cow;

/// Characters drawn from by the random strategy
const RANDOM_PALETTE: [char; 8] = ['*', '#', '@', '$', '%', '&', '!', '?'];

/// prefix + masked middle + suffix
pub(super) fn standard<'a>(text: &'a str, chars: &CharBuf, options: &Sanitized) -> Cow<'a, str> {
    let len = chars.len();
    let Some(middle) = masked_middle(len, options) else {
        return Cow::Borrowed(text);
    };

    let mut out = String::with_capacity(text.len());
    out.extend(&chars[..options.prefix_length]);
    fill(&mut out, &options.mask_chars(), middle);
    out.extend(&chars[len - options.suffix_length..]);
    Cow::Owned(out)
}

pub(super) fn full<'a>(text: &'a str, chars: &CharBuf, options: &Sanitized) -> Cow<'a, str> {
    if chars.is_empty() {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len());
    fill(&mut out, &options.mask_chars(), chars.len());
    Cow::Owned(out)
}

/// Masks the prefix and suffix zones, shows the middle
pub(super) fn reverse<'a>(text: &'a str, chars: &CharBuf, options: &Sanitized) -> Cow<'a, str> {
    let len = chars.len();
    let zones = options.prefix_length.saturating_add(options.suffix_length);
    let masked_total = zones.min(len);

    if masked_total == 0 || (options.min_mask_length > 0 && masked_total < options.min_mask_length)
    {
        return Cow::Borrowed(text);
    }
    // Nothing left to show
    if zones >= len {
        return full(text, chars, options);
    }

    let mask = options.mask_chars();
    let mut out = String::with_capacity(text.len());
    fill(&mut out, &mask, options.prefix_length);
    out.extend(&chars[options.prefix_length..len - options.suffix_length]);
    fill(&mut out, &mask, options.suffix_length);
    Cow::Owned(out)
}

/// Masks floor(len * percentage / 100) characters centered in the input
pub(super) fn percentage<'a>(text: &'a str, chars: &CharBuf, options: &Sanitized) -> Cow<'a, str> {
    let len = chars.len();
    let share = options.percentage.unwrap_or(0.0);
    let mask_count = (len as f64 * share / 100.0).floor() as usize;

    if mask_count == 0 {
        return Cow::Borrowed(text);
    }
    if mask_count >= len {
        return full(text, chars, options);
    }

    let visible = len - mask_count;
    let prefix = visible / 2;
    let suffix = visible - prefix;

    let mut out = String::with_capacity(text.len());
    out.extend(&chars[..prefix]);
    fill(&mut out, &options.mask_chars(), mask_count);
    out.extend(&chars[len - suffix..]);
    Cow::Owned(out)
}

/// Standard framing with each masked position drawn from a fixed palette.
/// A position never keeps its original character.
pub(super) fn random<'a>(text: &'a str, chars: &CharBuf, options: &Sanitized) -> Cow<'a, str> {
    let len = chars.len();
    if masked_middle(len, options).is_none() {
        return Cow::Borrowed(text);
    }

    let mut rng = rand::thread_rng();
    let mut out = String::with_capacity(text.len());
    out.extend(&chars[..options.prefix_length]);
    for &original in &chars[options.prefix_length..len - options.suffix_length] {
        out.push(random_mask_char(&mut rng, original));
    }
    out.extend(&chars[len - options.suffix_length..]);
    Cow::Owned(out)
}

fn random_mask_char<R: Rng>(rng: &mut R, original: char) -> char {
    loop {
        let candidate = RANDOM_PALETTE[rng.gen_range(0..RANDOM_PALETTE.len())];
        if candidate != original {
            return candidate;
        }
    }
}

/// Standard framing; middle characters matching the preserve pattern stay,
/// every other one becomes a single mask character.
pub(super) fn preserve<'a>(text: &'a str, chars: &CharBuf, options: &Sanitized) -> Cow<'a, str> {
    let Some(regex) = options.preserve.as_ref() else {
        return standard(text, chars, options);
    };
    let len = chars.len();
    if masked_middle(len, options).is_none() {
        return Cow::Borrowed(text);
    }

    let unit = options.mask_unit();
    let mut buf = [0u8; 4];
    let mut out = String::with_capacity(text.len());
    out.extend(&chars[..options.prefix_length]);
    for &c in &chars[options.prefix_length..len - options.suffix_length] {
        if regex.is_match(c.encode_utf8(&mut buf)) {
            out.push(c);
        } else {
            out.push(unit);
        }
    }
    out.extend(&chars[len - options.suffix_length..]);
    Cow::Owned(out)
}
