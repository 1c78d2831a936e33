use crate::error::{MaskError, MaskResult};
use crate::options::NonTextPolicy;
use serde_json::Value;
use std::borrow::Cow;
use std::ops::Deref;
use zeroize::Zeroize;

/// A value handed to the engine for masking.
///
/// Only `Text` is masked directly; the other variants are resolved through the
/// caller's [`NonTextPolicy`].
#[derive(Debug, Clone, PartialEq)]
pub enum Input<'a> {
    Text(Cow<'a, str>),
    /// Number already rendered to its canonical text form
    Number(String),
    Bool(bool),
    /// null / undefined
    Absent,
    /// Structured value (array, object) that has no text form
    Other(&'static str),
}

impl<'a> Input<'a> {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "string",
            Self::Number(_) => "number",
            Self::Bool(_) => "boolean",
            Self::Absent => "null",
            Self::Other(kind) => *kind,
        }
    }

    /// Resolve to the text to mask, or `None` when the result is the empty string.
    pub(crate) fn resolve(&self, policy: NonTextPolicy) -> MaskResult<Option<Cow<'_, str>>> {
        match self {
            Self::Text(text) => Ok(Some(Cow::Borrowed(text.as_ref()))),
            Self::Absent => Ok(None),
            Self::Number(_) | Self::Bool(_) | Self::Other(_) => match policy {
                NonTextPolicy::Empty => Ok(None),
                NonTextPolicy::Reject => Err(MaskError::InvalidType {
                    found: self.type_name(),
                }),
                NonTextPolicy::Coerce => Ok(match self {
                    Self::Number(rendered) => Some(Cow::Borrowed(rendered.as_str())),
                    Self::Bool(flag) => Some(Cow::Owned(flag.to_string())),
                    _ => None,
                }),
            },
        }
    }
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(Cow::Borrowed(text))
    }
}

impl<'a> From<&'a String> for Input<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(Cow::Borrowed(text.as_str()))
    }
}

impl From<String> for Input<'static> {
    fn from(text: String) -> Self {
        Self::Text(Cow::Owned(text))
    }
}

impl From<bool> for Input<'static> {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Input<'static> {
                fn from(n: $ty) -> Self {
                    Self::Number(n.to_string())
                }
            }
        )*
    };
}

impl_from_number!(i32, i64, u32, u64, usize, f64);

impl<'a, T> From<Option<T>> for Input<'a>
where
    T: Into<Input<'a>>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

impl<'a> From<&'a Value> for Input<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::String(text) => Self::Text(Cow::Borrowed(text.as_str())),
            Value::Number(n) => Self::Number(n.to_string()),
            Value::Bool(flag) => Self::Bool(*flag),
            Value::Null => Self::Absent,
            Value::Array(_) => Self::Other("array"),
            Value::Object(_) => Self::Other("object"),
        }
    }
}

/// Characters of a secret, wiped when dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CharBuf(Vec<char>);

impl CharBuf {
    pub fn new(text: &str) -> Self {
        Self(text.chars().collect())
    }

    pub fn from_chars(chars: Vec<char>) -> Self {
        Self(chars)
    }
}

impl Deref for CharBuf {
    type Target = [char];

    fn deref(&self) -> &[char] {
        &self.0
    }
}

impl Zeroize for CharBuf {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl Drop for CharBuf {
    fn drop(&mut self) {
        self.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_option_maps_none_to_absent() {
        assert_eq!(Input::from(None::<&str>), Input::Absent);
        assert_eq!(Input::from(Some("abc")), Input::Text(Cow::Borrowed("abc")));
    }

    #[test]
    fn test_json_values_keep_their_type() {
        assert_eq!(Input::from(&json!(42)).type_name(), "number");
        assert_eq!(Input::from(&json!(true)).type_name(), "boolean");
        assert_eq!(Input::from(&json!([1])).type_name(), "array");
        assert_eq!(Input::from(&json!({})).type_name(), "object");
        assert_eq!(Input::from(&Value::Null), Input::Absent);
    }

    #[test]
    fn test_resolve_follows_policy() {
        let n = Input::from(1234567u64);
        assert_eq!(n.resolve(NonTextPolicy::Empty).unwrap(), None);
        assert_eq!(
            n.resolve(NonTextPolicy::Coerce).unwrap().as_deref(),
            Some("1234567")
        );
        assert!(matches!(
            n.resolve(NonTextPolicy::Reject),
            Err(MaskError::InvalidType { found: "number" })
        ));
        // Absent is never an error
        assert_eq!(Input::Absent.resolve(NonTextPolicy::Reject).unwrap(), None);
        // Structured values have no text form even when coercing
        assert_eq!(Input::Other("array").resolve(NonTextPolicy::Coerce).unwrap(), None);
    }

    #[test]
    fn test_char_buf_counts_scalar_values() {
        let buf = CharBuf::new("秘密🔒");
        assert_eq!(buf.len(), 3);
        assert_eq!(buf[2], '🔒');
    }

    #[test]
    fn test_char_buf_zeroize_clears_contents() {
        let mut buf = CharBuf::new("secret");
        buf.zeroize();
        assert!(buf.is_empty());
    }
}
