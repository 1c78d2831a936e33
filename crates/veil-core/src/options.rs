use crate::error::{MaskError, MaskResult};
use crate::types::{Pattern, Preset};
use crate::{
    DEFAULT_MASK_CHAR, DEFAULT_MIN_MASK_LENGTH, DEFAULT_PREFIX_LENGTH, DEFAULT_SUFFIX_LENGTH,
    MAX_INPUT_LENGTH,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// What to do with input that is not text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NonTextPolicy {
    /// Numbers, booleans and structured values yield `""`
    #[default]
    Empty,
    /// Numbers and booleans are rendered to text and masked
    Coerce,
    /// Anything but text (or null) is an `InvalidType` error
    Reject,
}

/// Masking options – defines WHICH strategy runs and HOW it masks.
///
/// Field names serialize in camelCase so option bags written for other
/// front ends deserialize unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MaskOptions {
    /// Text repeated over masked positions (1 to 10 characters)
    pub mask_char: String,

    /// Characters left visible at the start
    pub prefix_length: usize,

    /// Characters left visible at the end
    pub suffix_length: usize,

    /// Leave the input unchanged when fewer characters than this would be masked
    pub min_mask_length: usize,

    pub full_mask: bool,

    /// Mask the prefix and suffix zones and show the middle
    pub reverse_mask: bool,

    /// Share of characters to mask, 0 to 100, centered
    pub percentage: Option<f64>,

    /// Longest input accepted, in characters
    pub max_length: usize,

    pub preset: Option<Preset>,

    pub pattern: Option<Pattern>,

    /// Regex source; matching middle characters stay visible
    pub preserve_pattern: Option<String>,

    /// Fill masked positions from a random palette
    pub random_mask: bool,

    /// Memoize results in the engine's cache
    pub cache: bool,

    /// Reject prefix/suffix lengths that do not fit the input instead of
    /// returning the input unchanged
    pub strict: bool,

    pub non_text: NonTextPolicy,
}

impl Default for MaskOptions {
    fn default() -> Self {
        Self {
            mask_char: DEFAULT_MASK_CHAR.to_string(),
            prefix_length: DEFAULT_PREFIX_LENGTH,
            suffix_length: DEFAULT_SUFFIX_LENGTH,
            min_mask_length: DEFAULT_MIN_MASK_LENGTH,
            full_mask: false,
            reverse_mask: false,
            percentage: None,
            max_length: MAX_INPUT_LENGTH,
            preset: None,
            pattern: None,
            preserve_pattern: None,
            random_mask: false,
            cache: true, // Memoize by default
            strict: false,
            non_text: NonTextPolicy::Empty,
        }
    }
}

impl MaskOptions {
    /// Builder pattern for ergonomic configuration
    pub fn builder() -> MaskOptionsBuilder {
        MaskOptionsBuilder::default()
    }

    /// Read an untyped option bag, checking every field's type.
    ///
    /// Missing and `null` fields keep their defaults; unknown keys are ignored.
    pub fn from_json(value: &Value) -> MaskResult<Self> {
        let map = match value {
            Value::Null => return Ok(Self::default()),
            Value::Object(map) => map,
            other => {
                return Err(MaskError::InvalidType {
                    found: json_type(other),
                })
            }
        };

        let mut options = Self::default();

        if let Some(v) = field(map, "maskChar") {
            options.mask_char = v
                .as_str()
                .ok_or_else(|| MaskError::InvalidMaskChar {
                    reason: format!("must be a string, got {}", json_type(v)),
                })?
                .to_string();
        }
        if let Some(n) = read_count(map, "prefixLength")? {
            options.prefix_length = n;
        }
        if let Some(n) = read_count(map, "suffixLength")? {
            options.suffix_length = n;
        }
        if let Some(n) = read_count(map, "minMaskLength")? {
            options.min_mask_length = n;
        }
        if let Some(n) = read_count(map, "maxLength")? {
            options.max_length = n;
        }
        if let Some(flag) = read_flag(map, "fullMask")? {
            options.full_mask = flag;
        }
        if let Some(flag) = read_flag(map, "reverseMask")? {
            options.reverse_mask = flag;
        }
        if let Some(flag) = read_flag(map, "randomMask")? {
            options.random_mask = flag;
        }
        if let Some(flag) = read_flag(map, "cache")? {
            options.cache = flag;
        }
        if let Some(flag) = read_flag(map, "strict")? {
            options.strict = flag;
        }
        if let Some(v) = field(map, "percentage") {
            options.percentage = Some(v.as_f64().ok_or_else(|| MaskError::InvalidPercentage {
                reason: format!("must be a number, got {}", json_type(v)),
            })?);
        }
        if let Some(v) = field(map, "preset") {
            options.preset = Some(match v.as_str() {
                Some(name) => name.parse()?,
                None => {
                    return Err(MaskError::UnknownPreset {
                        name: v.to_string(),
                    })
                }
            });
        }
        if let Some(v) = field(map, "pattern") {
            options.pattern = Some(match v.as_str() {
                Some(name) => name.parse()?,
                None => {
                    return Err(MaskError::InvalidPattern {
                        reason: format!("pattern must be a string, got {}", json_type(v)),
                    })
                }
            });
        }
        if let Some(v) = field(map, "preservePattern") {
            options.preserve_pattern = Some(
                v.as_str()
                    .ok_or_else(|| MaskError::InvalidPattern {
                        reason: format!("preservePattern must be a string, got {}", json_type(v)),
                    })?
                    .to_string(),
            );
        }
        if let Some(v) = field(map, "nonText") {
            options.non_text = serde_json::from_value(v.clone())
                .map_err(|_| MaskError::InvalidFlag { field: "nonText" })?;
        }

        Ok(options)
    }

    /// Options running one of the named presets
    pub fn for_preset(preset: Preset) -> Self {
        MaskOptionsBuilder::default().preset(preset).build()
    }

    /// Options masking every character
    pub fn full() -> Self {
        MaskOptionsBuilder::default().full_mask(true).build()
    }
}

fn field<'v>(map: &'v Map<String, Value>, key: &str) -> Option<&'v Value> {
    map.get(key).filter(|v| !v.is_null())
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn read_count(map: &Map<String, Value>, key: &'static str) -> MaskResult<Option<usize>> {
    let Some(v) = field(map, key) else {
        return Ok(None);
    };
    let invalid = |reason: &str| MaskError::InvalidNumericParam {
        field: key,
        reason: reason.to_string(),
    };

    if let Some(n) = v.as_u64() {
        return usize::try_from(n).map(Some).map_err(|_| invalid("is too large"));
    }
    match v.as_f64() {
        Some(f) if f < 0.0 => Err(invalid("must be a non-negative integer")),
        // 3.0 counts as an integer
        Some(f) if f.fract() == 0.0 && f <= usize::MAX as f64 => Ok(Some(f as usize)),
        Some(_) => Err(invalid("must be an integer")),
        None => Err(invalid(&format!("must be a number, got {}", json_type(v)))),
    }
}

fn read_flag(map: &Map<String, Value>, key: &'static str) -> MaskResult<Option<bool>> {
    match field(map, key) {
        None => Ok(None),
        Some(Value::Bool(flag)) => Ok(Some(*flag)),
        Some(_) => Err(MaskError::InvalidFlag { field: key }),
    }
}

/// Builder for MaskOptions – enables fluent configuration
#[derive(Default)]
pub struct MaskOptionsBuilder {
    options: MaskOptions,
}

impl MaskOptionsBuilder {
    pub fn mask_char(mut self, mask_char: impl Into<String>) -> Self {
        self.options.mask_char = mask_char.into();
        self
    }

    pub fn prefix_length(mut self, n: usize) -> Self {
        self.options.prefix_length = n;
        self
    }

    pub fn suffix_length(mut self, n: usize) -> Self {
        self.options.suffix_length = n;
        self
    }

    pub fn min_mask_length(mut self, n: usize) -> Self {
        self.options.min_mask_length = n;
        self
    }

    pub fn full_mask(mut self, enabled: bool) -> Self {
        self.options.full_mask = enabled;
        self
    }

    pub fn reverse_mask(mut self, enabled: bool) -> Self {
        self.options.reverse_mask = enabled;
        self
    }

    pub fn percentage(mut self, percentage: f64) -> Self {
        self.options.percentage = Some(percentage);
        self
    }

    pub fn max_length(mut self, n: usize) -> Self {
        self.options.max_length = n;
        self
    }

    pub fn preset(mut self, preset: Preset) -> Self {
        self.options.preset = Some(preset);
        self
    }

    pub fn pattern(mut self, pattern: Pattern) -> Self {
        self.options.pattern = Some(pattern);
        self
    }

    pub fn preserve_pattern(mut self, source: impl Into<String>) -> Self {
        self.options.preserve_pattern = Some(source.into());
        self
    }

    pub fn random_mask(mut self, enabled: bool) -> Self {
        self.options.random_mask = enabled;
        self
    }

    pub fn cache(mut self, enabled: bool) -> Self {
        self.options.cache = enabled;
        self
    }

    pub fn strict(mut self, enabled: bool) -> Self {
        self.options.strict = enabled;
        self
    }

    pub fn non_text(mut self, policy: NonTextPolicy) -> Self {
        self.options.non_text = policy;
        self
    }

    pub fn build(self) -> MaskOptions {
        self.options
    }
}
