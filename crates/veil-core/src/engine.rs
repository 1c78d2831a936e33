use crate::{
    cache::{CacheKey, CacheStats, MaskCache},
    error::{MaskError, MaskResult},
    info::{self, MaskInfo},
    input::{CharBuf, Input},
    options::MaskOptions,
    validator::validate,
    ASYNC_CHUNK_SIZE,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Core masking engine – orchestrates validation, caching, and strategies
#[derive(Debug, Clone, Default)]
pub struct Masker {
    cache: Arc<MaskCache>,
}

impl Masker {
    /// Create an engine with its own cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine sharing `cache` with other engines
    pub fn with_cache(cache: Arc<MaskCache>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &Arc<MaskCache> {
        &self.cache
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Mask one value.
    ///
    /// Absent input (and non-text input, unless the options coerce or reject
    /// it) yields an empty string. Validation failures never mention the input.
    pub fn obscure<'a>(&self, input: impl Into<Input<'a>>, options: &MaskOptions) -> MaskResult<String> {
        let input = input.into();
        match input.resolve(options.non_text)? {
            Some(text) => self.obscure_text(&text, options),
            None => Ok(String::new()),
        }
    }

    /// Mask every element; an element that fails contributes `""` at its
    /// position, so the output always has the same length as the input.
    pub fn obscure_batch<'a, I>(&self, inputs: I, options: &MaskOptions) -> Vec<String>
    where
        I: IntoIterator,
        I::Item: Into<Input<'a>>,
    {
        inputs
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                self.obscure(item, options).unwrap_or_else(|e| {
                    debug!(index, code = e.code(), "batch element replaced with empty string");
                    String::new()
                })
            })
            .collect()
    }

    /// Batch over an untyped value, which must be an array
    pub fn obscure_batch_value(&self, value: &Value, options: &MaskOptions) -> MaskResult<Vec<String>> {
        match value {
            Value::Array(items) => Ok(self.obscure_batch(items, options)),
            other => Err(MaskError::InvalidType {
                found: Input::from(other).type_name(),
            }),
        }
    }

    /// Same result as [`Masker::obscure`]. Inputs of at least
    /// `ASYNC_CHUNK_SIZE` characters yield to the runtime once before the work
    /// runs; the work itself, cache store included, is one synchronous step.
    pub async fn obscure_async<'a>(
        &self,
        input: impl Into<Input<'a>>,
        options: &MaskOptions,
    ) -> MaskResult<String> {
        let input = input.into();
        let large = match &input {
            Input::Text(text) => text.chars().nth(ASYNC_CHUNK_SIZE - 1).is_some(),
            _ => false,
        };
        if large {
            tokio::task::yield_now().await;
        }
        self.obscure(input, options)
    }

    /// Report whether and how `input` would be masked. Never touches the cache.
    pub fn mask_info<'a>(&self, input: impl Into<Input<'a>>, options: &MaskOptions) -> MaskInfo {
        info::describe(&input.into(), options)
    }

    fn obscure_text(&self, text: &str, options: &MaskOptions) -> MaskResult<String> {
        if text.is_empty() {
            return Ok(String::new());
        }

        let length = text.chars().count();
        let sanitized = validate(text, options)?;

        // Random output must stay random, so it is never memoized
        let key = (sanitized.cache && sanitized.strategy.is_deterministic())
            .then(|| CacheKey::derive(text, &sanitized));
        if let Some(hit) = key.as_ref().and_then(|k| self.cache.lookup(k)) {
            return Ok(hit);
        }

        let chars = CharBuf::new(text);
        let masked = sanitized.strategy.apply(text, &chars, &sanitized).into_owned();
        debug!(strategy = ?sanitized.strategy, length, "masked input");

        if let Some(key) = key {
            self.cache.store(key, masked.clone());
        }
        Ok(masked)
    }
}
