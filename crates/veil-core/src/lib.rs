//! String masking for display and logs.
//!
//! Replaces part of a string with a repeated mask while keeping chosen edges
//! visible. Strategies: standard prefix/suffix, full, reverse, percentage,
//! presets (email, credit card, phone), shape patterns, preserve-pattern and
//! random. Results are memoized in a small FIFO cache.
//!
//! This is lossy, one-way replacement for display. It is not encryption and
//! makes no constant-time guarantees.
//!
//! ```
//! use veil_core::{obscure_string, MaskOptions};
//!
//! let masked = obscure_string("mysecretkey", &MaskOptions::default()).unwrap();
//! assert_eq!(masked, "mys*****key");
//! ```
//!
//! The free functions share one process-wide [`Masker`]. Construct your own
//! `Masker` for an isolated cache.

pub mod cache;
pub mod detector;
pub mod engine;
pub mod error;
pub mod info;
pub mod input;
pub mod options;
mod strategy;
pub mod types;
mod validator;

pub use cache::{CacheStats, MaskCache};
pub use engine::Masker;
pub use error::{MaskError, MaskResult};
pub use info::MaskInfo;
pub use input::Input;
pub use options::{MaskOptions, MaskOptionsBuilder, NonTextPolicy};
pub use types::{Pattern, Preset, Shape};

use once_cell::sync::Lazy;
use serde_json::Value;

/// Longest input accepted by default, in characters
pub const MAX_INPUT_LENGTH: usize = 1_000_000;
/// Longest mask string, in characters
pub const MAX_MASK_CHAR_LENGTH: usize = 10;
pub const DEFAULT_MASK_CHAR: &str = "*";
pub const DEFAULT_PREFIX_LENGTH: usize = 3;
pub const DEFAULT_SUFFIX_LENGTH: usize = 3;
pub const DEFAULT_MIN_MASK_LENGTH: usize = 0;
/// Entries kept by a default cache
pub const CACHE_CAPACITY: usize = 100;
/// Inputs at least this long yield once on the async path
pub const ASYNC_CHUNK_SIZE: usize = 10_000;

static GLOBAL: Lazy<Masker> = Lazy::new(Masker::new);

/// Mask `input` with the process-wide engine.
pub fn obscure_string<'a>(input: impl Into<Input<'a>>, options: &MaskOptions) -> MaskResult<String> {
    GLOBAL.obscure(input, options)
}

pub async fn obscure_string_async<'a>(
    input: impl Into<Input<'a>>,
    options: &MaskOptions,
) -> MaskResult<String> {
    GLOBAL.obscure_async(input, options).await
}

pub fn obscure_string_batch<'a, I>(inputs: I, options: &MaskOptions) -> Vec<String>
where
    I: IntoIterator,
    I::Item: Into<Input<'a>>,
{
    GLOBAL.obscure_batch(inputs, options)
}

/// Batch over an untyped value; fails with `InvalidType` unless it is an array
pub fn obscure_string_batch_value(value: &Value, options: &MaskOptions) -> MaskResult<Vec<String>> {
    GLOBAL.obscure_batch_value(value, options)
}

pub fn get_mask_info<'a>(input: impl Into<Input<'a>>, options: &MaskOptions) -> MaskInfo {
    GLOBAL.mask_info(input, options)
}

pub fn clear_cache() {
    GLOBAL.clear_cache();
}

pub fn get_cache_stats() -> CacheStats {
    GLOBAL.cache_stats()
}
