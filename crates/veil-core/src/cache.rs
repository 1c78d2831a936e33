//! Bounded memo of masked results.
//!
//! Keys are SHA-256 digests of the input and every option that affects the
//! output, so no plaintext is retained in keys and two inputs of the same
//! length never collide. Eviction is FIFO: the oldest inserted entry goes
//! first, regardless of how recently it was read.

use crate::validator::Sanitized;
use crate::CACHE_CAPACITY;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct CacheKey([u8; 32]);

impl CacheKey {
    pub fn derive(text: &str, options: &Sanitized) -> Self {
        let mut hasher = Sha256::new();
        // Length prefixes keep adjacent fields from running together
        hasher.update((text.len() as u64).to_le_bytes());
        hasher.update(text.as_bytes());
        hasher.update((options.mask_char.len() as u64).to_le_bytes());
        hasher.update(options.mask_char.as_bytes());
        hasher.update((options.prefix_length as u64).to_le_bytes());
        hasher.update((options.suffix_length as u64).to_le_bytes());
        hasher.update((options.min_mask_length as u64).to_le_bytes());
        match options.percentage {
            Some(p) => {
                hasher.update([1u8]);
                hasher.update(p.to_bits().to_le_bytes());
            }
            None => hasher.update([0u8]),
        }
        let strategy = format!("{:?}", options.strategy);
        hasher.update((strategy.len() as u64).to_le_bytes());
        hasher.update(strategy.as_bytes());
        if let Some(regex) = &options.preserve {
            hasher.update(regex.as_str().as_bytes());
        }
        Self(hasher.finalize().into())
    }
}

/// Snapshot of cache occupancy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub size: usize,
    pub max_size: usize,
}

#[derive(Debug, Default)]
struct Entries {
    values: HashMap<CacheKey, String>,
    /// Insertion order, oldest first
    order: VecDeque<CacheKey>,
}

/// FIFO cache shared by every call on one engine.
///
/// Lookup and store each take the lock once; the evict-then-insert sequence
/// runs under a single guard so the size never exceeds capacity.
#[derive(Debug)]
pub struct MaskCache {
    entries: Mutex<Entries>,
    capacity: usize,
}

impl Default for MaskCache {
    fn default() -> Self {
        Self::new()
    }
}

impl MaskCache {
    pub fn new() -> Self {
        Self::with_capacity(CACHE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(Entries::default()),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.lock().values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        let mut entries = self.lock();
        entries.values.clear();
        entries.order.clear();
        trace!("mask cache cleared");
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.len(),
            max_size: self.capacity,
        }
    }

    pub(crate) fn lookup(&self, key: &CacheKey) -> Option<String> {
        let hit = self.lock().values.get(key).cloned();
        trace!(hit = hit.is_some(), "mask cache lookup");
        hit
    }

    pub(crate) fn store(&self, key: CacheKey, value: String) {
        if self.capacity == 0 {
            return;
        }
        let mut entries = self.lock();
        if let Some(existing) = entries.values.get_mut(&key) {
            // Keeps its original insertion slot
            *existing = value;
            return;
        }
        while entries.values.len() >= self.capacity {
            let Some(oldest) = entries.order.pop_front() else {
                break;
            };
            entries.values.remove(&oldest);
            trace!("mask cache evicted oldest entry");
        }
        entries.order.push_back(key);
        entries.values.insert(key, value);
    }

    fn lock(&self) -> MutexGuard<'_, Entries> {
        // A panic mid-store leaves the maps consistent, so a poisoned lock is usable
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
