//! String-keyed pool of [`SimpleText`] so per-frame labels keep their
//! measurement between frames.
//!
//! The pool is owned by the caller's render context. When it reaches its
//! capacity it is cleared wholesale rather than evicting entry by entry.

use std::collections::HashMap;

use super::simple::SimpleText;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextCacheConfig {
    /// Entries kept before the pool is cleared
    pub capacity: usize,
}

impl Default for TextCacheConfig {
    fn default() -> Self {
        Self { capacity: 256 }
    }
}

#[derive(Debug, Default)]
pub struct TextCache {
    config: TextCacheConfig,
    entries: HashMap<String, SimpleText>,
    hits: u64,
    misses: u64,
}

impl TextCache {
    pub fn new(config: TextCacheConfig) -> Self {
        Self {
            config,
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    pub fn config(&self) -> TextCacheConfig {
        self.config
    }

    /// The cached text object for `text`, created on a miss.
    pub fn get(&mut self, text: &str) -> &mut SimpleText {
        if self.entries.contains_key(text) {
            self.hits += 1;
        } else {
            self.misses += 1;
            if self.entries.len() >= self.config.capacity.max(1) {
                log::debug!(
                    target: "TextCache",
                    "capacity {} reached, clearing (hits={}, misses={})",
                    self.config.capacity,
                    self.hits,
                    self.misses
                );
                self.entries.clear();
            }
        }
        self.entries
            .entry(text.to_owned())
            .or_insert_with(|| SimpleText::new(text))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
