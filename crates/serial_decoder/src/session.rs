//! Per-decoder disambiguation cache.
//!
//! Shipment tables often repeat the same range string on several lines
//! (one per install batch). The session remembers the last numeric endpoint
//! handed out for each key so the next occurrence continues the numbering
//! instead of restarting and producing colliding serials.
//!
//! Not thread-safe: classification reads and then writes the same key.
//! Callers that parallelize must partition rows by key or serialize access
//! to one decoder.

use std::collections::HashMap;

/// Mapping `range key -> last assigned endpoint`.
///
/// Entries are never removed. For any key the stored endpoint only grows.
#[derive(Debug, Default, Clone)]
pub struct SessionState {
    endpoints: HashMap<String, u64>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last endpoint recorded for `key`, if any.
    pub fn last_endpoint(&self, key: &str) -> Option<u64> {
        self.endpoints.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.endpoints.contains_key(key)
    }

    /// Record `endpoint` for `key`. Never moves an existing entry backwards.
    pub fn record(&mut self, key: &str, endpoint: u64) {
        match self.endpoints.get_mut(key) {
            Some(existing) => *existing = (*existing).max(endpoint),
            None => {
                self.endpoints.insert(key.to_string(), endpoint);
            }
        }
    }

    /// Allocate `count` members for a count-only range.
    ///
    /// First use yields `1..=count`; later uses continue after the last
    /// endpoint. Returns `(start, end)`; `end < start` when `count` is 0.
    pub fn allocate_count(&mut self, key: &str, count: u64) -> (u64, u64) {
        let last = self.last_endpoint(key).unwrap_or(0);
        let start = last.saturating_add(1);
        let end = last.saturating_add(count);
        self.record(key, end);
        (start, end)
    }

    /// Place an explicit `start..=end` span.
    ///
    /// A key seen before is shifted to begin after its last endpoint,
    /// keeping the span width; a new key is seeded with `end`.
    pub fn place_span(&mut self, key: &str, start: u64, end: u64) -> (u64, u64) {
        match self.last_endpoint(key) {
            Some(last) => {
                let width = end.saturating_sub(start);
                let shifted_start = last.saturating_add(1);
                let shifted_end = shifted_start.saturating_add(width);
                self.record(key, shifted_end);
                (shifted_start, shifted_end)
            }
            None => {
                self.record(key, end);
                (start, end)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}
