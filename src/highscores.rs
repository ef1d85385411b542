//! Best survival time
//!
//! A single millisecond value persisted as a numeric string.

use crate::platform::storage::{KeyValueStore, StorageError};

/// High score persisted through a key-value store
#[derive(Debug)]
pub struct HighScoreStore<S> {
    store: S,
}

impl<S: KeyValueStore> HighScoreStore<S> {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "chroma_catch_high_score_ms";

    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Stored best in ms. Absent, non-numeric, negative or non-finite reads as 0.
    pub fn load(&self) -> f64 {
        let Some(raw) = self.store.get(Self::STORAGE_KEY) else {
            return 0.0;
        };
        match raw.trim().parse::<f64>() {
            Ok(ms) if ms.is_finite() && ms >= 0.0 => ms,
            _ => {
                log::warn!("Ignoring unreadable high score {:?}", raw);
                0.0
            }
        }
    }

    /// Overwrite unconditionally; callers decide whether a score qualifies
    pub fn save(&mut self, ms: f64) -> Result<(), StorageError> {
        self.store.set(Self::STORAGE_KEY, &ms.to_string())
    }

    /// Persist `final_ms` if it strictly beats `current_best`.
    /// Returns the best after the update.
    pub fn record(&mut self, current_best: f64, final_ms: f64) -> f64 {
        if final_ms <= current_best {
            return current_best;
        }
        match self.save(final_ms) {
            Ok(()) => log::info!("New high score: {:.3}s", final_ms / 1000.0),
            Err(e) => log::warn!("High score not saved: {}", e),
        }
        final_ms
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::storage::MemoryStore;

    fn store_with(raw: &str) -> HighScoreStore<MemoryStore> {
        let mut mem = MemoryStore::new();
        mem.set(HighScoreStore::<MemoryStore>::STORAGE_KEY, raw).unwrap();
        HighScoreStore::new(mem)
    }

    #[test]
    fn test_absent_is_zero() {
        let scores = HighScoreStore::new(MemoryStore::new());
        assert_eq!(scores.load(), 0.0);
    }

    #[test]
    fn test_garbage_is_zero() {
        assert_eq!(store_with("fast").load(), 0.0);
        assert_eq!(store_with("").load(), 0.0);
        assert_eq!(store_with("-12").load(), 0.0);
        assert_eq!(store_with("NaN").load(), 0.0);
        assert_eq!(store_with("inf").load(), 0.0);
    }

    #[test]
    fn test_fractional_value_survives() {
        let mut scores = HighScoreStore::new(MemoryStore::new());
        scores.save(4321.5).unwrap();
        assert_eq!(scores.load(), 4321.5);
    }

    #[test]
    fn test_lower_score_keeps_best() {
        let mut scores = store_with("5000");
        let best = scores.record(scores.load(), 3000.0);
        assert_eq!(best, 5000.0);
        assert_eq!(scores.load(), 5000.0);
    }

    #[test]
    fn test_higher_score_replaces_best() {
        let mut scores = store_with("5000");
        let best = scores.record(scores.load(), 7000.0);
        assert_eq!(best, 7000.0);
        assert_eq!(scores.load(), 7000.0);
    }

    #[test]
    fn test_equal_score_does_not_write() {
        let mut scores = store_with("5000.0");
        scores.record(5000.0, 5000.0);
        assert_eq!(
            scores.store().get(HighScoreStore::<MemoryStore>::STORAGE_KEY).as_deref(),
            Some("5000.0")
        );
    }
}
