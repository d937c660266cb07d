//! Encoding cache for repeated chunks.
//!
//! Natural-language text repeats the same pre-tokenized chunks (" the", ",",
//! " and") constantly, so memoizing chunk -> IDs skips most merge loops on
//! long prompts.

use ahash::AHashMap;
use std::collections::BTreeMap;
use std::sync::Arc;

/// LRU cache from chunk text to its token IDs.
///
/// Recency is tracked with a monotonically increasing stamp; the oldest
/// stamp is evicted once the cache is full. Keys and IDs are reference
/// counted, so a hit only moves the key to a new stamp and never allocates.
#[derive(Debug)]
pub struct EncodingCache {
    /// chunk -> (token IDs, last-use stamp)
    entries: AHashMap<Arc<str>, (Arc<[u32]>, u64)>,
    /// last-use stamp -> chunk, oldest first
    recency: BTreeMap<u64, Arc<str>>,
    /// Maximum number of entries in the cache
    capacity: usize,
    clock: u64,
    hits: u64,
    misses: u64,
}

impl EncodingCache {
    /// Create a new encoding cache with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: AHashMap::with_capacity(capacity),
            recency: BTreeMap::new(),
            capacity,
            clock: 0,
            hits: 0,
            misses: 0,
        }
    }

    /// Look up a chunk, marking it as most recently used.
    pub fn get(&mut self, chunk: &str) -> Option<Arc<[u32]>> {
        let stamp = self.tick();
        match self.entries.get_mut(chunk) {
            Some((ids, last_used)) => {
                if let Some(key) = self.recency.remove(&*last_used) {
                    self.recency.insert(stamp, key);
                }
                *last_used = stamp;
                self.hits += 1;
                Some(Arc::clone(ids))
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Insert a value into the cache, evicting the least recently used entry
    /// if it is full.
    pub fn insert(&mut self, chunk: &str, ids: impl Into<Arc<[u32]>>) {
        if self.capacity == 0 {
            return;
        }

        if let Some((_, last_used)) = self.entries.remove(chunk) {
            self.recency.remove(&last_used);
        }
        while self.entries.len() >= self.capacity {
            match self.recency.pop_first() {
                Some((_, oldest)) => {
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }

        let stamp = self.tick();
        let key: Arc<str> = Arc::from(chunk);
        self.recency.insert(stamp, Arc::clone(&key));
        self.entries.insert(key, (ids.into(), stamp));
    }

    /// Clear all entries from the cache.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.recency.clear();
    }

    /// Get the number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the cache capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get cache statistics.
    pub fn stats(&self) -> CacheStats {
        let lookups = self.hits + self.misses;
        CacheStats {
            entries: self.entries.len(),
            capacity: self.capacity,
            hit_rate: (lookups > 0).then(|| self.hits as f64 / lookups as f64),
        }
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }
}

/// Cache statistics.
#[derive(Debug, Clone)]
pub struct CacheStats {
    /// Current number of entries
    pub entries: usize,
    /// Maximum capacity
    pub capacity: usize,
    /// Cache hit rate (None before the first lookup)
    pub hit_rate: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_hit_miss() {
        let mut cache = EncodingCache::with_capacity(3);

        assert_eq!(cache.get("hello"), None);
        cache.insert("hello", vec![1, 2, 3]);
        assert_eq!(cache.get("hello").as_deref(), Some(&[1, 2, 3][..]));
        assert_eq!(cache.get("world"), None);

        let stats = cache.stats();
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.hit_rate, Some(1.0 / 3.0));
    }

    #[test]
    fn test_lru_eviction() {
        let mut cache = EncodingCache::with_capacity(2);

        cache.insert("a", vec![1]);
        cache.insert("b", vec![2]);
        cache.insert("c", vec![3]);

        // "a" should have been evicted (oldest)
        assert!(cache.get("a").is_none());
        assert!(cache.get("b").is_some());
        assert!(cache.get("c").is_some());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_lru_update() {
        let mut cache = EncodingCache::with_capacity(2);

        cache.insert("a", vec![1]);
        cache.insert("b", vec![2]);

        // Access "a" to make it recently used
        cache.get("a");

        // Add "c" - should evict "b" not "a"
        cache.insert("c", vec![3]);

        assert!(cache.get("a").is_some());
        assert!(cache.get("b").is_none());
        assert!(cache.get("c").is_some());
    }

    #[test]
    fn test_hit_shares_entry() {
        let mut cache = EncodingCache::with_capacity(2);
        cache.insert("a", vec![1, 2]);
        cache.insert("b", vec![3]);

        let first = cache.get("a").unwrap();
        let second = cache.get("a").unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        // hits move the key, they never add recency entries
        assert_eq!(cache.recency.len(), cache.entries.len());
        assert_eq!(cache.recency.values().last().map(|k| &**k), Some("a"));
    }

    #[test]
    fn test_reinsert_does_not_grow() {
        let mut cache = EncodingCache::with_capacity(2);
        cache.insert("a", vec![1]);
        cache.insert("a", vec![1, 1]);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("a").as_deref(), Some(&[1, 1][..]));
    }

    #[test]
    fn test_zero_capacity_stores_nothing() {
        let mut cache = EncodingCache::with_capacity(0);
        cache.insert("a", vec![1]);
        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), 0);
    }

    #[test]
    fn test_clear() {
        let mut cache = EncodingCache::with_capacity(4);
        cache.insert("hello", vec![1, 2, 3]);
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.get("hello").is_none());
    }
}
