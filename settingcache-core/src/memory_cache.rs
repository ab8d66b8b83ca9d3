use crate::CacheEntry;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

#[cfg(feature = "stats")]
use crate::CacheStats;

/// A named, thread-safe in-memory key/value cache.
///
/// Unlike a hidden process-wide singleton, a `MemoryCache` is an ordinary
/// value: create one, pass it by reference, drop it when done. Tests get an
/// isolated cache for free.
///
/// # Type Parameters
///
/// * `R` - The stored value type. `get` hands out clones, so what a caller
///   receives depends on `R`'s `Clone`: a plain value gives an independent
///   copy, a handle type such as [`SharedSetting`](crate::SharedSetting)
///   gives another reference to the same stored object.
///
/// # Thread Safety
///
/// The map is guarded by a `parking_lot::RwLock`. Lookups take the write
/// lock briefly because a hit bumps the entry's read counter; `contains_key`,
/// `reads` and `len` only read.
///
/// # Examples
///
/// ```
/// use settingcache_core::MemoryCache;
///
/// let cache = MemoryCache::new("default");
/// assert!(cache.add("commonSetting", 5));
/// assert!(!cache.add("commonSetting", 7)); // existing entry wins
///
/// assert_eq!(cache.get("commonSetting"), Some(5));
/// assert_eq!(cache.get("missing"), None);
/// ```
pub struct MemoryCache<R> {
    name: String,
    map: RwLock<HashMap<String, CacheEntry<R>>>,
    #[cfg(feature = "stats")]
    stats: CacheStats,
}

impl<R: Clone> MemoryCache<R> {
    /// Creates an empty cache.
    ///
    /// # Arguments
    ///
    /// * `name` - Label used in log events and `Debug` output
    ///
    /// # Examples
    ///
    /// ```
    /// use settingcache_core::MemoryCache;
    ///
    /// let cache: MemoryCache<String> = MemoryCache::new("default");
    /// assert_eq!(cache.name(), "default");
    /// assert!(cache.is_empty());
    /// ```
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            map: RwLock::new(HashMap::new()),
            #[cfg(feature = "stats")]
            stats: CacheStats::new(),
        }
    }

    /// The name given at construction.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Retrieves a clone of the value stored under `key`.
    ///
    /// Returns `None` for a missing key; absence is not an error at this
    /// level. A hit increments the entry's read counter.
    ///
    /// # Statistics
    ///
    /// With the `stats` feature every call records exactly one hit or miss.
    pub fn get(&self, key: &str) -> Option<R> {
        let result = {
            let mut m = self.map.write();
            m.get_mut(key).map(|entry| {
                entry.record_read();
                entry.value.clone()
            })
        };

        #[cfg(feature = "stats")]
        {
            if result.is_some() {
                self.stats.record_hit();
            } else {
                self.stats.record_miss();
            }
        }

        debug!(cache = %self.name, key, hit = result.is_some(), "cache lookup");
        result
    }

    /// Inserts `value` only if `key` is not present yet.
    ///
    /// Returns `true` when the value was stored, `false` when an entry already
    /// existed (the existing entry is left untouched).
    pub fn add(&self, key: &str, value: R) -> bool {
        let mut m = self.map.write();
        if m.contains_key(key) {
            debug!(cache = %self.name, key, "add skipped, key already present");
            return false;
        }
        m.insert(key.to_string(), CacheEntry::new(value));
        debug!(cache = %self.name, key, "entry added");
        true
    }

    /// Inserts or replaces the value stored under `key`.
    pub fn set(&self, key: &str, value: R) {
        self.map
            .write()
            .insert(key.to_string(), CacheEntry::new(value));
        debug!(cache = %self.name, key, "entry set");
    }

    /// Removes `key`, returning its value if it was present.
    pub fn remove(&self, key: &str) -> Option<R> {
        let removed = self.map.write().remove(key).map(|entry| entry.value);
        debug!(cache = %self.name, key, removed = removed.is_some(), "entry removed");
        removed
    }

    /// Returns `true` if `key` is present.
    ///
    /// Unlike [`get`](MemoryCache::get), this does not touch the read counter
    /// or the statistics.
    pub fn contains_key(&self, key: &str) -> bool {
        self.map.read().contains_key(key)
    }

    /// Number of successful lookups of `key` since it was inserted.
    pub fn reads(&self, key: &str) -> Option<u64> {
        self.map.read().get(key).map(|entry| entry.reads)
    }

    /// Number of entries currently stored.
    pub fn len(&self) -> usize {
        self.map.read().len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.map.read().is_empty()
    }

    /// Removes every entry. Statistics are kept.
    pub fn clear(&self) {
        self.map.write().clear();
        debug!(cache = %self.name, "cache cleared");
    }

    /// Hit/miss statistics for this cache.
    #[cfg(feature = "stats")]
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }
}

impl<R> std::fmt::Debug for MemoryCache<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCache")
            .field("name", &self.name)
            .field("len", &self.map.read().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_key() {
        let cache: MemoryCache<i32> = MemoryCache::new("test");
        assert_eq!(cache.get("absent"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_add_does_not_overwrite() {
        let cache = MemoryCache::new("test");
        assert!(cache.add("k", 1));
        assert!(!cache.add("k", 2));
        assert_eq!(cache.get("k"), Some(1));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_set_overwrites() {
        let cache = MemoryCache::new("test");
        cache.set("k", 1);
        cache.set("k", 2);
        assert_eq!(cache.get("k"), Some(2));
    }

    #[test]
    fn test_remove_then_add() {
        let cache = MemoryCache::new("test");
        cache.add("k", "first".to_string());
        assert_eq!(cache.remove("k"), Some("first".to_string()));
        assert!(!cache.contains_key("k"));
        assert_eq!(cache.remove("k"), None);

        assert!(cache.add("k", "second".to_string()));
        assert_eq!(cache.get("k"), Some("second".to_string()));
    }

    #[test]
    fn test_reads_counter() {
        let cache = MemoryCache::new("test");
        cache.add("k", 10);
        assert_eq!(cache.reads("k"), Some(0));

        cache.get("k");
        cache.get("k");
        cache.get("other");
        assert_eq!(cache.reads("k"), Some(2));
        assert_eq!(cache.reads("other"), None);
    }

    #[test]
    fn test_clear() {
        let cache = MemoryCache::new("test");
        cache.add("a", 1);
        cache.add("b", 2);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.get("a"), None);
    }

    #[cfg(feature = "stats")]
    #[test]
    fn test_stats_recorded_per_lookup() {
        let cache = MemoryCache::new("test");
        cache.add("k", 1);

        cache.get("k");
        cache.get("k");
        cache.get("missing");

        assert_eq!(cache.stats().hits(), 2);
        assert_eq!(cache.stats().misses(), 1);
    }

    #[test]
    fn test_debug_output() {
        let cache = MemoryCache::new("named");
        cache.add("k", 1);
        let debug = format!("{:?}", cache);
        assert!(debug.contains("named"));
        assert!(debug.contains("len: 1"));
    }
}
