use std::time::{Duration, Instant};

/// Internal wrapper that tracks when a value was inserted into the cache
/// and how many times it has been read since.
///
/// # Type Parameters
///
/// * `R` - The type of the cached value
///
/// # Fields
///
/// * `value` - The actual cached value
/// * `inserted_at` - The `Instant` when this entry was created
/// * `reads` - The number of successful lookups that returned this entry
///
/// # Examples
///
/// ```
/// use settingcache_core::CacheEntry;
///
/// let entry = CacheEntry::new(42);
/// assert_eq!(entry.value, 42);
/// assert_eq!(entry.reads, 0);
/// ```
#[derive(Clone, Debug)]
pub struct CacheEntry<R> {
    pub value: R,
    pub inserted_at: Instant,
    pub reads: u64,
}

impl<R> CacheEntry<R> {
    /// Creates a new cache entry with the current timestamp and a zero read counter.
    pub fn new(value: R) -> Self {
        Self {
            value,
            inserted_at: Instant::now(),
            reads: 0,
        }
    }

    /// Time elapsed since the entry was inserted.
    pub fn age(&self) -> Duration {
        self.inserted_at.elapsed()
    }

    /// Increments the read counter.
    ///
    /// # Examples
    ///
    /// ```
    /// use settingcache_core::CacheEntry;
    ///
    /// let mut entry = CacheEntry::new("commonSetting");
    /// entry.record_read();
    /// entry.record_read();
    /// assert_eq!(entry.reads, 2);
    /// ```
    pub fn record_read(&mut self) {
        self.reads = self.reads.saturating_add(1);
    }
}
