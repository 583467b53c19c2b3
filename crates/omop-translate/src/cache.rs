//! Translation outcome caching.
//!
//! Provides an LRU cache with TTL expiration keyed by the request triple
//! `(system, code, target system)`.

use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use lru::LruCache;
use parking_lot::Mutex;

use crate::config::CacheConfig;
use crate::result::TranslationOutcome;

/// A cached outcome with expiration tracking.
#[derive(Debug, Clone)]
struct CacheEntry {
    outcome: TranslationOutcome,
    created_at: Instant,
}

impl CacheEntry {
    fn new(outcome: TranslationOutcome) -> Self {
        Self {
            outcome,
            created_at: Instant::now(),
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() > ttl
    }
}

/// Thread-safe LRU cache with TTL expiration for translation outcomes.
///
/// # Example
///
/// ```ignore
/// let cache = TranslationCache::new(CacheConfig::default());
/// let key = CacheKey::new("44054006", "http://snomed.info/sct", "http://hl7.org/fhir/sid/icd-10-cm");
///
/// cache.set(key.clone(), outcome.clone());
/// assert_eq!(cache.get(&key), Some(outcome));
/// ```
pub struct TranslationCache {
    inner: Mutex<LruCache<CacheKey, CacheEntry>>,
    ttl: Duration,
}

impl TranslationCache {
    /// Creates a new cache with the given configuration.
    pub fn new(config: CacheConfig) -> Self {
        Self::with_capacity(config.max_entries, config.ttl)
    }

    /// Creates a cache with custom capacity and TTL. A capacity of zero is
    /// treated as one.
    pub fn with_capacity(max_entries: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Mutex::new(LruCache::new(capacity)),
            ttl,
        }
    }

    /// Gets a cached outcome by key.
    ///
    /// Expired entries are removed and reported as misses. A hit promotes the
    /// entry to most-recently-used.
    pub fn get(&self, key: &CacheKey) -> Option<TranslationOutcome> {
        let mut cache = self.inner.lock();

        if let Some(entry) = cache.get(key) {
            if entry.is_expired(self.ttl) {
                cache.pop(key);
                return None;
            }
            return Some(entry.outcome.clone());
        }

        None
    }

    /// Stores an outcome, evicting the least recently used entry when full.
    pub fn set(&self, key: CacheKey, outcome: TranslationOutcome) {
        self.inner.lock().put(key, CacheEntry::new(outcome));
    }

    /// Checks if a key exists in the cache (without affecting LRU order).
    ///
    /// Note: This doesn't check for expiration.
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.inner.lock().contains(key)
    }

    /// Returns the number of entries, expired ones included.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears all entries from the cache.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Removes expired entries from the cache.
    pub fn cleanup_expired(&self) {
        let mut cache = self.inner.lock();
        let ttl = self.ttl;
        let expired_keys: Vec<CacheKey> = cache
            .iter()
            .filter(|(_, entry)| entry.is_expired(ttl))
            .map(|(key, _)| key.clone())
            .collect();

        for key in expired_keys {
            cache.pop(&key);
        }
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        let cache = self.inner.lock();
        let total = cache.len();
        let expired = cache
            .iter()
            .filter(|(_, entry)| entry.is_expired(self.ttl))
            .count();

        CacheStats {
            total_entries: total,
            expired_entries: expired,
            valid_entries: total.saturating_sub(expired),
        }
    }
}

impl std::fmt::Debug for TranslationCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stats = self.stats();
        f.debug_struct("TranslationCache")
            .field("entries", &stats.total_entries)
            .field("ttl", &self.ttl)
            .finish()
    }
}

/// Statistics about the cache state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Total number of entries in the cache.
    pub total_entries: usize,
    /// Number of expired entries (not yet cleaned up).
    pub expired_entries: usize,
    /// Number of valid (non-expired) entries.
    pub valid_entries: usize,
}

/// Cache key for a translation request.
///
/// Each part is kept as its own field, so codes or systems containing
/// separator characters (SNOMED `|term|` syntax) cannot collide. System
/// identifiers are trimmed; the code is kept verbatim since codes are
/// matched exactly.
///
/// ```rust
/// use omop_translate::CacheKey;
///
/// let key = CacheKey::new("E11", " http://hl7.org/fhir/sid/icd-10-cm ", "http://snomed.info/sct");
/// assert_eq!(key.system, "http://hl7.org/fhir/sid/icd-10-cm");
/// assert_ne!(
///     CacheKey::new("X|T", "S", "T"),
///     CacheKey::new("X", "S", "T|T"),
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Source system, trimmed.
    pub system: String,
    /// Source code, verbatim.
    pub code: String,
    /// Target system, trimmed.
    pub target_system: String,
}

impl CacheKey {
    /// Builds the key for a request.
    pub fn new(code: &str, system: &str, target_system: &str) -> Self {
        Self {
            system: system.trim().to_string(),
            code: code.to_string(),
            target_system: target_system.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::{NotFoundReason, TranslationStats};
    use std::sync::Arc;
    use std::thread;

    fn create_test_cache(max_entries: usize, ttl_secs: u64) -> TranslationCache {
        TranslationCache::with_capacity(max_entries, Duration::from_secs(ttl_secs))
    }

    fn key(code: &str) -> CacheKey {
        CacheKey::new(code, "http://snomed.info/sct", "http://loinc.org")
    }

    fn outcome() -> TranslationOutcome {
        TranslationOutcome::not_found(NotFoundReason::NoMappingKnown, TranslationStats::default())
    }

    #[test]
    fn test_cache_set_get() {
        let cache = create_test_cache(100, 300);
        cache.set(key("k"), outcome());
        assert_eq!(cache.get(&key("k")), Some(outcome()));
        assert!(cache.get(&key("missing")).is_none());
    }

    #[test]
    fn test_cache_clear_and_contains() {
        let cache = create_test_cache(100, 300);
        cache.set(key("k1"), outcome());
        cache.set(key("k2"), outcome());
        assert_eq!(cache.len(), 2);
        assert!(cache.contains(&key("k1")));

        cache.clear();
        assert!(cache.is_empty());
        assert!(!cache.contains(&key("k1")));
    }

    #[test]
    fn test_lru_eviction() {
        let cache = create_test_cache(2, 300);
        cache.set(key("k1"), outcome());
        cache.set(key("k2"), outcome());

        let _ = cache.get(&key("k1"));
        cache.set(key("k3"), outcome());

        assert!(cache.get(&key("k1")).is_some());
        assert!(cache.get(&key("k2")).is_none());
        assert!(cache.get(&key("k3")).is_some());
    }

    #[test]
    fn test_ttl_expiration() {
        let cache = TranslationCache::with_capacity(100, Duration::from_millis(50));
        cache.set(key("k"), outcome());
        assert!(cache.get(&key("k")).is_some());

        thread::sleep(Duration::from_millis(100));

        assert!(cache.get(&key("k")).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cleanup_and_stats() {
        let cache = TranslationCache::with_capacity(100, Duration::from_millis(50));
        cache.set(key("k1"), outcome());
        cache.set(key("k2"), outcome());

        let stats = cache.stats();
        assert_eq!(stats.valid_entries, 2);

        thread::sleep(Duration::from_millis(100));

        let stats = cache.stats();
        assert_eq!(stats.total_entries, 2);
        assert_eq!(stats.expired_entries, 2);
        assert_eq!(stats.valid_entries, 0);

        cache.cleanup_expired();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_min_capacity() {
        let cache = create_test_cache(0, 300);
        cache.set(key("k1"), outcome());
        cache.set(key("k2"), outcome());
        assert_eq!(cache.len(), 1);
        assert!(cache.get(&key("k2")).is_some());
    }

    #[test]
    fn test_concurrent_access() {
        let cache = Arc::new(create_test_cache(1000, 300));
        let handles: Vec<_> = (0..10)
            .map(|t| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..10 {
                        let entry_key = key(&format!("t{t}_{i}"));
                        cache.set(entry_key.clone(), outcome());
                        assert!(cache.get(&entry_key).is_some());
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().expect("Thread panicked");
        }
        assert_eq!(cache.len(), 100);
    }

    #[test]
    fn test_cache_key_trims_systems_only() {
        let key = CacheKey::new(" A ", " s ", " t ");
        assert_eq!(key.system, "s");
        assert_eq!(key.code, " A ");
        assert_eq!(key.target_system, "t");
    }

    #[test]
    fn test_cache_key_separator_in_parts_does_not_collide() {
        let cache = create_test_cache(100, 300);
        let a = CacheKey::new("X|T", "S", "T");
        let b = CacheKey::new("X", "S", "T|T");
        assert_ne!(a, b);

        cache.set(a.clone(), outcome());
        assert!(cache.contains(&a));
        assert!(!cache.contains(&b));
        assert!(cache.get(&b).is_none());
    }

    #[test]
    fn test_cache_debug() {
        let cache = create_test_cache(10, 300);
        let debug = format!("{:?}", cache);
        assert!(debug.contains("TranslationCache"));
        assert!(debug.contains("entries"));
    }
}
