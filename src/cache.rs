// In-memory cache for backend query responses
// Mirrors the query-key caching the frontend relies on: reads are cached per
// endpoint + parameters, writes invalidate the affected keys.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use dashmap::DashMap;
use parking_lot::RwLock;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub max_size_bytes: usize,
    pub default_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_size_bytes: 4 * 1024 * 1024,
            default_ttl: Duration::from_secs(300),
        }
    }
}

#[derive(Debug, Default)]
struct CacheStats {
    hits: AtomicUsize,
    misses: AtomicUsize,
    insertions: AtomicUsize,
    evictions: AtomicUsize,
    expirations: AtomicUsize,
    rejections: AtomicUsize,
}

/// Point-in-time snapshot of the cache counters.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CacheStatsReport {
    pub hits: usize,
    pub misses: usize,
    pub insertions: usize,
    pub evictions: usize,
    pub expirations: usize,
    pub rejections: usize,
    pub entries: usize,
    pub size_bytes: usize,
}

struct CacheEntry {
    body: String,
    inserted_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        self.inserted_at.elapsed() > self.ttl
    }
}

/// Builds the cache key for one backend query, e.g.
/// `query_key("reviews", &["42"])` -> `"reviews:42"`.
pub fn query_key(endpoint: &str, params: &[&str]) -> String {
    if params.is_empty() {
        return endpoint.to_string();
    }
    format!("{}:{}", endpoint, params.join(":"))
}

/// TTL-bounded response cache keyed by query key. Thread-safe; reads and
/// writes on different keys do not contend.
pub struct ResponseCache {
    entries: DashMap<String, CacheEntry>,
    config: RwLock<CacheConfig>,
    size_bytes: AtomicUsize,
    stats: CacheStats,
}

impl ResponseCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: DashMap::new(),
            config: RwLock::new(config),
            size_bytes: AtomicUsize::new(0),
            stats: CacheStats::default(),
        }
    }

    /// Stores a response body under the key. Returns false when the body
    /// alone exceeds the capacity; otherwise evicts oldest entries until the
    /// body fits.
    pub fn insert(&self, key: &str, body: String, ttl: Option<Duration>) -> bool {
        let (max_size_bytes, default_ttl) = {
            let config = self.config.read();
            (config.max_size_bytes, config.default_ttl)
        };

        let item_size = entry_size(key, &body);
        if item_size > max_size_bytes {
            debug!(key, item_size, "rejecting oversized cache entry");
            self.stats.rejections.fetch_add(1, Ordering::Relaxed);
            return false;
        }

        while self.size_bytes.load(Ordering::Relaxed) + item_size > max_size_bytes {
            if !self.evict_oldest() {
                break;
            }
        }

        let entry = CacheEntry {
            body,
            inserted_at: Instant::now(),
            ttl: ttl.unwrap_or(default_ttl),
        };
        if let Some(previous) = self.entries.insert(key.to_string(), entry) {
            self.size_bytes
                .fetch_sub(entry_size(key, &previous.body), Ordering::Relaxed);
        }
        self.size_bytes.fetch_add(item_size, Ordering::Relaxed);
        self.stats.insertions.fetch_add(1, Ordering::Relaxed);
        true
    }

    /// Returns the cached body when present and not expired. Expired entries
    /// are removed on access.
    pub fn get(&self, key: &str) -> Option<String> {
        let expired = match self.entries.get(key) {
            Some(entry) => {
                if entry.is_expired() {
                    true
                } else {
                    self.stats.hits.fetch_add(1, Ordering::Relaxed);
                    return Some(entry.body.clone());
                }
            }
            None => {
                self.stats.misses.fetch_add(1, Ordering::Relaxed);
                return None;
            }
        };
        if expired {
            self.remove_entry(key, true);
            self.stats.misses.fetch_add(1, Ordering::Relaxed);
        }
        None
    }

    /// Drops every entry whose key starts with the prefix. Returns the number
    /// of entries removed. Used after writes, e.g. a new review drops the
    /// cached review list for that package.
    pub fn invalidate_prefix(&self, prefix: &str) -> usize {
        let matching: Vec<String> = self
            .entries
            .iter()
            .filter(|entry| entry.key().starts_with(prefix))
            .map(|entry| entry.key().clone())
            .collect();

        let count = matching.len();
        for key in matching {
            self.remove_entry(&key, false);
        }
        if count > 0 {
            debug!(prefix, count, "invalidated cache entries");
        }
        count
    }

    pub fn set_default_ttl(&self, ttl: Duration) {
        self.config.write().default_ttl = ttl;
    }

    /// Shrinks or grows the capacity, evicting oldest entries when the cache
    /// no longer fits.
    pub fn resize(&self, max_size_bytes: usize) {
        self.config.write().max_size_bytes = max_size_bytes;
        while self.size_bytes.load(Ordering::Relaxed) > max_size_bytes {
            if !self.evict_oldest() {
                break;
            }
        }
    }

    pub fn stats(&self) -> CacheStatsReport {
        CacheStatsReport {
            hits: self.stats.hits.load(Ordering::Relaxed),
            misses: self.stats.misses.load(Ordering::Relaxed),
            insertions: self.stats.insertions.load(Ordering::Relaxed),
            evictions: self.stats.evictions.load(Ordering::Relaxed),
            expirations: self.stats.expirations.load(Ordering::Relaxed),
            rejections: self.stats.rejections.load(Ordering::Relaxed),
            entries: self.entries.len(),
            size_bytes: self.size_bytes.load(Ordering::Relaxed),
        }
    }

    fn evict_oldest(&self) -> bool {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|entry| entry.value().inserted_at)
            .map(|entry| entry.key().clone());

        match oldest {
            Some(key) => {
                debug!(key = key.as_str(), "evicting oldest cache entry");
                self.remove_entry(&key, false);
                true
            }
            None => false,
        }
    }

    fn remove_entry(&self, key: &str, expired: bool) {
        if let Some((removed_key, removed)) = self.entries.remove(key) {
            self.size_bytes
                .fetch_sub(entry_size(&removed_key, &removed.body), Ordering::Relaxed);
            if expired {
                self.stats.expirations.fetch_add(1, Ordering::Relaxed);
            } else {
                self.stats.evictions.fetch_add(1, Ordering::Relaxed);
            }
        }
    }
}

fn entry_size(key: &str, body: &str) -> usize {
    key.len() + body.len() + std::mem::size_of::<CacheEntry>()
}
