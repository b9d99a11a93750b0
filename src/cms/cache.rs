use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Entries kept before the oldest is evicted.
const DEFAULT_CAPACITY: usize = 512;

/// In-memory response cache keyed by API path.
/// Each entry carries its own revalidation window; stale entries are dropped on
/// read. At capacity, expired entries go first, then the oldest one.
pub struct ResponseCache {
    entries: Mutex<HashMap<String, CachedResponse>>,
    capacity: usize,
}

struct CachedResponse {
    stored_at: Instant,
    ttl: Duration,
    value: Value,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        ResponseCache {
            entries: Mutex::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.get_at(key, Instant::now())
    }

    pub fn put(&self, key: &str, value: Value, ttl: Duration) {
        self.put_at(key, value, ttl, Instant::now());
    }

    pub(crate) fn get_at(&self, key: &str, now: Instant) -> Option<Value> {
        let mut map = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let fresh = match map.get(key) {
            Some(entry) => now.saturating_duration_since(entry.stored_at) < entry.ttl,
            None => return None,
        };
        if fresh {
            map.get(key).map(|entry| entry.value.clone())
        } else {
            map.remove(key);
            None
        }
    }

    pub(crate) fn put_at(&self, key: &str, value: Value, ttl: Duration, now: Instant) {
        let mut map = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        if !map.contains_key(key) && map.len() >= self.capacity {
            map.retain(|_, entry| now.saturating_duration_since(entry.stored_at) < entry.ttl);
            if map.len() >= self.capacity {
                let oldest = map
                    .iter()
                    .min_by_key(|(_, entry)| entry.stored_at)
                    .map(|(k, _)| k.clone());
                if let Some(oldest) = oldest {
                    log::debug!("CMS cache full, evicting {}", oldest);
                    map.remove(&oldest);
                }
            }
        }
        map.insert(
            key.to_string(),
            CachedResponse {
                stored_at: now,
                ttl,
                value,
            },
        );
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}
