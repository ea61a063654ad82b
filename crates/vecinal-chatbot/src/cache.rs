//! Bounded reply cache for the completion gateway.
//!
//! Keys are digests of the normalized question plus the requesting user's
//! id when authenticated, so anonymous and per-user answers never
//! collide. Entries expire after a TTL, checked at lookup time; when the
//! cache exceeds capacity the single oldest-inserted entry is evicted.
//! Lookups use a non-promoting peek, so eviction order stays insertion
//! order. Time enters through method parameters so tests can drive a
//! synthetic clock.

use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use lru::LruCache;
use sha2::{Digest, Sha256};
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

struct CacheEntry {
    answer: String,
    stored_at: Instant,
}

/// TTL + capacity bounded answer cache, safe under concurrent requests.
pub struct ReplyCache {
    ttl: Duration,
    entries: Mutex<LruCache<String, CacheEntry>>,
}

impl ReplyCache {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            ttl,
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Cache key for a normalized question and optional user identity.
    pub fn key(normalized_question: &str, user_id: Option<Uuid>) -> String {
        let mut hasher = Sha256::new();
        hasher.update(normalized_question.as_bytes());
        if let Some(id) = user_id {
            hasher.update(b":");
            hasher.update(id.as_bytes());
        }
        let hash = hex::encode(hasher.finalize());
        format!("chatbot:{}", &hash[..16])
    }

    /// Look up a cached answer. Expired entries are removed on the spot.
    pub async fn get(&self, key: &str, now: Instant) -> Option<String> {
        let mut entries = self.entries.lock().await;

        match entries.peek(key) {
            Some(entry) if now.saturating_duration_since(entry.stored_at) > self.ttl => {
                entries.pop(key);
                debug!(cache = "miss", key, "cache entry expired");
                None
            }
            Some(entry) => {
                debug!(cache = "hit", key, "cache hit");
                Some(entry.answer.clone())
            }
            None => {
                debug!(cache = "miss", key, "cache miss");
                None
            }
        }
    }

    /// Store a successful answer. Evicts the oldest entry when full.
    pub async fn insert(&self, key: String, answer: String, now: Instant) {
        let mut entries = self.entries.lock().await;
        entries.put(
            key,
            CacheEntry {
                answer,
                stored_at: now,
            },
        );
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(300);

    #[test]
    fn keys_separate_anonymous_and_per_user_answers() {
        let user_a = Uuid::new_v4();
        let user_b = Uuid::new_v4();

        let anonymous = ReplyCache::key("¿cuál es la capital de francia?", None);
        let for_a = ReplyCache::key("¿cuál es la capital de francia?", Some(user_a));
        let for_b = ReplyCache::key("¿cuál es la capital de francia?", Some(user_b));

        assert_ne!(anonymous, for_a);
        assert_ne!(for_a, for_b);

        // Deterministic for the same inputs.
        assert_eq!(
            anonymous,
            ReplyCache::key("¿cuál es la capital de francia?", None)
        );
        assert!(anonymous.starts_with("chatbot:"));
    }

    #[test]
    fn keys_differ_per_question() {
        let a = ReplyCache::key("pregunta una", None);
        let b = ReplyCache::key("pregunta dos", None);
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn hit_within_ttl_returns_stored_answer() {
        let cache = ReplyCache::new(TTL, 8);
        let t0 = Instant::now();

        cache.insert("k".to_string(), "respuesta".to_string(), t0).await;
        assert_eq!(cache.get("k", t0).await.as_deref(), Some("respuesta"));
    }

    #[tokio::test]
    async fn ttl_boundary_hit_just_before_miss_just_after() {
        let cache = ReplyCache::new(TTL, 8);
        let t0 = Instant::now();
        cache.insert("k".to_string(), "respuesta".to_string(), t0).await;

        let just_before = t0 + TTL - Duration::from_millis(1);
        assert!(cache.get("k", just_before).await.is_some());

        let just_after = t0 + TTL + Duration::from_millis(1);
        assert!(cache.get("k", just_after).await.is_none());
        // The expired entry was evicted, not just hidden.
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn capacity_overflow_evicts_exactly_the_oldest_entry() {
        let cache = ReplyCache::new(TTL, 3);
        let t0 = Instant::now();

        for (i, key) in ["a", "b", "c", "d"].iter().enumerate() {
            let at = t0 + Duration::from_secs(i as u64);
            cache.insert(key.to_string(), format!("answer-{key}"), at).await;
        }

        assert_eq!(cache.len().await, 3);
        assert!(cache.get("a", t0).await.is_none(), "oldest must be evicted");
        assert!(cache.get("b", t0 + Duration::from_secs(3)).await.is_some());
        assert!(cache.get("c", t0 + Duration::from_secs(3)).await.is_some());
        assert!(cache.get("d", t0 + Duration::from_secs(3)).await.is_some());
    }

    #[tokio::test]
    async fn lookups_do_not_promote_entries() {
        let cache = ReplyCache::new(TTL, 3);
        let t0 = Instant::now();

        for key in ["a", "b", "c"] {
            cache.insert(key.to_string(), key.to_string(), t0).await;
        }

        // Touch the oldest entry, then overflow. Insertion order must
        // still decide eviction, so "a" goes despite the recent lookup.
        assert!(cache.get("a", t0).await.is_some());
        cache.insert("d".to_string(), "d".to_string(), t0).await;

        assert!(cache.get("a", t0).await.is_none());
        assert!(cache.get("b", t0).await.is_some());
    }

    #[tokio::test]
    async fn reinserting_a_key_makes_it_newest() {
        let cache = ReplyCache::new(TTL, 3);
        let t0 = Instant::now();

        for key in ["a", "b", "c"] {
            cache.insert(key.to_string(), key.to_string(), t0).await;
        }
        cache.insert("a".to_string(), "a2".to_string(), t0).await;
        cache.insert("d".to_string(), "d".to_string(), t0).await;

        // "b" became the oldest once "a" was re-inserted.
        assert!(cache.get("b", t0).await.is_none());
        assert_eq!(cache.get("a", t0).await.as_deref(), Some("a2"));
    }

    #[tokio::test]
    async fn zero_capacity_clamps_to_one_entry() {
        let cache = ReplyCache::new(TTL, 0);
        let t0 = Instant::now();
        cache.insert("a".to_string(), "a".to_string(), t0).await;
        assert_eq!(cache.len().await, 1);
    }
}
