use moka::future::Cache;
use std::time::Duration;

/// In-memory memoization cache backed by moka.
///
/// Bounded capacity with TTL eviction; values are cloned out on hit.
/// Keys are canonical request strings built by the caller.
pub struct MemoryCache<V: Clone + Send + Sync + 'static> {
    inner: Cache<String, V>,
}

impl<V: Clone + Send + Sync + 'static> MemoryCache<V> {
    pub fn new(max_capacity: u64, ttl: Duration) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    pub async fn get(&self, key: &str) -> Option<V> {
        self.inner.get(key).await
    }

    pub async fn insert(&self, key: String, value: V) {
        self.inner.insert(key, value).await;
    }

    pub async fn invalidate(&self, key: &str) {
        self.inner.invalidate(key).await;
    }

    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_and_get() {
        let cache = MemoryCache::new(100, Duration::from_secs(60));
        cache.insert("key1".to_string(), "value1".to_string()).await;

        let result = cache.get("key1").await;
        assert_eq!(result, Some("value1".to_string()));
    }

    #[tokio::test]
    async fn get_missing() {
        let cache: MemoryCache<String> = MemoryCache::new(100, Duration::from_secs(60));
        let result = cache.get("nonexistent").await;
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn invalidate() {
        let cache = MemoryCache::new(100, Duration::from_secs(60));
        cache.insert("key1".to_string(), "value1".to_string()).await;
        cache.invalidate("key1").await;

        let result = cache.get("key1").await;
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn ttl_expiration() {
        let cache = MemoryCache::new(100, Duration::from_millis(50));
        cache.insert("key1".to_string(), "value1".to_string()).await;

        // Should exist immediately
        assert!(cache.get("key1").await.is_some());

        // Wait for TTL
        tokio::time::sleep(Duration::from_millis(100)).await;

        // Should be expired
        assert!(cache.get("key1").await.is_none());
    }

    #[tokio::test]
    async fn non_string_values() {
        let cache: MemoryCache<Vec<u64>> = MemoryCache::new(10, Duration::from_secs(60));
        cache.insert("series".to_string(), vec![1, 2, 3]).await;
        assert_eq!(cache.get("series").await, Some(vec![1, 2, 3]));
    }
}
