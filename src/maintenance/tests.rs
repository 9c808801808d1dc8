//! Maintenance Module Tests
//!
//! Validates scan-then-delete behaviour, including keys that disappear
//! between the two phases.

#[cfg(test)]
mod tests {
    use crate::error::{Error, Result};
    use crate::maintenance::service::KeyMaintenance;
    use crate::store::client::StoreClient;
    use crate::store::memory::MemoryStore;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;

    /// Deletes `victim` right after every scan, the way a concurrent client
    /// would.
    struct RacingStore {
        inner: MemoryStore,
        victim: String,
    }

    #[async_trait]
    impl StoreClient for RacingStore {
        async fn upsert_score(&self, c: &str, m: &str, s: f64) -> Result<bool> {
            self.inner.upsert_score(c, m, s).await
        }
        async fn remove_member(&self, c: &str, m: &str) -> Result<bool> {
            self.inner.remove_member(c, m).await
        }
        async fn get_rank(&self, c: &str, m: &str) -> Result<Option<u64>> {
            self.inner.get_rank(c, m).await
        }
        async fn get_score(&self, c: &str, m: &str) -> Result<Option<f64>> {
            self.inner.get_score(c, m).await
        }
        async fn collection_size(&self, c: &str) -> Result<u64> {
            self.inner.collection_size(c).await
        }
        async fn range_by_rank_desc(
            &self,
            c: &str,
            start: usize,
            count: Option<usize>,
        ) -> Result<Vec<(String, f64)>> {
            self.inner.range_by_rank_desc(c, start, count).await
        }
        async fn scan_keys(&self, pattern: &str) -> Result<Vec<String>> {
            let keys = self.inner.scan_keys(pattern).await?;
            self.inner.delete_key(&self.victim).await?;
            Ok(keys)
        }
        async fn delete_keys(&self, keys: &[String]) -> Result<u64> {
            self.inner.delete_keys(keys).await
        }
        async fn delete_key(&self, key: &str) -> Result<bool> {
            self.inner.delete_key(key).await
        }
        async fn key_exists(&self, key: &str) -> Result<bool> {
            self.inner.key_exists(key).await
        }
        async fn set_string(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()> {
            self.inner.set_string(key, value, ttl).await
        }
        async fn get_string(&self, key: &str) -> Result<Option<String>> {
            self.inner.get_string(key).await
        }
        async fn hash_set(&self, key: &str, field: &str, value: &str) -> Result<bool> {
            self.inner.hash_set(key, field, value).await
        }
        async fn hash_set_multiple(
            &self,
            key: &str,
            entries: &HashMap<String, String>,
        ) -> Result<()> {
            self.inner.hash_set_multiple(key, entries).await
        }
        async fn hash_get(&self, key: &str, field: &str) -> Result<Option<String>> {
            self.inner.hash_get(key, field).await
        }
        async fn hash_get_all(&self, key: &str) -> Result<HashMap<String, String>> {
            self.inner.hash_get_all(key).await
        }
        async fn hash_delete(&self, key: &str, field: &str) -> Result<bool> {
            self.inner.hash_delete(key, field).await
        }
        async fn hash_len(&self, key: &str) -> Result<u64> {
            self.inner.hash_len(key).await
        }
        async fn hash_exists(&self, key: &str, field: &str) -> Result<bool> {
            self.inner.hash_exists(key, field).await
        }
    }

    async fn store_with(keys: &[&str]) -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::new());
        for key in keys {
            store.set_string(key, "v", None).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_delete_by_pattern_removes_only_matches() {
        // ARRANGE
        let store = store_with(&["user:1", "user:2", "order:1"]).await;
        let maintenance = KeyMaintenance::new(store.clone());

        // ACT
        let deleted = maintenance.delete_by_pattern("user:*").await.unwrap();

        // ASSERT
        assert_eq!(deleted, 2);
        assert!(!store.key_exists("user:1").await.unwrap());
        assert!(!store.key_exists("user:2").await.unwrap());
        assert!(store.key_exists("order:1").await.unwrap());
    }

    #[tokio::test]
    async fn test_no_match_returns_zero() {
        let store = store_with(&["user:1", "order:1"]).await;
        let maintenance = KeyMaintenance::new(store.clone());

        assert_eq!(maintenance.delete_by_pattern("nomatch:*").await.unwrap(), 0);
        assert_eq!(store.key_count(), 2);

        let empty = KeyMaintenance::new(Arc::new(MemoryStore::new()));
        assert_eq!(empty.delete_by_pattern("*").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_pattern_reaches_every_key_type() {
        let store = Arc::new(MemoryStore::new());
        store.set_string("tmp:a", "1", None).await.unwrap();
        store.hash_set("tmp:b", "f", "v").await.unwrap();
        store.upsert_score("tmp:c", "m", 1.0).await.unwrap();
        store.set_string("keep", "1", None).await.unwrap();

        let maintenance = KeyMaintenance::new(store.clone());

        assert_eq!(maintenance.delete_by_pattern("tmp:?").await.unwrap(), 3);
        assert_eq!(store.scan_keys("*").await.unwrap(), vec!["keep"]);
    }

    #[tokio::test]
    async fn test_keys_vanishing_after_scan_are_not_counted() {
        let inner = MemoryStore::new();
        for key in ["job:1", "job:2", "job:3"] {
            inner.set_string(key, "v", None).await.unwrap();
        }
        let store = Arc::new(RacingStore {
            inner,
            victim: "job:2".to_string(),
        });
        let maintenance = KeyMaintenance::new(store.clone());

        let deleted = maintenance.delete_by_pattern("job:*").await.unwrap();

        assert_eq!(deleted, 2);
        assert!(store.scan_keys("job:*").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_keys_batch() {
        let store = store_with(&["a", "b", "c"]).await;
        let maintenance = KeyMaintenance::new(store.clone());

        let deleted = maintenance
            .delete_keys(&["a".to_string(), "c".to_string(), "zzz".to_string()])
            .await
            .unwrap();

        assert_eq!(deleted, 2);
        assert_eq!(maintenance.delete_keys(&[]).await.unwrap(), 0);
        assert!(store.key_exists("b").await.unwrap());
    }

    #[tokio::test]
    async fn test_empty_pattern_is_invalid() {
        let store = store_with(&["a"]).await;
        let maintenance = KeyMaintenance::new(store.clone());

        assert!(matches!(
            maintenance.delete_by_pattern("").await,
            Err(Error::InvalidArgument(_))
        ));
        assert_eq!(store.key_count(), 1);
    }

    #[tokio::test]
    async fn test_store_outage_propagates() {
        let store = store_with(&["user:1"]).await;
        let maintenance = KeyMaintenance::new(store.clone());

        store.set_offline(true);

        assert!(matches!(
            maintenance.delete_by_pattern("user:*").await,
            Err(Error::StoreUnavailable(_))
        ));

        store.set_offline(false);
        assert!(store.key_exists("user:1").await.unwrap());
    }
}
