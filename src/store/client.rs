use crate::error::Result;

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

/// Contract of the backing key-value/score store.
///
/// Every method is a network round trip on a real backend and must be treated
/// as a suspension point. Every failure (connectivity, timeout, remote error)
/// is reported as `Error::StoreUnavailable`.
#[async_trait]
pub trait StoreClient: Send + Sync + 'static {
    // --- Ordered collections ---

    /// Inserts or replaces `member`'s score. Returns `true` if the member was new.
    async fn upsert_score(&self, collection: &str, member: &str, score: f64) -> Result<bool>;

    /// Removes `member`. Returns `true` if it was present.
    async fn remove_member(&self, collection: &str, member: &str) -> Result<bool>;

    /// 0-based position of `member` when ordered by descending score.
    async fn get_rank(&self, collection: &str, member: &str) -> Result<Option<u64>>;

    async fn get_score(&self, collection: &str, member: &str) -> Result<Option<f64>>;

    /// Score and 0-based descending rank of `member`.
    ///
    /// The default issues two separate reads; backends that can answer both
    /// in one atomic step override it.
    async fn score_with_rank(&self, collection: &str, member: &str) -> Result<Option<(f64, u64)>> {
        let Some(score) = self.get_score(collection, member).await? else {
            return Ok(None);
        };
        Ok(self
            .get_rank(collection, member)
            .await?
            .map(|rank| (score, rank)))
    }

    async fn collection_size(&self, collection: &str) -> Result<u64>;

    /// Members ordered by descending score, starting at 0-based `start`.
    /// `count == None` reads to the end of the collection.
    async fn range_by_rank_desc(
        &self,
        collection: &str,
        start: usize,
        count: Option<usize>,
    ) -> Result<Vec<(String, f64)>>;

    // --- Keyspace ---

    /// All key names matching the store's native glob `pattern`.
    async fn scan_keys(&self, pattern: &str) -> Result<Vec<String>>;

    /// Deletes `keys` in one batch. Returns how many actually existed.
    async fn delete_keys(&self, keys: &[String]) -> Result<u64>;

    async fn delete_key(&self, key: &str) -> Result<bool>;

    async fn key_exists(&self, key: &str) -> Result<bool>;

    // --- Strings ---

    async fn set_string(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()>;

    async fn get_string(&self, key: &str) -> Result<Option<String>>;

    // --- Hashes ---

    /// Returns `true` if `field` was newly created.
    async fn hash_set(&self, key: &str, field: &str, value: &str) -> Result<bool>;

    async fn hash_set_multiple(&self, key: &str, entries: &HashMap<String, String>) -> Result<()>;

    async fn hash_get(&self, key: &str, field: &str) -> Result<Option<String>>;

    async fn hash_get_all(&self, key: &str) -> Result<HashMap<String, String>>;

    async fn hash_delete(&self, key: &str, field: &str) -> Result<bool>;

    async fn hash_len(&self, key: &str) -> Result<u64>;

    async fn hash_exists(&self, key: &str, field: &str) -> Result<bool>;
}
