use super::client::StoreClient;
use crate::error::{Error, Result};

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{Cmd, FromRedisValue};
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

/// Store client backed by a Redis server.
///
/// Holds one multiplexed `ConnectionManager`, which reconnects on its own after
/// a dropped connection. Commands are never retried here: each call is bounded
/// by `call_timeout` and any failure is reported as `StoreUnavailable`.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
    call_timeout: Duration,
    scan_count: usize,
}

impl RedisStore {
    pub async fn connect(url: &str, call_timeout: Duration, scan_count: usize) -> Result<Self> {
        let client = redis::Client::open(url)?;
        let conn = tokio::time::timeout(call_timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| Error::unavailable(format!("timed out connecting to {}", url)))??;

        tracing::info!("Connected to Redis at {}", url);

        Ok(Self {
            conn,
            call_timeout,
            scan_count: scan_count.max(1),
        })
    }

    async fn run<T, F>(&self, op: &'static str, fut: F) -> Result<T>
    where
        F: Future<Output = redis::RedisResult<T>>,
    {
        match tokio::time::timeout(self.call_timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                tracing::debug!("Redis {} failed: {}", op, e);
                Err(e.into())
            }
            Err(_) => {
                tracing::debug!("Redis {} timed out after {:?}", op, self.call_timeout);
                Err(Error::unavailable(format!(
                    "{} timed out after {:?}",
                    op, self.call_timeout
                )))
            }
        }
    }

    async fn query<T: FromRedisValue>(&self, op: &'static str, cmd: Cmd) -> Result<T> {
        let mut conn = self.conn.clone();
        self.run(op, async move { cmd.query_async(&mut conn).await })
            .await
    }
}

#[async_trait]
impl StoreClient for RedisStore {
    async fn upsert_score(&self, collection: &str, member: &str, score: f64) -> Result<bool> {
        let mut cmd = redis::cmd("ZADD");
        cmd.arg(collection).arg(score).arg(member);
        let added: u64 = self.query("ZADD", cmd).await?;
        Ok(added == 1)
    }

    async fn remove_member(&self, collection: &str, member: &str) -> Result<bool> {
        let mut cmd = redis::cmd("ZREM");
        cmd.arg(collection).arg(member);
        let removed: u64 = self.query("ZREM", cmd).await?;
        Ok(removed == 1)
    }

    async fn get_rank(&self, collection: &str, member: &str) -> Result<Option<u64>> {
        let mut cmd = redis::cmd("ZREVRANK");
        cmd.arg(collection).arg(member);
        self.query("ZREVRANK", cmd).await
    }

    async fn get_score(&self, collection: &str, member: &str) -> Result<Option<f64>> {
        let mut cmd = redis::cmd("ZSCORE");
        cmd.arg(collection).arg(member);
        self.query("ZSCORE", cmd).await
    }

    async fn score_with_rank(&self, collection: &str, member: &str) -> Result<Option<(f64, u64)>> {
        let mut pipe = redis::pipe();
        pipe.atomic()
            .cmd("ZSCORE")
            .arg(collection)
            .arg(member)
            .cmd("ZREVRANK")
            .arg(collection)
            .arg(member);

        let mut conn = self.conn.clone();
        let (score, rank): (Option<f64>, Option<u64>) = self
            .run("ZSCORE/ZREVRANK", async move { pipe.query_async(&mut conn).await })
            .await?;

        Ok(score.zip(rank))
    }

    async fn collection_size(&self, collection: &str) -> Result<u64> {
        let mut cmd = redis::cmd("ZCARD");
        cmd.arg(collection);
        self.query("ZCARD", cmd).await
    }

    async fn range_by_rank_desc(
        &self,
        collection: &str,
        start: usize,
        count: Option<usize>,
    ) -> Result<Vec<(String, f64)>> {
        let stop: i64 = match count {
            Some(0) => return Ok(Vec::new()),
            Some(n) => (start + n - 1) as i64,
            None => -1,
        };

        let mut cmd = redis::cmd("ZREVRANGE");
        cmd.arg(collection)
            .arg(start as i64)
            .arg(stop)
            .arg("WITHSCORES");
        self.query("ZREVRANGE", cmd).await
    }

    async fn scan_keys(&self, pattern: &str) -> Result<Vec<String>> {
        let mut cursor: u64 = 0;
        let mut keys = Vec::new();
        let mut rounds = 0usize;

        loop {
            let mut cmd = redis::cmd("SCAN");
            cmd.arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(self.scan_count);
            let (next, batch): (u64, Vec<String>) = self.query("SCAN", cmd).await?;

            keys.extend(batch);
            rounds += 1;
            if next == 0 {
                break;
            }
            cursor = next;
        }

        // SCAN may report a key more than once across rounds.
        keys.sort();
        keys.dedup();

        tracing::debug!(
            "SCAN '{}' matched {} keys in {} rounds",
            pattern,
            keys.len(),
            rounds
        );
        Ok(keys)
    }

    async fn delete_keys(&self, keys: &[String]) -> Result<u64> {
        if keys.is_empty() {
            return Ok(0);
        }
        let mut cmd = redis::cmd("DEL");
        cmd.arg(keys);
        self.query("DEL", cmd).await
    }

    async fn delete_key(&self, key: &str) -> Result<bool> {
        let mut cmd = redis::cmd("DEL");
        cmd.arg(key);
        let removed: u64 = self.query("DEL", cmd).await?;
        Ok(removed == 1)
    }

    async fn key_exists(&self, key: &str) -> Result<bool> {
        let mut cmd = redis::cmd("EXISTS");
        cmd.arg(key);
        let found: u64 = self.query("EXISTS", cmd).await?;
        Ok(found == 1)
    }

    async fn set_string(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()> {
        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(value);
        if let Some(ttl) = ttl {
            cmd.arg("PX").arg((ttl.as_millis() as u64).max(1));
        }
        self.query("SET", cmd).await
    }

    async fn get_string(&self, key: &str) -> Result<Option<String>> {
        let mut cmd = redis::cmd("GET");
        cmd.arg(key);
        self.query("GET", cmd).await
    }

    async fn hash_set(&self, key: &str, field: &str, value: &str) -> Result<bool> {
        let mut cmd = redis::cmd("HSET");
        cmd.arg(key).arg(field).arg(value);
        let created: u64 = self.query("HSET", cmd).await?;
        Ok(created == 1)
    }

    async fn hash_set_multiple(&self, key: &str, entries: &HashMap<String, String>) -> Result<()> {
        if entries.is_empty() {
            return Ok(());
        }
        let mut cmd = redis::cmd("HSET");
        cmd.arg(key);
        for (field, value) in entries {
            cmd.arg(field).arg(value);
        }
        let _created: u64 = self.query("HSET", cmd).await?;
        Ok(())
    }

    async fn hash_get(&self, key: &str, field: &str) -> Result<Option<String>> {
        let mut cmd = redis::cmd("HGET");
        cmd.arg(key).arg(field);
        self.query("HGET", cmd).await
    }

    async fn hash_get_all(&self, key: &str) -> Result<HashMap<String, String>> {
        let mut cmd = redis::cmd("HGETALL");
        cmd.arg(key);
        self.query("HGETALL", cmd).await
    }

    async fn hash_delete(&self, key: &str, field: &str) -> Result<bool> {
        let mut cmd = redis::cmd("HDEL");
        cmd.arg(key).arg(field);
        let removed: u64 = self.query("HDEL", cmd).await?;
        Ok(removed == 1)
    }

    async fn hash_len(&self, key: &str) -> Result<u64> {
        let mut cmd = redis::cmd("HLEN");
        cmd.arg(key);
        self.query("HLEN", cmd).await
    }

    async fn hash_exists(&self, key: &str, field: &str) -> Result<bool> {
        let mut cmd = redis::cmd("HEXISTS");
        cmd.arg(key).arg(field);
        let found: u64 = self.query("HEXISTS", cmd).await?;
        Ok(found == 1)
    }
}
