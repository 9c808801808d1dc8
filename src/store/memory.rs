use super::client::StoreClient;
use super::glob::GlobMatcher;
use crate::error::{Error, Result};

use async_trait::async_trait;
use dashmap::DashMap;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use std::ops::Bound;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::time::{Duration, Instant};

const WRONGTYPE: &str = "WRONGTYPE Operation against a key holding the wrong kind of value";

/// In-process store with Redis semantics.
///
/// One keyspace shared by strings, hashes and ordered sets. Expired entries are
/// evicted lazily, the first time they are touched after their deadline. Each
/// command runs under the `DashMap` shard lock of its key, so single-key
/// commands are atomic with respect to each other.
///
/// Rank lookups walk the ordered set and are O(n); the Redis backend answers
/// them in O(log n).
pub struct MemoryStore {
    data: DashMap<String, StoredEntry>,
    offline: AtomicBool,
}

#[derive(Debug, Clone)]
struct StoredEntry {
    value: Value,
    expires_at: Option<Instant>,
}

impl StoredEntry {
    fn persistent(value: Value) -> Self {
        Self {
            value,
            expires_at: None,
        }
    }

    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|deadline| deadline <= now)
    }

    fn is_empty_container(&self) -> bool {
        match &self.value {
            Value::Str(_) => false,
            Value::Hash(fields) => fields.is_empty(),
            Value::Sorted(set) => set.scores.is_empty(),
        }
    }
}

#[derive(Debug, Clone)]
enum Value {
    Str(String),
    Hash(HashMap<String, String>),
    Sorted(SortedSet),
}

#[derive(Debug, Clone)]
struct ScoredMember {
    score: f64,
    member: String,
}

impl ScoredMember {
    fn new(score: f64, member: &str) -> Self {
        Self {
            score,
            member: member.to_string(),
        }
    }
}

impl PartialEq for ScoredMember {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScoredMember {}

impl PartialOrd for ScoredMember {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScoredMember {
    // Ascending by score, then by member bytes, exactly like a Redis sorted set.
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| self.member.cmp(&other.member))
    }
}

#[derive(Debug, Clone, Default)]
struct SortedSet {
    scores: HashMap<String, f64>,
    order: BTreeSet<ScoredMember>,
}

impl SortedSet {
    fn upsert(&mut self, member: &str, score: f64) -> bool {
        let added = match self.scores.insert(member.to_string(), score) {
            Some(old) => {
                self.order.remove(&ScoredMember::new(old, member));
                false
            }
            None => true,
        };
        self.order.insert(ScoredMember::new(score, member));
        added
    }

    fn remove(&mut self, member: &str) -> bool {
        match self.scores.remove(member) {
            Some(score) => {
                self.order.remove(&ScoredMember::new(score, member));
                true
            }
            None => false,
        }
    }

    fn rank_desc(&self, member: &str) -> Option<u64> {
        let score = *self.scores.get(member)?;
        let pivot = ScoredMember::new(score, member);
        let above = self
            .order
            .range((Bound::Excluded(&pivot), Bound::Unbounded))
            .count();
        Some(above as u64)
    }

    fn range_desc(&self, start: usize, count: Option<usize>) -> Vec<(String, f64)> {
        self.order
            .iter()
            .rev()
            .skip(start)
            .take(count.unwrap_or(usize::MAX))
            .map(|entry| (entry.member.clone(), entry.score))
            .collect()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            data: DashMap::new(),
            offline: AtomicBool::new(false),
        }
    }

    /// While offline every command fails with `StoreUnavailable`, the way a
    /// dropped connection to a remote store would.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, AtomicOrdering::SeqCst);
    }

    /// Number of live (non-expired) keys.
    pub fn key_count(&self) -> usize {
        let now = Instant::now();
        self.data
            .iter()
            .filter(|entry| !entry.value().is_expired(now))
            .count()
    }

    fn check_online(&self) -> Result<()> {
        if self.offline.load(AtomicOrdering::SeqCst) {
            return Err(Error::unavailable("connection refused (memory store offline)"));
        }
        Ok(())
    }

    fn purge_expired(&self, key: &str) {
        let now = Instant::now();
        self.data.remove_if(key, |_, entry| entry.is_expired(now));
    }

    fn drop_if_empty(&self, key: &str) {
        self.data.remove_if(key, |_, entry| entry.is_empty_container());
    }

    /// Runs `f` against the live value stored at `key`, if any.
    fn read<T>(&self, key: &str, f: impl FnOnce(&Value) -> Result<T>) -> Result<Option<T>> {
        self.check_online()?;
        self.purge_expired(key);
        match self.data.get(key) {
            Some(entry) => f(&entry.value).map(Some),
            None => Ok(None),
        }
    }

    /// Runs `f` against the value stored at `key`, creating it with `init` first
    /// when the key is absent.
    fn write<T>(
        &self,
        key: &str,
        init: impl FnOnce() -> Value,
        f: impl FnOnce(&mut Value) -> Result<T>,
    ) -> Result<T> {
        self.check_online()?;
        self.purge_expired(key);
        let mut entry = self
            .data
            .entry(key.to_string())
            .or_insert_with(|| StoredEntry::persistent(init()));
        f(&mut entry.value)
    }

    /// Like `write`, but never creates the key. Empty containers left behind
    /// are removed, matching Redis.
    fn update_existing<T>(
        &self,
        key: &str,
        f: impl FnOnce(&mut Value) -> Result<T>,
    ) -> Result<Option<T>> {
        self.check_online()?;
        self.purge_expired(key);
        let result = match self.data.get_mut(key) {
            Some(mut entry) => f(&mut entry.value).map(Some),
            None => Ok(None),
        };
        self.drop_if_empty(key);
        result
    }

    fn read_sorted<T>(&self, key: &str, f: impl FnOnce(&SortedSet) -> T) -> Result<Option<T>> {
        self.read(key, |value| match value {
            Value::Sorted(set) => Ok(f(set)),
            _ => Err(Error::unavailable(WRONGTYPE)),
        })
    }

    fn read_hash<T>(
        &self,
        key: &str,
        f: impl FnOnce(&HashMap<String, String>) -> T,
    ) -> Result<Option<T>> {
        self.read(key, |value| match value {
            Value::Hash(fields) => Ok(f(fields)),
            _ => Err(Error::unavailable(WRONGTYPE)),
        })
    }

    fn write_hash<T>(
        &self,
        key: &str,
        f: impl FnOnce(&mut HashMap<String, String>) -> T,
    ) -> Result<T> {
        self.write(
            key,
            || Value::Hash(HashMap::new()),
            |value| match value {
                Value::Hash(fields) => Ok(f(fields)),
                _ => Err(Error::unavailable(WRONGTYPE)),
            },
        )
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StoreClient for MemoryStore {
    async fn upsert_score(&self, collection: &str, member: &str, score: f64) -> Result<bool> {
        if score.is_nan() {
            return Err(Error::unavailable("ERR value is not a valid float"));
        }
        // Redis does not distinguish -0 from 0.
        let score = if score == 0.0 { 0.0 } else { score };
        self.write(
            collection,
            || Value::Sorted(SortedSet::default()),
            |value| match value {
                Value::Sorted(set) => Ok(set.upsert(member, score)),
                _ => Err(Error::unavailable(WRONGTYPE)),
            },
        )
    }

    async fn remove_member(&self, collection: &str, member: &str) -> Result<bool> {
        let removed = self.update_existing(collection, |value| match value {
            Value::Sorted(set) => Ok(set.remove(member)),
            _ => Err(Error::unavailable(WRONGTYPE)),
        })?;
        Ok(removed.unwrap_or(false))
    }

    async fn get_rank(&self, collection: &str, member: &str) -> Result<Option<u64>> {
        Ok(self
            .read_sorted(collection, |set| set.rank_desc(member))?
            .flatten())
    }

    async fn get_score(&self, collection: &str, member: &str) -> Result<Option<f64>> {
        Ok(self
            .read_sorted(collection, |set| set.scores.get(member).copied())?
            .flatten())
    }

    async fn score_with_rank(&self, collection: &str, member: &str) -> Result<Option<(f64, u64)>> {
        // Both values come from one locked read of the set.
        Ok(self
            .read_sorted(collection, |set| {
                let score = *set.scores.get(member)?;
                set.rank_desc(member).map(|rank| (score, rank))
            })?
            .flatten())
    }

    async fn collection_size(&self, collection: &str) -> Result<u64> {
        Ok(self
            .read_sorted(collection, |set| set.scores.len() as u64)?
            .unwrap_or(0))
    }

    async fn range_by_rank_desc(
        &self,
        collection: &str,
        start: usize,
        count: Option<usize>,
    ) -> Result<Vec<(String, f64)>> {
        Ok(self
            .read_sorted(collection, |set| set.range_desc(start, count))?
            .unwrap_or_default())
    }

    async fn scan_keys(&self, pattern: &str) -> Result<Vec<String>> {
        self.check_online()?;
        let matcher = GlobMatcher::new(pattern)?;
        let now = Instant::now();
        let mut keys: Vec<String> = self
            .data
            .iter()
            .filter(|entry| !entry.value().is_expired(now) && matcher.is_match(entry.key()))
            .map(|entry| entry.key().clone())
            .collect();
        keys.sort();
        Ok(keys)
    }

    async fn delete_keys(&self, keys: &[String]) -> Result<u64> {
        self.check_online()?;
        let now = Instant::now();
        let mut removed = 0;
        for key in keys {
            if let Some((_, entry)) = self.data.remove(key)
                && !entry.is_expired(now)
            {
                removed += 1;
            }
        }
        Ok(removed)
    }

    async fn delete_key(&self, key: &str) -> Result<bool> {
        Ok(self.delete_keys(&[key.to_string()]).await? == 1)
    }

    async fn key_exists(&self, key: &str) -> Result<bool> {
        Ok(self.read(key, |_| Ok(()))?.is_some())
    }

    async fn set_string(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()> {
        self.check_online()?;
        self.data.insert(
            key.to_string(),
            StoredEntry {
                value: Value::Str(value.to_string()),
                expires_at: ttl.map(|ttl| Instant::now() + ttl),
            },
        );
        Ok(())
    }

    async fn get_string(&self, key: &str) -> Result<Option<String>> {
        self.read(key, |value| match value {
            Value::Str(s) => Ok(s.clone()),
            _ => Err(Error::unavailable(WRONGTYPE)),
        })
    }

    async fn hash_set(&self, key: &str, field: &str, value: &str) -> Result<bool> {
        self.write_hash(key, |fields| {
            fields
                .insert(field.to_string(), value.to_string())
                .is_none()
        })
    }

    async fn hash_set_multiple(&self, key: &str, entries: &HashMap<String, String>) -> Result<()> {
        if entries.is_empty() {
            return Ok(());
        }
        self.write_hash(key, |fields| {
            for (field, value) in entries {
                fields.insert(field.clone(), value.clone());
            }
        })
    }

    async fn hash_get(&self, key: &str, field: &str) -> Result<Option<String>> {
        Ok(self
            .read_hash(key, |fields| fields.get(field).cloned())?
            .flatten())
    }

    async fn hash_get_all(&self, key: &str) -> Result<HashMap<String, String>> {
        Ok(self.read_hash(key, |fields| fields.clone())?.unwrap_or_default())
    }

    async fn hash_delete(&self, key: &str, field: &str) -> Result<bool> {
        let removed = self.update_existing(key, |value| match value {
            Value::Hash(fields) => Ok(fields.remove(field).is_some()),
            _ => Err(Error::unavailable(WRONGTYPE)),
        })?;
        Ok(removed.unwrap_or(false))
    }

    async fn hash_len(&self, key: &str) -> Result<u64> {
        Ok(self
            .read_hash(key, |fields| fields.len() as u64)?
            .unwrap_or(0))
    }

    async fn hash_exists(&self, key: &str, field: &str) -> Result<bool> {
        Ok(self
            .read_hash(key, |fields| fields.contains_key(field))?
            .unwrap_or(false))
    }
}
