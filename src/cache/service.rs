use super::codec::{Codec, JsonCodec};
use crate::error::{Error, Result};
use crate::store::StoreClient;

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Direct single-key accessors: strings with optional TTL, codec-encoded
/// objects, and hash fields.
pub struct CacheService<C: Codec = JsonCodec> {
    store: Arc<dyn StoreClient>,
    codec: C,
}

impl CacheService<JsonCodec> {
    pub fn new(store: Arc<dyn StoreClient>) -> Self {
        Self::with_codec(store, JsonCodec)
    }
}

impl<C: Codec> CacheService<C> {
    pub fn with_codec(store: Arc<dyn StoreClient>, codec: C) -> Self {
        Self { store, codec }
    }

    // -------------------- STRING --------------------

    pub async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()> {
        validate_key(key)?;
        validate_ttl(ttl)?;
        self.store.set_string(key, value, ttl).await?;
        tracing::debug!("SET '{}' (ttl {:?})", key, ttl);
        Ok(())
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        self.store.get_string(key).await
    }

    // -------------------- OBJECT --------------------

    pub async fn set_object<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl: Option<Duration>,
    ) -> Result<()> {
        validate_key(key)?;
        validate_ttl(ttl)?;
        let encoded = self.codec.encode(value)?;
        self.store.set_string(key, &encoded, ttl).await?;
        tracing::debug!("SET object '{}' ({} bytes, ttl {:?})", key, encoded.len(), ttl);
        Ok(())
    }

    pub async fn get_object<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        validate_key(key)?;
        match self.store.get_string(key).await? {
            Some(raw) => self.codec.decode(&raw).map(Some),
            None => Ok(None),
        }
    }

    // -------------------- DELETE --------------------

    pub async fn delete(&self, key: &str) -> Result<bool> {
        validate_key(key)?;
        let deleted = self.store.delete_key(key).await?;
        if deleted {
            tracing::info!("Deleted key '{}'", key);
        }
        Ok(deleted)
    }

    pub async fn exists(&self, key: &str) -> Result<bool> {
        validate_key(key)?;
        self.store.key_exists(key).await
    }

    // -------------------- HASH --------------------

    /// Returns `true` when `field` did not exist before.
    pub async fn hash_set(&self, key: &str, field: &str, value: &str) -> Result<bool> {
        validate_key(key)?;
        self.store.hash_set(key, field, value).await
    }

    pub async fn hash_set_multiple(&self, key: &str, values: &HashMap<String, String>) -> Result<()> {
        validate_key(key)?;
        self.store.hash_set_multiple(key, values).await
    }

    pub async fn hash_get(&self, key: &str, field: &str) -> Result<Option<String>> {
        validate_key(key)?;
        self.store.hash_get(key, field).await
    }

    pub async fn hash_get_all(&self, key: &str) -> Result<HashMap<String, String>> {
        validate_key(key)?;
        self.store.hash_get_all(key).await
    }

    pub async fn hash_delete_field(&self, key: &str, field: &str) -> Result<bool> {
        validate_key(key)?;
        self.store.hash_delete(key, field).await
    }

    pub async fn hash_len(&self, key: &str) -> Result<u64> {
        validate_key(key)?;
        self.store.hash_len(key).await
    }

    pub async fn hash_field_exists(&self, key: &str, field: &str) -> Result<bool> {
        validate_key(key)?;
        self.store.hash_exists(key, field).await
    }
}

fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(Error::invalid("key must not be empty"));
    }
    Ok(())
}

fn validate_ttl(ttl: Option<Duration>) -> Result<()> {
    if ttl.is_some_and(|ttl| ttl.is_zero()) {
        return Err(Error::invalid("ttl must be greater than zero"));
    }
    Ok(())
}
