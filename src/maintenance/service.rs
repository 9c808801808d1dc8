use crate::error::{Error, Result};
use crate::store::StoreClient;

use std::sync::Arc;

/// Bulk key removal.
///
/// `delete_by_pattern` is two independent phases, scan then delete, with no
/// lock between them:
/// - keys written after the scan are not deleted by that call;
/// - keys that expire or are deleted between the phases are simply not counted;
/// - a failure during the delete phase can leave some matched keys removed.
///
/// Re-running the same pattern is always safe.
pub struct KeyMaintenance {
    store: Arc<dyn StoreClient>,
}

impl KeyMaintenance {
    pub fn new(store: Arc<dyn StoreClient>) -> Self {
        Self { store }
    }

    /// Deletes every key matching the store-native glob `pattern` and returns
    /// how many keys were actually removed.
    pub async fn delete_by_pattern(&self, pattern: &str) -> Result<u64> {
        if pattern.is_empty() {
            tracing::warn!("Rejected empty delete pattern");
            return Err(Error::invalid("pattern must not be empty"));
        }

        let keys = self.store.scan_keys(pattern).await?;
        if keys.is_empty() {
            tracing::debug!("No keys match '{}'", pattern);
            return Ok(0);
        }

        let removed = self.store.delete_keys(&keys).await?;
        if removed < keys.len() as u64 {
            tracing::info!(
                "Deleted {} of {} keys matching '{}' ({} vanished after scan)",
                removed,
                keys.len(),
                pattern,
                keys.len() as u64 - removed
            );
        } else {
            tracing::info!("Deleted {} keys matching '{}'", removed, pattern);
        }

        Ok(removed)
    }

    /// Deletes `keys` in one batch and returns how many existed.
    pub async fn delete_keys(&self, keys: &[String]) -> Result<u64> {
        if keys.is_empty() {
            return Ok(0);
        }
        let removed = self.store.delete_keys(keys).await?;
        tracing::info!("Deleted {} of {} requested keys", removed, keys.len());
        Ok(removed)
    }
}
