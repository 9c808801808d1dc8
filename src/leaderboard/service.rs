//! Leaderboard Service
//!
//! A single named ordered collection mapping player → score. All state lives in
//! the store; this type only validates arguments and translates between the
//! store's 0-based descending ranks and the 1-based ranks reported to callers.
//!
//! Equal scores are ordered by player identifier, descending byte order. That is
//! the native order of a Redis sorted set read in reverse, and `MemoryStore`
//! reproduces it.

use super::types::{PlayerScore, RankedPlayer};
use crate::error::{Error, Result};
use crate::store::StoreClient;

use std::sync::Arc;

/// Collection name used when none is configured.
pub const DEFAULT_LEADERBOARD: &str = "leaderboard";

pub struct Leaderboard {
    store: Arc<dyn StoreClient>,
    name: String,
}

impl Leaderboard {
    pub fn new(store: Arc<dyn StoreClient>, name: impl Into<String>) -> Self {
        Self {
            store,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inserts or replaces `player`'s score (last write wins).
    pub async fn submit_score(&self, player: &str, score: f64) -> Result<()> {
        validate_player(player)?;
        if !score.is_finite() {
            tracing::warn!("Rejected non-finite score {} for player '{}'", score, player);
            return Err(Error::invalid(format!(
                "score must be a finite number, got {}",
                score
            )));
        }

        let added = self.store.upsert_score(&self.name, player, score).await?;
        if added {
            tracing::info!("New player '{}' on '{}' with score {}", player, self.name, score);
        } else {
            tracing::info!("Updated '{}' on '{}' to score {}", player, self.name, score);
        }
        Ok(())
    }

    /// Score and 1-based rank of `player`, or `None` if they have no entry.
    pub async fn get_player(&self, player: &str) -> Result<Option<RankedPlayer>> {
        validate_player(player)?;

        let found = self.store.score_with_rank(&self.name, player).await?;
        tracing::debug!("Lookup of '{}' on '{}': {:?}", player, self.name, found);

        Ok(found.map(|(score, rank)| RankedPlayer {
            player: player.to_string(),
            score,
            rank: rank + 1,
        }))
    }

    /// The `count` highest entries, best first. Zero yields an empty list.
    pub async fn get_top(&self, count: i64) -> Result<Vec<PlayerScore>> {
        if count < 0 {
            tracing::warn!("Rejected negative top-N count {}", count);
            return Err(Error::invalid(format!(
                "count must be non-negative, got {}",
                count
            )));
        }
        if count == 0 {
            return Ok(Vec::new());
        }

        let entries = self
            .store
            .range_by_rank_desc(&self.name, 0, Some(count as usize))
            .await?;
        Ok(to_scores(entries))
    }

    /// Every entry in rank order.
    pub async fn get_all(&self) -> Result<Vec<PlayerScore>> {
        let entries = self.store.range_by_rank_desc(&self.name, 0, None).await?;
        Ok(to_scores(entries))
    }

    /// Deletes `player`'s entry. Returns `true` if there was one.
    pub async fn remove_player(&self, player: &str) -> Result<bool> {
        validate_player(player)?;
        let removed = self.store.remove_member(&self.name, player).await?;
        if removed {
            tracing::info!("Removed '{}' from '{}'", player, self.name);
        }
        Ok(removed)
    }

    pub async fn player_count(&self) -> Result<u64> {
        self.store.collection_size(&self.name).await
    }
}

fn validate_player(player: &str) -> Result<()> {
    if player.is_empty() {
        tracing::warn!("Rejected empty player identifier");
        return Err(Error::invalid("player must not be empty"));
    }
    Ok(())
}

fn to_scores(entries: Vec<(String, f64)>) -> Vec<PlayerScore> {
    entries
        .into_iter()
        .map(|(player, score)| PlayerScore { player, score })
        .collect()
}
