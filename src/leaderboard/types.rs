use serde::{Deserialize, Serialize};

/// One leaderboard entry as stored: a player and their latest score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerScore {
    pub player: String,
    pub score: f64,
}

/// A leaderboard entry with its 1-based position (rank 1 = highest score).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedPlayer {
    pub player: String,
    pub score: f64,
    pub rank: u64,
}

/// Attaches 1-based ranks to entries already in descending score order.
pub fn rank_entries(entries: Vec<PlayerScore>) -> Vec<RankedPlayer> {
    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| RankedPlayer {
            player: entry.player,
            score: entry.score,
            rank: index as u64 + 1,
        })
        .collect()
}
