use serde::{Deserialize, Serialize};

/// Result of a pattern deletion.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeletePatternResponse {
    /// The glob exactly as received.
    pub pattern: String,
    /// Keys actually removed, which can be fewer than the scan matched.
    pub deleted: u64,
    pub message: String,
}
