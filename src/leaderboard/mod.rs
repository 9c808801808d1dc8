//! Leaderboard Module
//!
//! Player rankings kept in one ordered collection on the store.
//!
//! ## Overview
//! Scores are upserted (last write wins) and ranks are read back from the store's
//! native ordering: rank 1 is the highest score. Nothing is cached in-process, so
//! every read reflects the store at the time of the call.
//!
//! ## Submodules
//! - **`service`**: The `Leaderboard` component (submit, lookup, top-N, full listing).
//! - **`handlers`**: HTTP request handlers for the Axum web server.
//! - **`types`**: Entry types and the rank-zipping helper.

pub mod handlers;
pub mod service;
pub mod types;
