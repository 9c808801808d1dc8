//! Leaderboard and Cache Façade Library
//!
//! This library crate defines the modules behind the `rankcache` HTTP service,
//! a thin data-access layer over a Redis-style key-value store.
//! It serves as the foundation for the binary executable (`main.rs`).
//!
//! ## Architecture Modules
//! - **`store`**: The store client contract and its two backends (Redis and
//!   in-memory). Every other module reaches the store only through it.
//! - **`leaderboard`**: Player rankings on a single ordered collection: score upserts,
//!   1-based rank lookups, top-N and full listings.
//! - **`maintenance`**: Bulk deletion of keys selected by a glob pattern (scan, then
//!   one batch delete).
//! - **`cache`**: Plain string, structured-object and hash-field accessors.
//! - **`app`**: The Axum router that exposes all of the above over HTTP.
//! - **`config`** / **`error`**: Runtime settings and the shared error taxonomy.

pub mod app;
pub mod cache;
pub mod config;
pub mod error;
pub mod leaderboard;
pub mod maintenance;
pub mod store;
