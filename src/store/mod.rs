//! Store Client Module
//!
//! The only layer that talks to the backing key-value/score store.
//!
//! ## Core Concepts
//! - **Contract**: `StoreClient` lists every primitive the components need (ordered
//!   collections, keyspace scan and batch delete, strings with TTL, hashes).
//! - **Redis**: `RedisStore` maps each primitive onto one Redis command (or one
//!   atomic pipeline) and bounds every call with a timeout.
//! - **In-memory**: `MemoryStore` reproduces the same semantics in-process, including
//!   lazy TTL eviction, glob matching and sorted-set tie ordering.

pub mod client;
pub mod glob;
pub mod memory;
pub mod redis_store;

pub use client::StoreClient;
pub use memory::MemoryStore;
pub use redis_store::RedisStore;
