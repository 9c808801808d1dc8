//! Cache Module
//!
//! Single-key accessors over the store: plain strings with expiration, structured
//! objects and hash fields.
//!
//! ## Submodules
//! - **`codec`**: The `Codec` trait and the default `JsonCodec`. Object accessors go
//!   through whichever codec the `CacheService` was built with.
//! - **`service`**: `CacheService`, the accessors themselves.
//! - **`handlers`**: HTTP request handlers for the Axum web server.
//! - **`types`**: `Product` (the sample object payload) and response DTOs.

pub mod codec;
pub mod handlers;
pub mod service;
pub mod types;
