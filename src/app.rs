//! HTTP surface of the service.
//!
//! Wires every handler onto its route and shares the components with them
//! through `Extension` layers.

use crate::cache::handlers::*;
use crate::cache::service::CacheService;
use crate::config::TtlPolicy;
use crate::leaderboard::handlers::*;
use crate::leaderboard::service::Leaderboard;
use crate::maintenance::handlers::*;
use crate::maintenance::service::KeyMaintenance;
use crate::store::StoreClient;

use axum::routing::{delete, get, post};
use axum::{Extension, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Plain acknowledgement or explanation returned by most endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The components a router needs, all sharing one store client.
#[derive(Clone)]
pub struct AppServices {
    pub cache: Arc<CacheService>,
    pub leaderboard: Arc<Leaderboard>,
    pub maintenance: Arc<KeyMaintenance>,
    pub ttl: TtlPolicy,
}

impl AppServices {
    pub fn new(store: Arc<dyn StoreClient>, leaderboard_name: &str, ttl: TtlPolicy) -> Self {
        Self {
            cache: Arc::new(CacheService::new(store.clone())),
            leaderboard: Arc::new(Leaderboard::new(store.clone(), leaderboard_name)),
            maintenance: Arc::new(KeyMaintenance::new(store)),
            ttl,
        }
    }
}

pub fn build_router(services: AppServices) -> Router {
    Router::new()
        .route("/cache/set/:key/:value", get(handle_set_value))
        .route("/cache/get/:key", get(handle_get_value))
        .route("/cache/delete/:key", delete(handle_delete_key))
        .route("/cache/delete-pattern/:pattern", delete(handle_delete_pattern))
        .route("/product/save", post(handle_save_product))
        .route(
            "/product/:id",
            get(handle_get_product).delete(handle_delete_product),
        )
        .route("/hash/set/:key/:field/:value", post(handle_hash_set))
        .route("/hash/get/:key/:field", get(handle_hash_get))
        .route("/hash/all/:key", get(handle_hash_get_all))
        .route("/leaderboard", get(handle_get_all_players))
        .route("/leaderboard/top/:count", get(handle_get_top_players))
        .route("/leaderboard/:player", get(handle_get_player))
        .route("/leaderboard/:player/:score", post(handle_submit_score))
        .layer(Extension(services.cache))
        .layer(Extension(services.leaderboard))
        .layer(Extension(services.maintenance))
        .layer(Extension(services.ttl))
}
