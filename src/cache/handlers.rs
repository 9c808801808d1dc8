use super::service::CacheService;
use super::types::{Product, ValueResponse};
use crate::app::MessageResponse;
use crate::config::TtlPolicy;

use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

fn not_found(what: String) -> Response {
    (StatusCode::NOT_FOUND, Json(MessageResponse::new(what))).into_response()
}

// -------------------- STRING --------------------

pub async fn handle_set_value(
    Extension(cache): Extension<Arc<CacheService>>,
    Extension(ttl): Extension<TtlPolicy>,
    Path((key, value)): Path<(String, String)>,
) -> Response {
    match cache.set(&key, &value, Some(ttl.value_ttl)).await {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse::new(format!(
                "Key '{}' saved with value '{}'",
                key, value
            ))),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to set '{}': {}", key, e);
            e.into_response()
        }
    }
}

pub async fn handle_get_value(
    Extension(cache): Extension<Arc<CacheService>>,
    Path(key): Path<String>,
) -> Response {
    match cache.get(&key).await {
        Ok(Some(value)) => (StatusCode::OK, Json(ValueResponse { key, value })).into_response(),
        Ok(None) => not_found(format!("Key '{}' not found", key)),
        Err(e) => {
            tracing::error!("Failed to get '{}': {}", key, e);
            e.into_response()
        }
    }
}

pub async fn handle_delete_key(
    Extension(cache): Extension<Arc<CacheService>>,
    Path(key): Path<String>,
) -> Response {
    match cache.delete(&key).await {
        Ok(true) => (
            StatusCode::OK,
            Json(MessageResponse::new(format!("Key '{}' deleted", key))),
        )
            .into_response(),
        Ok(false) => not_found(format!("Key '{}' not found", key)),
        Err(e) => {
            tracing::error!("Failed to delete '{}': {}", key, e);
            e.into_response()
        }
    }
}

// -------------------- PRODUCT --------------------

pub async fn handle_save_product(
    Extension(cache): Extension<Arc<CacheService>>,
    Extension(ttl): Extension<TtlPolicy>,
    Json(product): Json<Product>,
) -> Response {
    let key = Product::cache_key(product.id);

    match cache.set_object(&key, &product, Some(ttl.object_ttl)).await {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse::new(format!(
                "Product saved with key: {}",
                key
            ))),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to save product {}: {}", product.id, e);
            e.into_response()
        }
    }
}

pub async fn handle_get_product(
    Extension(cache): Extension<Arc<CacheService>>,
    Path(id): Path<i64>,
) -> Response {
    match cache.get_object::<Product>(&Product::cache_key(id)).await {
        Ok(Some(product)) => (StatusCode::OK, Json(product)).into_response(),
        Ok(None) => not_found(format!("Product {} not found", id)),
        Err(e) => {
            tracing::error!("Failed to load product {}: {}", id, e);
            e.into_response()
        }
    }
}

pub async fn handle_delete_product(
    Extension(cache): Extension<Arc<CacheService>>,
    Path(id): Path<i64>,
) -> Response {
    match cache.delete(&Product::cache_key(id)).await {
        Ok(true) => (StatusCode::OK, Json(MessageResponse::new("Deleted"))).into_response(),
        Ok(false) => not_found(format!("Product {} not found", id)),
        Err(e) => {
            tracing::error!("Failed to delete product {}: {}", id, e);
            e.into_response()
        }
    }
}

// -------------------- HASH --------------------

pub async fn handle_hash_set(
    Extension(cache): Extension<Arc<CacheService>>,
    Path((key, field, value)): Path<(String, String, String)>,
) -> Response {
    match cache.hash_set(&key, &field, &value).await {
        Ok(_) => (
            StatusCode::OK,
            Json(MessageResponse::new(format!(
                "Hash key '{}' field '{}' set to '{}'",
                key, field, value
            ))),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to set field '{}' of '{}': {}", field, key, e);
            e.into_response()
        }
    }
}

pub async fn handle_hash_get(
    Extension(cache): Extension<Arc<CacheService>>,
    Path((key, field)): Path<(String, String)>,
) -> Response {
    match cache.hash_get(&key, &field).await {
        Ok(Some(value)) => (
            StatusCode::OK,
            Json(ValueResponse {
                key: format!("{}.{}", key, field),
                value,
            }),
        )
            .into_response(),
        Ok(None) => not_found(format!("Field '{}' of '{}' not found", field, key)),
        Err(e) => {
            tracing::error!("Failed to get field '{}' of '{}': {}", field, key, e);
            e.into_response()
        }
    }
}

pub async fn handle_hash_get_all(
    Extension(cache): Extension<Arc<CacheService>>,
    Path(key): Path<String>,
) -> Response {
    match cache.hash_get_all(&key).await {
        Ok(fields) => (StatusCode::OK, Json(fields)).into_response(),
        Err(e) => {
            tracing::error!("Failed to read hash '{}': {}", key, e);
            e.into_response()
        }
    }
}
