use super::service::KeyMaintenance;
use super::types::DeletePatternResponse;

use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

pub async fn handle_delete_pattern(
    Extension(maintenance): Extension<Arc<KeyMaintenance>>,
    Path(pattern): Path<String>,
) -> Response {
    match maintenance.delete_by_pattern(&pattern).await {
        Ok(deleted) => (
            StatusCode::OK,
            Json(DeletePatternResponse {
                message: format!("{} keys deleted with pattern '{}'", deleted, pattern),
                pattern,
                deleted,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to delete keys matching '{}': {}", pattern, e);
            e.into_response()
        }
    }
}
