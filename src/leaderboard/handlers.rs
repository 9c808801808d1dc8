use super::service::Leaderboard;
use super::types::rank_entries;
use crate::app::MessageResponse;

use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

pub async fn handle_submit_score(
    Extension(board): Extension<Arc<Leaderboard>>,
    Path((player, score)): Path<(String, f64)>,
) -> Response {
    match board.submit_score(&player, score).await {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse::new(format!(
                "{}'s score has been updated to {}.",
                player, score
            ))),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to submit score for '{}': {}", player, e);
            e.into_response()
        }
    }
}

pub async fn handle_get_all_players(Extension(board): Extension<Arc<Leaderboard>>) -> Response {
    match board.get_all().await {
        Ok(entries) => (StatusCode::OK, Json(rank_entries(entries))).into_response(),
        Err(e) => {
            tracing::error!("Failed to read leaderboard: {}", e);
            e.into_response()
        }
    }
}

pub async fn handle_get_player(
    Extension(board): Extension<Arc<Leaderboard>>,
    Path(player): Path<String>,
) -> Response {
    match board.get_player(&player).await {
        Ok(Some(ranked)) => (StatusCode::OK, Json(ranked)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(MessageResponse::new("Player not found.")),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to look up player '{}': {}", player, e);
            e.into_response()
        }
    }
}

pub async fn handle_get_top_players(
    Extension(board): Extension<Arc<Leaderboard>>,
    Path(count): Path<i64>,
) -> Response {
    match board.get_top(count).await {
        Ok(entries) => (StatusCode::OK, Json(rank_entries(entries))).into_response(),
        Err(e) => {
            tracing::error!("Failed to read top {} players: {}", count, e);
            e.into_response()
        }
    }
}
