use axum::{extract::Path, http::StatusCode, response::IntoResponse, Extension, Json};
use serde_json::json;
use tracing::{error, info};

use crate::catalog;
use crate::state::AppState;

/// GET /api/pieces
pub async fn list_pieces(Extension(state): Extension<AppState>) -> impl IntoResponse {
    Json(state.pieces.read().await.clone())
}

/// GET /api/pieces/{pieceId}
pub async fn get_piece(
    Extension(state): Extension<AppState>,
    Path(piece_id): Path<String>,
) -> impl IntoResponse {
    let pieces = state.pieces.read().await;
    let found = piece_id
        .parse::<u32>()
        .ok()
        .and_then(|id| pieces.iter().find(|p| p.id == id));

    match found {
        Some(piece) => (StatusCode::OK, Json(json!(piece))),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Piece not found" })),
        ),
    }
}

/// POST /api/pieces/refresh
///
/// Re-reads the fetcher output. The current list is kept if that fails.
pub async fn refresh_pieces(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let path = state.pieces_path.clone();
    let read = match tokio::task::spawn_blocking(move || catalog::read_pieces(&path)).await {
        Ok(read) => read.map_err(|e| e.to_string()),
        Err(e) => Err(format!("refresh task failed: {}", e)),
    };

    match read {
        Ok(fresh) => {
            let count = fresh.len();
            *state.pieces.write().await = fresh;
            info!("Refreshed: loaded {} pieces", count);
            (
                StatusCode::OK,
                Json(json!({ "refreshed": true, "count": count })),
            )
        }
        Err(e) => {
            error!("Failed to refresh pieces: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "refreshed": false, "error": e })),
            )
        }
    }
}
