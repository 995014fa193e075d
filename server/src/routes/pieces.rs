use axum::routing::{get, post};
use axum::{Extension, Router};

use crate::handlers::piece_handlers::{get_piece, list_pieces, refresh_pieces};
use crate::state::AppState;

pub fn piece_routes(state: AppState) -> Router {
    Router::new()
        .route("/pieces", get(list_pieces))
        .route("/pieces/refresh", post(refresh_pieces))
        .route("/pieces/{pieceId}", get(get_piece))
        .layer(Extension(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use imslp_fetcher::{utils, Piece};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::catalog::default_pieces;

    async fn send(app: Router, method: &str, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().method(method).uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn app_with_defaults(dir: &tempfile::TempDir) -> (AppState, Router) {
        let state = AppState::with_pieces(dir.path().join("imslp_pieces.json"), default_pieces());
        let app = Router::new().nest("/api", piece_routes(state.clone()));
        (state, app)
    }

    #[tokio::test]
    async fn lists_pieces() {
        let dir = tempfile::tempdir().unwrap();
        let (_, app) = app_with_defaults(&dir);

        let (status, body) = send(app, "GET", "/api/pieces").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 3);
        assert_eq!(body[0]["title"], "Piano Sonata No. 14 (Moonlight)");
    }

    #[tokio::test]
    async fn gets_one_piece_or_404() {
        let dir = tempfile::tempdir().unwrap();
        let (_, app) = app_with_defaults(&dir);

        let (status, body) = send(app.clone(), "GET", "/api/pieces/2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["composer"], "Pyotr Ilyich Tchaikovsky");

        let (status, body) = send(app.clone(), "GET", "/api/pieces/42").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Piece not found");

        let (status, _) = send(app, "GET", "/api/pieces/moonlight").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn refresh_replaces_the_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let (state, app) = app_with_defaults(&dir);
        let fetched = vec![
            Piece::from_page_name(1, "Nocturnes,_Op.9", "Chopin, Frédéric"),
            Piece::from_page_name(2, "Polonaises", "Chopin, Frédéric"),
        ];
        utils::save_json(&state.pieces_path, &fetched).unwrap();

        let (status, body) = send(app.clone(), "POST", "/api/pieces/refresh").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 2);

        let (_, body) = send(app, "GET", "/api/pieces/1").await;
        assert_eq!(body["title"], "Nocturnes, Op");
        assert_eq!(body["imslp_link"], "https://imslp.org/wiki/Nocturnes,_Op.9");
    }

    #[tokio::test]
    async fn failed_refresh_keeps_current_pieces() {
        let dir = tempfile::tempdir().unwrap();
        let (state, app) = app_with_defaults(&dir);

        let (status, body) = send(app, "POST", "/api/pieces/refresh").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["refreshed"], false);
        assert!(body["error"].as_str().unwrap().contains("imslp_pieces.json"));
        assert_eq!(*state.pieces.read().await, default_pieces());
    }
}
