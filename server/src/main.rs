mod catalog;
mod handlers;
mod routes;
mod state;

use std::env;
use std::path::PathBuf;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use routes::pieces::piece_routes;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    imslp_fetcher::logging::init();

    let pieces_path = env::var("PIECES_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(imslp_fetcher::DEFAULT_OUTPUT_PATH));
    let port: u16 = match env::var("PORT") {
        Ok(p) => p.parse()?,
        Err(_) => 4000,
    };

    // Any origin unless CLIENT_URL pins one.
    let cors = match env::var("CLIENT_URL") {
        Ok(client_url) => CorsLayer::new()
            .allow_origin(client_url.parse::<HeaderValue>()?)
            .allow_methods([Method::POST, Method::GET, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE]),
        Err(_) => CorsLayer::permissive(),
    };

    let state = AppState::load(pieces_path);
    let app = Router::new()
        .nest("/api", piece_routes(state))
        .layer(cors);

    let listener = TcpListener::bind(("127.0.0.1", port)).await?;
    info!("Server running on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
