use std::path::PathBuf;
use std::sync::Arc;

use imslp_fetcher::Piece;
use tokio::sync::RwLock;

use crate::catalog;

#[derive(Clone, Debug)]
pub struct AppState {
    pub pieces: Arc<RwLock<Vec<Piece>>>,
    pub pieces_path: PathBuf,
}

impl AppState {
    /// Load the catalog from `pieces_path`, falling back to the defaults.
    pub fn load(pieces_path: PathBuf) -> Self {
        let pieces = catalog::load_pieces(&pieces_path);
        Self::with_pieces(pieces_path, pieces)
    }

    pub fn with_pieces(pieces_path: PathBuf, pieces: Vec<Piece>) -> Self {
        AppState {
            pieces: Arc::new(RwLock::new(pieces)),
            pieces_path,
        }
    }
}
