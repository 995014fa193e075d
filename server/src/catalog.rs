use std::path::Path;

use imslp_fetcher::{utils, Piece};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read pieces from {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Served when no fetched catalog is available.
pub fn default_pieces() -> Vec<Piece> {
    let piece = |id, title: &str, composer: &str, difficulty| Piece {
        id,
        title: title.to_string(),
        composer: composer.to_string(),
        difficulty,
        ratings: Vec::new(),
        imslp_link: None,
    };

    vec![
        piece(1, "Piano Sonata No. 14 (Moonlight)", "Beethoven, Ludwig van", 7),
        piece(2, "Violin Concerto in D Major, Op. 35", "Pyotr Ilyich Tchaikovsky", 9),
        piece(3, "Cello Suite No. 1 in G Major, BWV 1007", "Johann Sebastian Bach", 6),
    ]
}

pub fn read_pieces(path: &Path) -> Result<Vec<Piece>, CatalogError> {
    utils::load_json(path).map_err(|source| CatalogError::Read {
        path: path.display().to_string(),
        source,
    })
}

/// Pieces from the fetcher output, or the defaults if the file is unusable or empty.
pub fn load_pieces(path: &Path) -> Vec<Piece> {
    match read_pieces(path) {
        Ok(pieces) if !pieces.is_empty() => {
            info!("Loaded {} pieces from {}", pieces.len(), path.display());
            pieces
        }
        Ok(_) => {
            warn!("{} is empty, using default pieces", path.display());
            default_pieces()
        }
        Err(e) => {
            warn!("{}, using default pieces", e);
            default_pieces()
        }
    }
}
