pub mod error;
pub mod fetch;
pub mod logging;
pub mod transform;
pub mod utils;
pub mod wiki;

use serde::{Deserialize, Serialize};

pub use error::{FetchError, WikiError};
pub use fetch::{fetch_pieces, run, ComposerOutcome, FetchConfig, FetchReport};
pub use wiki::{Category, MediaWikiClient, WikiClient, WikiPage};

/// Composers whose IMSLP categories are fetched, in processing order.
pub const COMPOSERS: [&str; 5] = [
    "Bach, Johann Sebastian",
    "Beethoven, Ludwig van",
    "Mozart, Wolfgang Amadeus",
    "Chopin, Frédéric",
    "Tchaikovsky, Pyotr",
];

pub const IMSLP_API_URL: &str = "https://imslp.org/api.php";
pub const IMSLP_WIKI_URL: &str = "https://imslp.org/wiki/";
pub const DEFAULT_OUTPUT_PATH: &str = "server/data/imslp_pieces.json";

/// Only the first members of a category are considered.
pub const WORKS_PER_COMPOSER: usize = 10;
pub const MAIN_NAMESPACE: i64 = 0;
pub const DEFAULT_DIFFICULTY: u8 = 7;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Piece {
    pub id: u32,
    pub title: String,
    pub composer: String,
    pub difficulty: u8,
    pub ratings: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imslp_link: Option<String>,
}

impl Piece {
    /// Build a record from a raw wiki page name.
    pub fn from_page_name(id: u32, page_name: &str, composer: &str) -> Self {
        Self {
            id,
            title: transform::normalize_title(page_name),
            composer: composer.to_string(),
            difficulty: DEFAULT_DIFFICULTY,
            ratings: Vec::new(),
            imslp_link: Some(transform::imslp_link(page_name)),
        }
    }
}
