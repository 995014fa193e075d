use std::path::PathBuf;
use std::time::Duration;

use tracing::{error, info};

use crate::error::{FetchError, WikiError};
use crate::transform::PieceIds;
use crate::wiki::{MediaWikiClient, WikiClient};
use crate::{utils, Piece, COMPOSERS, DEFAULT_OUTPUT_PATH, IMSLP_API_URL, MAIN_NAMESPACE, WORKS_PER_COMPOSER};

/// Parameters of a fetch run. The defaults are the fixed IMSLP settings.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub api_url: String,
    pub output_path: PathBuf,
    pub timeout: Option<Duration>,
    pub composers: Vec<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            api_url: IMSLP_API_URL.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            timeout: None,
            composers: COMPOSERS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum ComposerOutcome {
    /// `skipped` counts considered members outside the main namespace.
    Pieces { pieces: Vec<Piece>, skipped: usize },
    Failed { error: String },
}

/// Per-composer results, in processing order.
#[derive(Debug, Default)]
pub struct FetchReport {
    pub composers: Vec<(String, ComposerOutcome)>,
}

impl FetchReport {
    /// All records from successful composers, in emission order.
    pub fn pieces(&self) -> Vec<Piece> {
        self.composers
            .iter()
            .filter_map(|(_, outcome)| match outcome {
                ComposerOutcome::Pieces { pieces, .. } => Some(pieces.iter().cloned()),
                ComposerOutcome::Failed { .. } => None,
            })
            .flatten()
            .collect()
    }

    pub fn failed(&self) -> usize {
        self.composers
            .iter()
            .filter(|(_, outcome)| matches!(outcome, ComposerOutcome::Failed { .. }))
            .count()
    }
}

/// Walk the composers in order and collect their pieces. A composer whose
/// category cannot be resolved or listed contributes nothing and the run
/// carries on with the next one.
pub async fn fetch_pieces<S: AsRef<str>>(client: &dyn WikiClient, composers: &[S]) -> FetchReport {
    let mut ids = PieceIds::new();
    let mut report = FetchReport::default();

    for composer in composers {
        let composer = composer.as_ref();
        info!("Processing composer: {}", composer);

        let outcome = match fetch_composer(client, composer, &mut ids).await {
            Ok((pieces, skipped)) => ComposerOutcome::Pieces { pieces, skipped },
            Err(e) => {
                error!("Error processing composer {}: {}", composer, e);
                ComposerOutcome::Failed { error: e.to_string() }
            }
        };
        report.composers.push((composer.to_string(), outcome));
    }

    info!("Total pieces found: {}", ids.issued());
    report
}

async fn fetch_composer(
    client: &dyn WikiClient,
    composer: &str,
    ids: &mut PieceIds,
) -> Result<(Vec<Piece>, usize), WikiError> {
    let category = client.resolve_category(composer).await?;
    info!("Found category: {}", category.name);

    let works = client.category_members(&category).await?;
    info!("Found {} works", works.len());

    let mut pieces = Vec::new();
    let mut skipped = 0;
    for work in works.iter().take(WORKS_PER_COMPOSER) {
        info!("Processing work: {}", work.name);
        if work.namespace != MAIN_NAMESPACE {
            info!("Skipped work (wrong namespace): {}", work.name);
            skipped += 1;
            continue;
        }

        let piece = Piece::from_page_name(ids.next_id(), &work.name, composer);
        info!("Added piece: {}", piece.title);
        pieces.push(piece);
    }

    Ok((pieces, skipped))
}

/// Connect, fetch every composer and write the result file.
pub async fn run(config: &FetchConfig) -> Result<FetchReport, FetchError> {
    info!("Connecting to {}...", config.api_url);
    let client = MediaWikiClient::connect(&config.api_url, config.timeout)
        .await
        .map_err(|source| FetchError::Connect {
            url: config.api_url.clone(),
            source,
        })?;

    let report = fetch_pieces(&client, &config.composers).await;
    let pieces = report.pieces();
    utils::save_json(&config.output_path, &pieces)?;
    info!(
        "Successfully saved {} pieces to {}",
        pieces.len(),
        config.output_path.display()
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_the_fixed_imslp_settings() {
        let config = FetchConfig::default();

        assert_eq!(config.api_url, "https://imslp.org/api.php");
        assert_eq!(config.output_path, PathBuf::from("server/data/imslp_pieces.json"));
        assert_eq!(config.composers, COMPOSERS);
        assert_eq!(config.timeout, None);
    }
}
