use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use dotenv::dotenv;
use imslp_fetcher::{run, FetchConfig, DEFAULT_OUTPUT_PATH, IMSLP_API_URL};
use tracing::error;

#[derive(Parser, Debug)]
#[command(author, version, about = "Fetch composer works from IMSLP into a JSON file", long_about = None)]
struct Args {
    /// Output JSON file
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// MediaWiki API endpoint
    #[arg(long, default_value = IMSLP_API_URL)]
    api_url: String,

    /// Per-request timeout in seconds (none by default)
    #[arg(short, long)]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    imslp_fetcher::logging::init();

    let args = Args::parse();
    let config = FetchConfig {
        api_url: args.api_url,
        output_path: args.output,
        timeout: args.timeout_secs.map(Duration::from_secs),
        ..FetchConfig::default()
    };

    let report = match run(&config).await {
        Ok(report) => report,
        Err(e) => {
            error!("Error fetching IMSLP data: {}", e);
            return Err(e.into());
        }
    };

    println!(
        "Saved {} pieces to {} ({} of {} composers failed)",
        report.pieces().len(),
        config.output_path.display(),
        report.failed(),
        report.composers.len()
    );
    Ok(())
}
