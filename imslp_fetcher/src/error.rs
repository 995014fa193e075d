use thiserror::Error;

/// Failures talking to the wiki.
#[derive(Error, Debug)]
pub enum WikiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("API error {code}: {info}")]
    Api { code: String, info: String },

    #[error("category not found: {0}")]
    CategoryNotFound(String),

    #[error("invalid API URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("unexpected API response: {0}")]
    Malformed(String),
}

/// Errors that abort a whole fetch run.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("failed to connect to {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: WikiError,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize pieces: {0}")]
    Serialize(#[from] serde_json::Error),
}
