//! Talking to the xeno-canto archive: paginated metadata fetch, stored-page
//! field extraction, and sequential asset download.
//!
//! Error handling follows a two-tier policy. Metadata fetching is
//! all-or-nothing: any HTTP or parse failure aborts the run, because
//! extraction assumes a contiguous, complete set of page files. Asset
//! downloads are best-effort: each item is isolated and a failure is logged
//! and skipped.

mod downloader;
mod extract;
mod fetcher;

pub use downloader::{AssetDownloader, DownloadSummary};
pub use extract::FieldExtractor;
pub use fetcher::{FetchSummary, MetadataFetcher};

/// File name for a stored metadata page.
pub(crate) fn page_file_name(page: u32) -> String {
    format!("jsondata_p{}.json", page)
}

/// Errors that can occur when interacting with the archive.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(String),

    /// API error from the archive
    #[error("API error: {0}")]
    Api(String),

    /// JSON parsing error
    #[error("Parse error: {0}")]
    Parse(String),

    /// IO error (file system)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or missing configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for ArchiveError {
    fn from(err: reqwest::Error) -> Self {
        ArchiveError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ArchiveError {
    fn from(err: serde_json::Error) -> Self {
        ArchiveError::Parse(format!("JSON: {}", err))
    }
}
