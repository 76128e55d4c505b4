//! Paginated metadata fetching.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info};

use crate::archive::{page_file_name, ArchiveError};
use crate::config::Config;
use crate::models::{Query, ResultPage, RECORDS_PER_PAGE};
use crate::utils::HttpClient;

/// Outcome of a successful metadata fetch.
#[derive(Debug, Clone)]
pub struct FetchSummary {
    /// Directory holding the stored page files (and, later, the assets).
    pub path: PathBuf,

    /// Total page count as reported by the final response.
    pub num_pages: u32,

    /// Estimated total record count: every non-final page is assumed to hold
    /// exactly [`RECORDS_PER_PAGE`] records. Reporting only, never used for
    /// control flow.
    pub total_records: usize,
}

/// Fetches every result page for a query and persists the raw JSON bodies.
///
/// The total page count is only known after the first response, so the loop
/// bound is refreshed from each page as it arrives; `numPages` from the
/// freshest response is authoritative. Any transport or parse error aborts
/// the whole fetch — already-written page files are left on disk, but no
/// path is reported, so downstream stages never see a partial page set.
#[derive(Debug, Clone)]
pub struct MetadataFetcher {
    client: Arc<HttpClient>,
    config: Config,
}

impl MetadataFetcher {
    /// Create a fetcher, building an HTTP client from the configuration.
    pub fn new(config: Config) -> Result<Self, ArchiveError> {
        let client = Arc::new(HttpClient::from_config(&config)?);
        Ok(Self { client, config })
    }

    /// Create with an existing HTTP client (shared with the downloader).
    pub fn with_client(config: Config, client: Arc<HttpClient>) -> Self {
        Self { client, config }
    }

    /// Fetch all pages for `query`, writing one `jsondata_p<N>.json` file
    /// per page under the query's storage directory.
    pub async fn fetch_all(&self, query: &Query) -> Result<FetchSummary, ArchiveError> {
        let path = self.config.data_dir.join(query.storage_dir_name());
        if !path.exists() {
            info!(
                "Creating subdirectory {} for downloaded files",
                path.display()
            );
        }
        tokio::fs::create_dir_all(&path).await?;

        self.config.validate()?;

        let mut page: u32 = 1;
        let mut num_pages: u32 = 1; // placeholder until the first response
        let mut last_page_len: usize = 0;

        while page <= num_pages {
            info!("Loading page {}...", page);
            let url = self.page_url(query, page);
            debug!("GET {}", url);

            let response = self
                .client
                .client()
                .get(&url)
                .send()
                .await
                .map_err(|e| ArchiveError::Network(format!("Failed to fetch page: {}", e)))?;

            if !response.status().is_success() {
                let status = response.status();
                let text = response.text().await.unwrap_or_default();
                if status == reqwest::StatusCode::BAD_REQUEST {
                    return Err(ArchiveError::Api(format!(
                        "Bad request ({}): the query is likely malformed. The v3 API \
                         requires tagged terms, e.g. sp:\"Apus apus\" or gen:Apus sp:apus",
                        status
                    )));
                }
                return Err(ArchiveError::Api(format!(
                    "Archive returned status {}: {}",
                    status, text
                )));
            }

            let body = response.text().await?;
            let parsed: ResultPage = serde_json::from_str(&body)?;

            // Persist the raw body only after it parsed, so every stored
            // page file is valid JSON.
            tokio::fs::write(path.join(page_file_name(page)), &body).await?;

            num_pages = parsed.num_pages;
            last_page_len = parsed.recordings.len();
            page += 1;
        }

        let total_records =
            num_pages.saturating_sub(1) as usize * RECORDS_PER_PAGE + last_page_len;
        info!("Found {} pages in total", num_pages);
        info!("Saved metadata for {} recordings", total_records);

        Ok(FetchSummary {
            path,
            num_pages,
            total_records,
        })
    }

    fn page_url(&self, query: &Query, page: u32) -> String {
        format!(
            "{}?query={}&page={}&key={}",
            self.config.api_base,
            query.encoded(),
            page,
            self.config.api_key
        )
    }
}
