//! Sequential asset downloading.

use std::path::Path;
use std::sync::Arc;

use futures_util::StreamExt;
use tokio::io::AsyncWriteExt;
use tracing::{error, info};

use crate::archive::ArchiveError;
use crate::config::Config;
use crate::models::AssetRef;
use crate::utils::HttpClient;

/// Outcome of a download batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadSummary {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Downloads audio assets one at a time, isolating failures per item.
///
/// A failed item is logged with the offending URL and the batch moves on;
/// one bad asset never aborts its siblings. Downloads overwrite any existing
/// file of the same name.
#[derive(Debug, Clone)]
pub struct AssetDownloader {
    client: Arc<HttpClient>,
}

impl AssetDownloader {
    /// Create a downloader, building an HTTP client from the configuration.
    pub fn new(config: &Config) -> Result<Self, ArchiveError> {
        Ok(Self {
            client: Arc::new(HttpClient::from_config(config)?),
        })
    }

    /// Create with an existing HTTP client (shared with the fetcher).
    pub fn with_client(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    /// Download every asset in `targets` into `path`, sequentially.
    pub async fn download_all(&self, path: &Path, targets: &[AssetRef]) -> DownloadSummary {
        if targets.is_empty() {
            info!("No files found to download");
            return DownloadSummary::default();
        }

        info!("A total of {} files will be downloaded", targets.len());

        let mut summary = DownloadSummary {
            attempted: targets.len(),
            ..Default::default()
        };
        for (i, target) in targets.iter().enumerate() {
            info!(
                "Saving file {}/{}: {}",
                i + 1,
                targets.len(),
                target.file_name()
            );
            let url = target.download_url();
            match self.download_one(&url, &path.join(target.file_name())).await {
                Ok(()) => summary.succeeded += 1,
                Err(e) => {
                    error!("Failed to download {}: {}", url, e);
                    summary.failed += 1;
                }
            }
        }

        info!(
            "Downloaded {}/{} files ({} failed)",
            summary.succeeded, summary.attempted, summary.failed
        );
        summary
    }

    /// Stream one asset body to disk.
    async fn download_one(&self, url: &str, dest: &Path) -> Result<(), ArchiveError> {
        let response = self.client.client().get(url).send().await?;

        if !response.status().is_success() {
            return Err(ArchiveError::Api(format!(
                "Server returned status {}",
                response.status()
            )));
        }

        let mut file = tokio::fs::File::create(dest).await?;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
        }
        file.flush().await?;
        Ok(())
    }
}
