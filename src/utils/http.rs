//! HTTP client utilities.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::archive::ArchiveError;
use crate::config::Config;

/// Shared HTTP client with sensible defaults.
///
/// Carries the configured user agent on every request; certificate
/// verification stays on unless explicitly disabled in [`Config`].
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Arc<Client>,
}

impl HttpClient {
    /// Build a client from the application configuration.
    pub fn from_config(config: &Config) -> Result<Self, ArchiveError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| ArchiveError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::from_client(Arc::new(client)))
    }

    /// Wrap an existing reqwest client.
    pub fn from_client(client: Arc<Client>) -> Self {
        Self { client }
    }

    /// Get the underlying client.
    pub fn client(&self) -> &Client {
        &self.client
    }
}
