//! Configuration management.

use std::path::PathBuf;

use crate::archive::ArchiveError;

/// Default base endpoint for the xeno-canto recordings API.
pub const DEFAULT_API_BASE: &str = "https://xeno-canto.org/api/3/recordings";

/// Placeholder value that signals an unconfigured API key.
pub const API_KEY_PLACEHOLDER: &str = "YOUR_API_KEY_HERE";

/// Application configuration.
///
/// The API key is required by the v3 recordings API and is read from the
/// `XENO_CANTO_API_KEY` environment variable by default. [`Config::validate`]
/// must be called before any network activity so a missing key fails fast.
#[derive(Debug, Clone)]
pub struct Config {
    /// xeno-canto API key (required).
    pub api_key: String,

    /// Base URL of the recordings search endpoint.
    pub api_base: String,

    /// Root directory under which per-query subdirectories are created.
    pub data_dir: PathBuf,

    /// User agent sent with every request. Some asset origin servers reject
    /// requests that lack one.
    pub user_agent: String,

    /// Accept invalid TLS certificates. Off by default; only enable for
    /// archives behind broken middleboxes.
    pub accept_invalid_certs: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: std::env::var("XENO_CANTO_API_KEY").unwrap_or_default(),
            api_base: DEFAULT_API_BASE.to_string(),
            data_dir: default_data_dir(),
            user_agent: default_user_agent(),
            accept_invalid_certs: false,
        }
    }
}

impl Config {
    /// Create a configuration with an explicit API key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Check that the API key is usable.
    ///
    /// An empty key or the placeholder value is a configuration error, not a
    /// network error, and is reported before any request is issued.
    pub fn validate(&self) -> Result<(), ArchiveError> {
        if self.api_key.is_empty() || self.api_key == API_KEY_PLACEHOLDER {
            return Err(ArchiveError::Config(
                "API key is not set. Get a key from xeno-canto.org and export \
                 XENO_CANTO_API_KEY"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_empty_key() {
        let config = Config {
            api_key: String::new(),
            ..Config::with_api_key("x")
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_placeholder_key() {
        let config = Config::with_api_key(API_KEY_PLACEHOLDER);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_real_key() {
        let config = Config::with_api_key("1e6a9aa9802ece76fb29a052bab47076");
        assert!(config.validate().is_ok());
    }
}
