//! Result page and recording models.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Number of records the API packs into every non-final page.
pub const RECORDS_PER_PAGE: usize = 500;

/// One page of a paginated recordings response.
///
/// `num_pages` is the authoritative total page count as reported by the
/// server on this page; it is only known after the first fetch and may be
/// revised by later pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultPage {
    #[serde(rename = "numPages")]
    pub num_pages: u32,

    #[serde(default)]
    pub recordings: Vec<Recording>,
}

/// A single recording's metadata within a page.
///
/// The API returns many fields per record; only `id`, `gen`, and `file` are
/// used for downloads. Any record may lack any field, which is tolerated.
/// Unmodeled fields are preserved in `extra` so pages round-trip losslessly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recording {
    /// Unique recording identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Genus name, used to build local filenames.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gen: Option<String>,

    /// Audio file URL, possibly protocol-relative (`//host/path`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// An aligned (identifier, genus, URL) triple describing one downloadable
/// asset. Built in a single pass over the stored pages so the three fields
/// can never drift out of alignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRef {
    pub id: String,
    pub genus: String,
    pub url: String,
}

impl AssetRef {
    /// Fully qualified download URL. Protocol-relative URLs get an `https`
    /// scheme; anything else is passed through untouched.
    pub fn download_url(&self) -> String {
        if self.url.starts_with("//") {
            format!("https:{}", self.url)
        } else {
            self.url.clone()
        }
    }

    /// Local file name: genus (with `:` stripped) + id + `.mp3`.
    pub fn file_name(&self) -> String {
        format!("{}{}.mp3", self.genus.replace(':', ""), self.id)
    }
}
