//! # xcdl
//!
//! Download bird sound recordings and their metadata from the xeno-canto
//! archive.
//!
//! A query is one ordered list of search terms. The archive answers it in
//! pages of up to 500 records; each raw JSON page is persisted under a
//! directory derived from the terms, then the recording id, genus, and file
//! URL are extracted from the stored pages and every referenced audio file
//! is downloaded into the same directory, one at a time.
//!
//! ## Architecture
//!
//! - [`models`]: Core data structures (Query, ResultPage, Recording, AssetRef)
//! - [`archive`]: Metadata fetching, field extraction, and asset download
//! - [`utils`]: Shared HTTP client
//! - [`config`]: Configuration and API key validation

pub mod archive;
pub mod config;
pub mod models;
pub mod utils;

// Re-export commonly used types
pub use archive::{ArchiveError, AssetDownloader, FieldExtractor, MetadataFetcher};
pub use config::Config;
pub use models::Query;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
