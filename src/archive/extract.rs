//! Field extraction from stored metadata pages.

use std::path::PathBuf;

use serde_json::Value;
use tracing::{error, warn};

use crate::archive::page_file_name;
use crate::models::{AssetRef, ResultPage};

/// Reads stored page files back and extracts per-record field values.
///
/// The page files are the source of truth here: the total page count is
/// re-read from every page visited, trusting the freshest one, rather than
/// reusing the fetch-time value. Unlike the fetcher, extraction is
/// best-effort — a missing or unreadable page file stops the walk early and
/// whatever was accumulated so far is returned.
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    path: PathBuf,
}

impl FieldExtractor {
    /// Create an extractor over a storage directory produced by
    /// [`MetadataFetcher`](crate::archive::MetadataFetcher).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Collect `field`'s value from every record on every page, in page
    /// order then record order.
    ///
    /// A record lacking the field is logged and skipped, not replaced with a
    /// placeholder, so sequences extracted for different fields can end up
    /// with different lengths. [`extract_targets`](Self::extract_targets)
    /// avoids that by construction and is what the download path uses.
    pub fn extract_field(&self, field: &str) -> Vec<String> {
        let mut values = Vec::new();
        self.walk_pages(|page_no, body| {
            let page: Value = match serde_json::from_str(body) {
                Ok(page) => page,
                Err(e) => {
                    error!("Could not parse stored page {}: {}", page_no, e);
                    return None;
                }
            };
            let recordings = page.get("recordings").and_then(Value::as_array);
            for (k, record) in recordings.into_iter().flatten().enumerate() {
                match record.get(field) {
                    Some(Value::String(s)) => values.push(s.clone()),
                    Some(other) => values.push(other.to_string()),
                    None => {
                        warn!(
                            "'{}' not found in record {} on page {}",
                            field, k, page_no
                        );
                    }
                }
            }
            page.get("numPages").and_then(Value::as_u64).map(|n| n as u32)
        });
        values
    }

    /// Collect aligned (id, genus, url) triples in a single pass.
    ///
    /// A record missing any of the three fields is skipped as a whole, so
    /// the resulting sequence can never pair one record's id with another's
    /// URL.
    pub fn extract_targets(&self) -> Vec<AssetRef> {
        let mut targets = Vec::new();
        self.walk_pages(|page_no, body| {
            let page: ResultPage = match serde_json::from_str(body) {
                Ok(page) => page,
                Err(e) => {
                    error!("Could not parse stored page {}: {}", page_no, e);
                    return None;
                }
            };
            for (k, record) in page.recordings.iter().enumerate() {
                match (&record.id, &record.gen, &record.file) {
                    (Some(id), Some(gen), Some(file)) => targets.push(AssetRef {
                        id: id.clone(),
                        genus: gen.clone(),
                        url: file.clone(),
                    }),
                    _ => {
                        warn!(
                            "Record {} on page {} is missing id, gen, or file; skipping",
                            k, page_no
                        );
                    }
                }
            }
            Some(page.num_pages)
        });
        targets
    }

    /// Walk page files 1..=numPages, feeding each raw body to `visit`.
    ///
    /// `visit` returns the page count reported by that page, which becomes
    /// the new loop bound; returning `None` stops the walk.
    fn walk_pages<F>(&self, mut visit: F)
    where
        F: FnMut(u32, &str) -> Option<u32>,
    {
        let mut page: u32 = 1;
        let mut num_pages: u32 = 1;
        while page <= num_pages {
            let file = self.path.join(page_file_name(page));
            let body = match std::fs::read_to_string(&file) {
                Ok(body) => body,
                Err(e) => {
                    error!(
                        "Could not read JSON file for page {} ({}): {}. Stopping.",
                        page,
                        file.display(),
                        e
                    );
                    return;
                }
            };
            match visit(page, &body) {
                Some(n) => num_pages = n,
                None => return,
            }
            page += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_page(dir: &std::path::Path, page: u32, body: &str) {
        std::fs::write(dir.join(page_file_name(page)), body).unwrap();
    }

    #[test]
    fn test_extract_field_across_pages_in_order() {
        let dir = tempfile::tempdir().unwrap();
        write_page(
            dir.path(),
            1,
            r#"{"numPages": 2, "recordings": [{"id": "1"}, {"id": "2"}]}"#,
        );
        write_page(dir.path(), 2, r#"{"numPages": 2, "recordings": [{"id": "3"}]}"#);

        let extractor = FieldExtractor::new(dir.path());
        assert_eq!(extractor.extract_field("id"), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_missing_field_is_skipped_without_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        write_page(
            dir.path(),
            1,
            r#"{"numPages": 1, "recordings": [{"id": "1"}, {"gen": "Apus"}, {"id": "3"}]}"#,
        );

        let extractor = FieldExtractor::new(dir.path());
        assert_eq!(extractor.extract_field("id"), vec!["1", "3"]);
    }

    #[test]
    fn test_missing_page_file_returns_partial_results() {
        let dir = tempfile::tempdir().unwrap();
        write_page(
            dir.path(),
            1,
            r#"{"numPages": 3, "recordings": [{"id": "1"}]}"#,
        );
        // page 2 deliberately absent

        let extractor = FieldExtractor::new(dir.path());
        assert_eq!(extractor.extract_field("id"), vec!["1"]);
    }

    #[test]
    fn test_extract_field_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        write_page(
            dir.path(),
            1,
            r#"{"numPages": 1, "recordings": [{"id": "1", "gen": "Apus"}]}"#,
        );

        let extractor = FieldExtractor::new(dir.path());
        let first = extractor.extract_field("gen");
        let second = extractor.extract_field("gen");
        assert_eq!(first, second);
    }

    #[test]
    fn test_extract_targets_skips_incomplete_records_whole() {
        let dir = tempfile::tempdir().unwrap();
        write_page(
            dir.path(),
            1,
            r#"{"numPages": 1, "recordings": [
                {"id": "1", "gen": "Apus", "file": "//x/1.mp3"},
                {"id": "2", "gen": "Apus"},
                {"id": "3", "gen": "Turdus", "file": "//x/3.mp3"}
            ]}"#,
        );

        let extractor = FieldExtractor::new(dir.path());
        let targets = extractor.extract_targets();
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0].id, "1");
        assert_eq!(targets[1].genus, "Turdus");
        assert_eq!(targets[1].url, "//x/3.mp3");
    }

    #[test]
    fn test_numeric_field_values_are_stringified() {
        let dir = tempfile::tempdir().unwrap();
        write_page(
            dir.path(),
            1,
            r#"{"numPages": 1, "recordings": [{"length": 42}]}"#,
        );

        let extractor = FieldExtractor::new(dir.path());
        assert_eq!(extractor.extract_field("length"), vec!["42"]);
    }

    #[test]
    fn test_page_count_trusts_freshest_page() {
        let dir = tempfile::tempdir().unwrap();
        // page 1 claims 1 page; a rerun that saw the total grow left page 2
        // behind, which must not be visited since page 1 is freshest first.
        write_page(
            dir.path(),
            1,
            r#"{"numPages": 1, "recordings": [{"id": "1"}]}"#,
        );
        write_page(
            dir.path(),
            2,
            r#"{"numPages": 2, "recordings": [{"id": "stale"}]}"#,
        );

        let extractor = FieldExtractor::new(dir.path());
        assert_eq!(extractor.extract_field("id"), vec!["1"]);
    }
}
