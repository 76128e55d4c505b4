//! Core data structures for queries, result pages, and download targets.

mod page;
mod query;

pub use page::{AssetRef, Recording, ResultPage, RECORDS_PER_PAGE};
pub use query::Query;
