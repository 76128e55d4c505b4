//! Search query model.

/// An ordered sequence of search terms, immutable once constructed.
///
/// Each term may carry a tag filter in `field:value` form, e.g.
/// `sp:"Apus apus"` or `q:A`. Terms are space-joined and percent-encoded
/// into a single query string for the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    terms: Vec<String>,
}

impl Query {
    /// Create a query from search terms. At least one term is expected;
    /// callers validate emptiness before reaching the network layer.
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            terms: terms.into_iter().map(Into::into).collect(),
        }
    }

    /// The raw terms in order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Percent-encoded query string: terms joined with spaces, then encoded
    /// as one unit.
    pub fn encoded(&self) -> String {
        urlencoding::encode(&self.terms.join(" ")).into_owned()
    }

    /// Directory name derived from the terms.
    ///
    /// Terms are concatenated, `:` becomes `_`, `"` is removed. The result
    /// doubles as an idempotency key: a rerun with identical terms lands in
    /// the same directory and overwrites it.
    pub fn storage_dir_name(&self) -> String {
        self.terms.concat().replace(':', "_").replace('"', "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_dir_strips_forbidden_characters() {
        let query = Query::new(["sp:\"Turdus merula\""]);
        let dir = query.storage_dir_name();
        assert_eq!(dir, "sp_Turdus merula");
        assert!(!dir.contains(':'));
        assert!(!dir.contains('"'));
    }

    #[test]
    fn test_storage_dir_concatenates_terms() {
        let query = Query::new(["gen:Apus", "sp:apus"]);
        assert_eq!(query.storage_dir_name(), "gen_Apussp_apus");
    }

    #[test]
    fn test_encoded_joins_with_spaces() {
        let query = Query::new(["gen:Apus", "sp:apus"]);
        assert_eq!(query.encoded(), "gen%3AApus%20sp%3Aapus");
    }

    #[test]
    fn test_encoded_quotes() {
        let query = Query::new(["sp:\"Apus apus\""]);
        assert_eq!(query.encoded(), "sp%3A%22Apus%20apus%22");
    }
}
