pub mod primitive;
pub mod range;
pub mod wildcard;

use std::fmt;

use crate::core::error::{Error, ErrorKind, Result};
use crate::core::term::Term;
use crate::core::types::DocId;
use crate::index::IndexReader;
use crate::query::primitive::Query;
use crate::search::highlight::Highlighter;

/// Common surface of the rewritable query shapes.
///
/// Range and wildcard queries are rewrite-only: callers expand them with
/// [`rewrite`](SearchQuery::rewrite) and run the returned primitive. The
/// direct search entry points (`optimize`, `create_weight`, `execute`,
/// `matched_docs`, `score`) exist on the trait but fail unconditionally
/// on these shapes.
pub trait SearchQuery: fmt::Display {
    /// Expand this query into a primitive query in the context of `index`.
    fn rewrite(&mut self, index: &mut dyn IndexReader) -> Result<Query>;

    /// Terms matched by the last successful rewrite.
    fn query_terms(&self) -> Result<&[Term]>;

    /// Optimize the query in the context of `index`. Rewrite-only shapes
    /// reject this.
    fn optimize(&mut self, index: &mut dyn IndexReader) -> Result<Query>;

    /// Initialize scoring state for direct execution. Rewrite-only shapes
    /// reject this.
    fn create_weight(&mut self, reader: &dyn IndexReader) -> Result<()>;

    /// Run the query against the reader. Rewrite-only shapes reject this.
    fn execute(&mut self, reader: &mut dyn IndexReader) -> Result<()>;

    /// Document ids likely matching the query. Rewrite-only shapes reject
    /// this.
    fn matched_docs(&self) -> Result<Vec<DocId>>;

    /// Score one document. Rewrite-only shapes reject this.
    fn score(&self, doc_id: DocId, reader: &dyn IndexReader) -> Result<f32>;

    fn boost(&self) -> f32;

    fn set_boost(&mut self, boost: f32);

    /// Mark query matches in the highlighter's document body.
    fn highlight_matches(&self, highlighter: &mut dyn Highlighter) -> Result<()>;
}

/// Limit check applied after every appended match. A limit of 0 disables
/// the ceiling.
pub(crate) fn check_terms_limit(limit: usize, collected: usize) -> Result<()> {
    if limit != 0 && collected > limit {
        return Err(Error::new(
            ErrorKind::LimitExceeded,
            "Terms per query limit is reached",
        ));
    }
    Ok(())
}

/// Error returned by every direct-search entry point of a rewrite-only
/// query shape.
pub(crate) fn rewrite_only_error(shape: &str) -> Error {
    Error::new(
        ErrorKind::UnsupportedQuery,
        format!(
            "{} query cannot be used for search directly. Rewrite it against the index first",
            shape
        ),
    )
}
