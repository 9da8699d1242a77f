pub mod memory;

use crate::core::error::Result;
use crate::core::term::Term;

/// Read-side index surface consumed by query rewriting.
///
/// The terms stream is a stateful, seekable cursor over the index's sorted
/// term dictionary. One scan owns the cursor at a time: callers reset it,
/// seek with [`skip_to`](IndexReader::skip_to), walk it with
/// [`next_term`](IndexReader::next_term), and must close it on every exit
/// path, including error paths.
pub trait IndexReader {
    /// Names of the index's fields. With `indexed_only` set, only fields
    /// that carry term dictionary entries are returned.
    fn field_names(&self, indexed_only: bool) -> Vec<String>;

    /// (Re)initialize the terms stream for a fresh scan.
    fn reset_terms_stream(&mut self) -> Result<()>;

    /// Position the cursor on the first dictionary term >= `term`.
    fn skip_to(&mut self, term: &Term) -> Result<()>;

    /// The term under the cursor, or `None` once the cursor has run off
    /// the end of the dictionary.
    fn current_term(&self) -> Option<&Term>;

    /// Advance the cursor by one term.
    fn next_term(&mut self) -> Result<()>;

    /// Release cursor resources.
    fn close_terms_stream(&mut self) -> Result<()>;
}
