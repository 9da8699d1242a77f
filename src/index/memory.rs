use fst::{IntoStreamer, Map, MapBuilder, Streamer};
use std::collections::{BTreeMap, BTreeSet};

use crate::core::error::{Error, ErrorKind, Result};
use crate::core::term::Term;
use crate::index::IndexReader;

/// Separator between the field and text parts of a dictionary key.
/// Sorts before every other byte, so keys order by (field, text).
const FIELD_SEPARATOR: u8 = 0x00;

fn encode_key(field: &str, text: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(field.len() + text.len() + 1);
    key.extend_from_slice(field.as_bytes());
    key.push(FIELD_SEPARATOR);
    key.extend_from_slice(text.as_bytes());
    key
}

fn decode_key(key: &[u8]) -> Result<Term> {
    let split = key
        .iter()
        .position(|&b| b == FIELD_SEPARATOR)
        .ok_or_else(|| Error::new(ErrorKind::Internal, "Malformed dictionary key"))?;

    let field = std::str::from_utf8(&key[..split])
        .map_err(|_| Error::new(ErrorKind::Parse, "Invalid UTF-8 in dictionary field"))?;
    let text = std::str::from_utf8(&key[split + 1..])
        .map_err(|_| Error::new(ErrorKind::Parse, "Invalid UTF-8 in dictionary term"))?;

    Ok(Term::with_field(text, field))
}

/// Builder accumulating (field, term) pairs before freezing them into
/// the FST dictionary.
pub struct InMemoryIndexBuilder {
    terms: BTreeMap<Vec<u8>, u64>,
    fields: BTreeSet<String>,
}

impl InMemoryIndexBuilder {
    pub fn new() -> Self {
        InMemoryIndexBuilder {
            terms: BTreeMap::new(),
            fields: BTreeSet::new(),
        }
    }

    /// Register one occurrence of `text` in `field`. Repeated calls for
    /// the same pair bump its frequency.
    pub fn add_term(&mut self, field: &str, text: &str) -> &mut Self {
        *self.terms.entry(encode_key(field, text)).or_insert(0) += 1;
        self.fields.insert(field.to_string());
        self
    }

    pub fn build(self) -> Result<InMemoryIndex> {
        // BTreeMap iteration is already in key order, which the FST requires
        let mut builder = MapBuilder::memory();
        for (key, freq) in &self.terms {
            builder.insert(key, *freq)?;
        }

        Ok(InMemoryIndex {
            dictionary: builder.into_map(),
            fields: self.fields.into_iter().collect(),
            cursor: None,
        })
    }
}

impl Default for InMemoryIndexBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory index over a sorted term dictionary, backed by an FST.
///
/// Implements the [`IndexReader`] cursor protocol. The cursor holds no
/// stream state between calls: each seek or advance re-enters the FST at
/// the current key, so the dictionary stays immutable and shareable.
pub struct InMemoryIndex {
    dictionary: Map<Vec<u8>>,
    fields: Vec<String>,
    cursor: Option<Term>,
}

impl InMemoryIndex {
    pub fn builder() -> InMemoryIndexBuilder {
        InMemoryIndexBuilder::new()
    }

    /// Number of distinct (field, term) entries.
    pub fn term_count(&self) -> usize {
        self.dictionary.len()
    }

    /// Dictionary frequency of the given term, 0 when absent.
    pub fn term_frequency(&self, term: &Term) -> u64 {
        let Some(field) = term.field.as_deref() else {
            return 0;
        };
        self.dictionary
            .get(encode_key(field, &term.text))
            .unwrap_or(0)
    }

    fn first_at_or_after(&self, key: &[u8]) -> Result<Option<Term>> {
        let mut stream = self.dictionary.range().ge(key).into_stream();
        match stream.next() {
            Some((found, _)) => Ok(Some(decode_key(found)?)),
            None => Ok(None),
        }
    }

    fn first_after(&self, key: &[u8]) -> Result<Option<Term>> {
        let mut stream = self.dictionary.range().gt(key).into_stream();
        match stream.next() {
            Some((found, _)) => Ok(Some(decode_key(found)?)),
            None => Ok(None),
        }
    }

    fn cursor_key(&self) -> Option<Vec<u8>> {
        self.cursor
            .as_ref()
            .and_then(|term| Some(encode_key(term.field.as_deref()?, &term.text)))
    }
}

impl IndexReader for InMemoryIndex {
    fn field_names(&self, _indexed_only: bool) -> Vec<String> {
        // Every field in this index carries dictionary entries
        self.fields.clone()
    }

    fn reset_terms_stream(&mut self) -> Result<()> {
        self.cursor = self.first_at_or_after(&[])?;
        Ok(())
    }

    fn skip_to(&mut self, term: &Term) -> Result<()> {
        let field = term.field.as_deref().ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidArgument,
                "Terms stream seek requires a fully specified term",
            )
        })?;

        self.cursor = self.first_at_or_after(&encode_key(field, &term.text))?;
        Ok(())
    }

    fn current_term(&self) -> Option<&Term> {
        self.cursor.as_ref()
    }

    fn next_term(&mut self) -> Result<()> {
        self.cursor = match self.cursor_key() {
            Some(key) => self.first_after(&key)?,
            None => None,
        };
        Ok(())
    }

    fn close_terms_stream(&mut self) -> Result<()> {
        self.cursor = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_index() -> InMemoryIndex {
        let mut builder = InMemoryIndex::builder();
        for text in ["apple", "banana", "cherry"] {
            builder.add_term("body", text);
        }
        builder.add_term("title", "zebra");
        builder.build().unwrap()
    }

    #[test]
    fn reset_positions_at_first_term() {
        let mut index = sample_index();
        index.reset_terms_stream().unwrap();
        assert_eq!(
            index.current_term(),
            Some(&Term::with_field("apple", "body"))
        );
    }

    #[test]
    fn skip_to_lands_on_first_ge_term() {
        let mut index = sample_index();
        index.reset_terms_stream().unwrap();
        index.skip_to(&Term::with_field("b", "body")).unwrap();
        assert_eq!(
            index.current_term(),
            Some(&Term::with_field("banana", "body"))
        );
    }

    #[test]
    fn next_term_crosses_field_boundary() {
        let mut index = sample_index();
        index.reset_terms_stream().unwrap();
        index.skip_to(&Term::with_field("cherry", "body")).unwrap();
        index.next_term().unwrap();
        assert_eq!(
            index.current_term(),
            Some(&Term::with_field("zebra", "title"))
        );
        index.next_term().unwrap();
        assert_eq!(index.current_term(), None);
    }

    #[test]
    fn next_past_end_stays_exhausted() {
        let mut index = sample_index();
        index.reset_terms_stream().unwrap();
        index.skip_to(&Term::with_field("~", "title")).unwrap();
        assert_eq!(index.current_term(), None);
        index.next_term().unwrap();
        assert_eq!(index.current_term(), None);
    }

    #[test]
    fn field_names_are_sorted_and_deduplicated() {
        let index = sample_index();
        assert_eq!(index.field_names(true), ["body", "title"]);
    }

    #[test]
    fn term_frequency_counts_occurrences() {
        let mut builder = InMemoryIndex::builder();
        builder.add_term("f", "dup").add_term("f", "dup");
        let index = builder.build().unwrap();
        assert_eq!(index.term_frequency(&Term::with_field("dup", "f")), 2);
        assert_eq!(index.term_frequency(&Term::with_field("gone", "f")), 0);
    }
}
