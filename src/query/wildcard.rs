use regex::Regex;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::analysis::analyzer;
use crate::core::config;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::term::Term;
use crate::core::types::DocId;
use crate::index::IndexReader;
use crate::query::primitive::Query;
use crate::query::{SearchQuery, check_terms_limit, rewrite_only_error};
use crate::search::highlight::Highlighter;

/// Default number of literal leading characters a pattern must carry.
pub const DEFAULT_MIN_PREFIX_LENGTH: usize = 3;

static MIN_PREFIX_LENGTH: AtomicUsize = AtomicUsize::new(DEFAULT_MIN_PREFIX_LENGTH);

/// Wildcard query over the term dictionary.
///
/// The pattern text may contain `*` (any number of characters) and `?`
/// (exactly one character). The literal prefix before the first wildcard
/// bounds the dictionary scan; patterns whose prefix is shorter than the
/// process-wide minimum are rejected at rewrite time. Rewrite-only, like
/// [`RangeQuery`](crate::query::range::RangeQuery).
pub struct WildcardQuery {
    pattern: Term,
    boost: f32,
    /// Terms matched by the last successful rewrite.
    matches: Option<Vec<Term>>,
}

impl WildcardQuery {
    pub fn new(pattern: Term) -> Self {
        WildcardQuery {
            pattern,
            boost: 1.0,
            matches: None,
        }
    }

    pub fn pattern(&self) -> &Term {
        &self.pattern
    }

    /// Minimum number of literal leading characters required of every
    /// pattern. Shared across all wildcard queries; read at rewrite time,
    /// not at construction.
    pub fn min_prefix_length() -> usize {
        MIN_PREFIX_LENGTH.load(Ordering::Relaxed)
    }

    pub fn set_min_prefix_length(length: usize) {
        MIN_PREFIX_LENGTH.store(length, Ordering::Relaxed);
    }

    /// Literal prefix of a pattern: everything before the earliest
    /// wildcard metacharacter.
    fn literal_prefix(word: &str) -> &str {
        match word.find(['?', '*']) {
            Some(position) => &word[..position],
            None => word,
        }
    }

    /// Translate the glob pattern into an anchored regex. All regex
    /// metacharacters are neutralized first, then the two escaped
    /// wildcard tokens become their regex equivalents.
    fn match_expression(pattern: &str) -> Result<Regex> {
        let escaped = regex::escape(pattern);
        let expression = format!("^{}$", escaped.replace("\\?", ".").replace("\\*", ".*"));
        Ok(Regex::new(&expression)?)
    }

    /// Walk one field's slice of the dictionary, appending every term the
    /// pattern matches to `matches`.
    fn scan_field(
        &self,
        index: &mut dyn IndexReader,
        field: &str,
        prefix: &str,
        expression: &Regex,
        limit: usize,
        matches: &mut Vec<Term>,
    ) -> Result<()> {
        index.skip_to(&Term::with_field(prefix, field))?;

        loop {
            let current = match index.current_term() {
                Some(term) if term.in_field(field) && term.text.starts_with(prefix) => {
                    term.clone()
                }
                _ => break,
            };

            if expression.is_match(&current.text) {
                matches.push(current);
                check_terms_limit(limit, matches.len())?;
            }

            index.next_term()?;
        }

        Ok(())
    }
}

impl SearchQuery for WildcardQuery {
    fn rewrite(&mut self, index: &mut dyn IndexReader) -> Result<Query> {
        self.matches = None;

        let fields = match &self.pattern.field {
            Some(field) => vec![field.clone()],
            // Search through all indexed fields
            None => index.field_names(true),
        };

        let prefix = Self::literal_prefix(&self.pattern.text);
        let min_prefix_length = Self::min_prefix_length();
        if prefix.chars().count() < min_prefix_length {
            return Err(Error::new(
                ErrorKind::InvalidArgument,
                format!(
                    "At least {} non-wildcard characters are required at the beginning of pattern",
                    min_prefix_length
                ),
            ));
        }

        let expression = Self::match_expression(&self.pattern.text)?;
        let limit = config::terms_per_query_limit();

        let mut matches = Vec::new();
        for field in &fields {
            index.reset_terms_stream()?;
            let scanned = self.scan_field(index, field, prefix, &expression, limit, &mut matches);
            // The cursor is released even when the scan aborts on the
            // terms-per-query limit
            let closed = index.close_terms_stream();
            scanned?;
            closed?;
        }

        let query = Query::from_matches(&matches);
        self.matches = Some(matches);
        Ok(query)
    }

    fn query_terms(&self) -> Result<&[Term]> {
        self.matches.as_deref().ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidState,
                "Search has to be performed first to get matched terms",
            )
        })
    }

    fn optimize(&mut self, _index: &mut dyn IndexReader) -> Result<Query> {
        Err(rewrite_only_error("Wildcard"))
    }

    fn create_weight(&mut self, _reader: &dyn IndexReader) -> Result<()> {
        Err(rewrite_only_error("Wildcard"))
    }

    fn execute(&mut self, _reader: &mut dyn IndexReader) -> Result<()> {
        Err(rewrite_only_error("Wildcard"))
    }

    fn matched_docs(&self) -> Result<Vec<DocId>> {
        Err(rewrite_only_error("Wildcard"))
    }

    fn score(&self, _doc_id: DocId, _reader: &dyn IndexReader) -> Result<f32> {
        Err(rewrite_only_error("Wildcard"))
    }

    fn boost(&self) -> f32 {
        self.boost
    }

    fn set_boost(&mut self, boost: f32) {
        self.boost = boost;
    }

    fn highlight_matches(&self, highlighter: &mut dyn Highlighter) -> Result<()> {
        // The predicate is rebuilt from the pattern rather than read from
        // the cached matches: highlighting runs over a fresh document
        // body, not the dictionary
        let expression = Self::match_expression(&self.pattern.text)?;

        let body = highlighter.document_body().to_string();
        let tokens = analyzer::default_analyzer().analyze(&body);

        let words: Vec<String> = tokens
            .into_iter()
            .map(|token| token.text)
            .filter(|text| expression.is_match(text))
            .collect();

        highlighter.highlight(&words);
        Ok(())
    }
}

impl fmt::Display for WildcardQuery {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Diagnostics only, so no character escaping
        if let Some(field) = &self.pattern.field {
            write!(f, "{}:", field)?;
        }
        write!(f, "{}", self.pattern.text)?;
        if self.boost != 1.0 {
            write!(f, "^{}", self.boost)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_prefix_stops_at_first_wildcard() {
        assert_eq!(WildcardQuery::literal_prefix("abc*"), "abc");
        assert_eq!(WildcardQuery::literal_prefix("ab?c*"), "ab");
        assert_eq!(WildcardQuery::literal_prefix("a*b?c"), "a");
        assert_eq!(WildcardQuery::literal_prefix("plain"), "plain");
        assert_eq!(WildcardQuery::literal_prefix("*leading"), "");
    }

    #[test]
    fn match_expression_translates_globs() {
        let expression = WildcardQuery::match_expression("ab*c?d").unwrap();
        assert!(expression.is_match("abXXcYd"));
        assert!(expression.is_match("abcYd"));
        assert!(!expression.is_match("abcd"));
        assert!(!expression.is_match("abXXcYdZ"));
    }

    #[test]
    fn match_expression_neutralizes_regex_metacharacters() {
        let expression = WildcardQuery::match_expression("a.c*").unwrap();
        assert!(expression.is_match("a.cde"));
        assert!(!expression.is_match("abcde"));
    }

    #[test]
    fn match_expression_is_unicode_aware() {
        let expression = WildcardQuery::match_expression("gr?n").unwrap();
        // '?' must match exactly one character, not one byte
        assert!(expression.is_match("grün"));
        assert!(!expression.is_match("grn"));
    }

    #[test]
    fn query_terms_before_rewrite_is_a_state_error() {
        let query = WildcardQuery::new(Term::with_field("abc*", "f"));
        assert_eq!(query.query_terms().unwrap_err().kind, ErrorKind::InvalidState);
    }

    #[test]
    fn display_renders_pattern() {
        let mut query = WildcardQuery::new(Term::with_field("abc*", "title"));
        assert_eq!(query.to_string(), "title:abc*");
        query.set_boost(0.5);
        assert_eq!(query.to_string(), "title:abc*^0.5");

        let unfielded = WildcardQuery::new(Term::new("abc?"));
        assert_eq!(unfielded.to_string(), "abc?");
    }
}
