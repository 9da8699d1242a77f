use std::fmt;

use crate::analysis::analyzer;
use crate::core::config;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::term::Term;
use crate::core::types::DocId;
use crate::index::IndexReader;
use crate::query::primitive::Query;
use crate::query::{SearchQuery, check_terms_limit, rewrite_only_error};
use crate::search::highlight::Highlighter;

/// Range query over a field's term ordering.
///
/// Expands into the set of dictionary terms between the lower and upper
/// bound terms. Either bound may be open; `inclusive` applies to both
/// bounds symmetrically. Rewrite-only: the direct search entry points
/// fail until the query has been rewritten into a primitive.
#[derive(Debug)]
pub struct RangeQuery {
    field: Option<String>,
    lower: Option<Term>,
    upper: Option<Term>,
    inclusive: bool,
    boost: f32,
    /// Terms matched by the last successful rewrite, kept for result
    /// post-processing such as highlighting.
    matches: Option<Vec<Term>>,
}

impl RangeQuery {
    pub fn new(lower: Option<Term>, upper: Option<Term>, inclusive: bool) -> Result<Self> {
        if lower.is_none() && upper.is_none() {
            return Err(Error::new(
                ErrorKind::InvalidArgument,
                "At least one bound term must be non-null",
            ));
        }
        if let (Some(lower), Some(upper)) = (&lower, &upper) {
            if lower.field != upper.field {
                return Err(Error::new(
                    ErrorKind::InvalidArgument,
                    "Both bound terms must be for the same field",
                ));
            }
        }

        let field = lower
            .as_ref()
            .or(upper.as_ref())
            .and_then(|term| term.field.clone());

        Ok(RangeQuery {
            field,
            lower,
            upper,
            inclusive,
            boost: 1.0,
            matches: None,
        })
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn lower_term(&self) -> Option<&Term> {
        self.lower.as_ref()
    }

    pub fn upper_term(&self) -> Option<&Term> {
        self.upper.as_ref()
    }

    pub fn is_inclusive(&self) -> bool {
        self.inclusive
    }

    /// Walk one field's slice of the term dictionary, appending every
    /// in-range term to `matches`.
    fn scan_field(
        &self,
        index: &mut dyn IndexReader,
        field: &str,
        limit: usize,
        matches: &mut Vec<Term>,
    ) -> Result<()> {
        if let Some(lower) = &self.lower {
            let lower_term = Term::with_field(&lower.text, field);
            index.skip_to(&lower_term)?;

            if !self.inclusive && index.current_term() == Some(&lower_term) {
                // Exclusive lower bound: step past the bound term itself
                index.next_term()?;
            }
        } else {
            // Open lower bound: start of the field's term range
            index.skip_to(&Term::with_field("", field))?;
        }

        if let Some(upper) = &self.upper {
            let upper_term = Term::with_field(&upper.text, field);

            // Walk up to (but not onto) the upper term
            loop {
                let current = match index.current_term() {
                    Some(term) if term.in_field(field) && term.text < upper_term.text => {
                        term.clone()
                    }
                    _ => break,
                };

                matches.push(current);
                check_terms_limit(limit, matches.len())?;
                index.next_term()?;
            }

            if self.inclusive && index.current_term() == Some(&upper_term) {
                matches.push(upper_term);
            }
        } else {
            // Open upper bound: walk to the end of the field's term range
            loop {
                let current = match index.current_term() {
                    Some(term) if term.in_field(field) => term.clone(),
                    _ => break,
                };

                matches.push(current);
                check_terms_limit(limit, matches.len())?;
                index.next_term()?;
            }
        }

        Ok(())
    }
}

impl SearchQuery for RangeQuery {
    fn rewrite(&mut self, index: &mut dyn IndexReader) -> Result<Query> {
        self.matches = None;

        let fields = match &self.field {
            Some(field) => vec![field.clone()],
            // Search through all indexed fields
            None => index.field_names(true),
        };
        let limit = config::terms_per_query_limit();

        let mut matches = Vec::new();
        for field in &fields {
            index.reset_terms_stream()?;
            let scanned = self.scan_field(index, field, limit, &mut matches);
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
                "Search or rewrite operations have to be performed before",
            )
        })
    }

    fn optimize(&mut self, _index: &mut dyn IndexReader) -> Result<Query> {
        Err(rewrite_only_error("Range"))
    }

    fn create_weight(&mut self, _reader: &dyn IndexReader) -> Result<()> {
        Err(rewrite_only_error("Range"))
    }

    fn execute(&mut self, _reader: &mut dyn IndexReader) -> Result<()> {
        Err(rewrite_only_error("Range"))
    }

    fn matched_docs(&self) -> Result<Vec<DocId>> {
        Err(rewrite_only_error("Range"))
    }

    fn score(&self, _doc_id: DocId, _reader: &dyn IndexReader) -> Result<f32> {
        Err(rewrite_only_error("Range"))
    }

    fn boost(&self) -> f32 {
        self.boost
    }

    fn set_boost(&mut self, boost: f32) {
        self.boost = boost;
    }

    fn highlight_matches(&self, highlighter: &mut dyn Highlighter) -> Result<()> {
        let body = highlighter.document_body().to_string();
        let tokens = analyzer::default_analyzer().analyze(&body);

        let lower = self.lower.as_ref().map(|term| term.text.as_str());
        let upper = self.upper.as_ref().map(|term| term.text.as_str());

        // Token texts are compared against the bound texts directly; the
        // dictionary plays no part in highlighting
        let mut words = Vec::new();
        for token in tokens {
            let text = token.text;
            let within_lower = match lower {
                None => true,
                Some(bound) if self.inclusive => bound <= text.as_str(),
                Some(bound) => bound < text.as_str(),
            };
            let within_upper = match upper {
                None => true,
                Some(bound) if self.inclusive => text.as_str() <= bound,
                Some(bound) => text.as_str() < bound,
            };

            if within_lower && within_upper {
                words.push(text);
            }
        }

        highlighter.highlight(&words);
        Ok(())
    }
}

impl fmt::Display for RangeQuery {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Diagnostics only, so no character escaping
        if let Some(field) = &self.field {
            write!(f, "{}:", field)?;
        }
        write!(f, "{}", if self.inclusive { '[' } else { '{' })?;
        match &self.lower {
            Some(term) => write!(f, "{}", term.text)?,
            None => write!(f, "null")?,
        }
        write!(f, " TO ")?;
        match &self.upper {
            Some(term) => write!(f, "{}", term.text)?,
            None => write!(f, "null")?,
        }
        write!(f, "{}", if self.inclusive { ']' } else { '}' })?;
        if self.boost != 1.0 {
            write!(f, "^{}", self.boost)?;
        }
        Ok(())
    }
}
