use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::term::Term;

/// Primitive query shapes a rewrite collapses into.
///
/// Unlike the range and wildcard shapes, primitives name their terms
/// explicitly and can be executed directly against the inverted index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Query {
    /// Matches nothing.
    Empty,
    /// Matches exactly one dictionary term.
    Term(TermQuery),
    /// Matches any of several dictionary terms (implicit OR).
    MultiTerm(MultiTermQuery),
}

impl Query {
    /// Collapse a rewrite's matched terms into the appropriate primitive:
    /// none => Empty, one => Term, several => MultiTerm.
    pub fn from_matches(matches: &[Term]) -> Query {
        match matches {
            [] => Query::Empty,
            [term] => Query::Term(TermQuery::new(term.clone())),
            terms => {
                let mut query = MultiTermQuery::new();
                for term in terms {
                    query.add_term(term.clone());
                }
                Query::MultiTerm(query)
            }
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Query::Empty => write!(f, "<empty>"),
            Query::Term(query) => query.fmt(f),
            Query::MultiTerm(query) => query.fmt(f),
        }
    }
}

/// Single term query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermQuery {
    pub term: Term,
    pub boost: f32,
}

impl TermQuery {
    pub fn new(term: Term) -> Self {
        TermQuery { term, boost: 1.0 }
    }
}

impl fmt::Display for TermQuery {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.term)?;
        if self.boost != 1.0 {
            write!(f, "^{}", self.boost)?;
        }
        Ok(())
    }
}

/// Disjunction over several terms, each added individually.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiTermQuery {
    terms: Vec<Term>,
    pub boost: f32,
}

impl MultiTermQuery {
    pub fn new() -> Self {
        MultiTermQuery {
            terms: Vec::new(),
            boost: 1.0,
        }
    }

    /// Add one term to the disjunction with default weighting.
    pub fn add_term(&mut self, term: Term) {
        self.terms.push(term);
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }
}

impl Default for MultiTermQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MultiTermQuery {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(")?;
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", term)?;
        }
        write!(f, ")")?;
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
    fn composes_by_match_count() {
        assert_eq!(Query::from_matches(&[]), Query::Empty);

        let one = [Term::with_field("abc", "f")];
        match Query::from_matches(&one) {
            Query::Term(tq) => assert_eq!(tq.term, one[0]),
            other => panic!("expected Term primitive, got {:?}", other),
        }

        let many = [Term::with_field("abc", "f"), Term::with_field("abd", "f")];
        match Query::from_matches(&many) {
            Query::MultiTerm(mtq) => assert_eq!(mtq.terms(), &many),
            other => panic!("expected MultiTerm primitive, got {:?}", other),
        }
    }

    #[test]
    fn display_renders_terms() {
        let many = [Term::with_field("abc", "f"), Term::with_field("abd", "f")];
        assert_eq!(Query::from_matches(&many).to_string(), "(f:abc f:abd)");
        assert_eq!(Query::Empty.to_string(), "<empty>");
    }
}
