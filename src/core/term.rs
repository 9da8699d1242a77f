use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A (field, text) pair identifying one entry in the sorted term dictionary.
///
/// Immutable value type. Terms are ordered by field, then by text using a
/// byte-wise, locale-independent comparison that matches the dictionary's
/// own sort order. A `None` field on a query-side term stands for "all
/// indexed fields".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Term {
    pub field: Option<String>,
    pub text: String,
}

impl Term {
    pub fn new(text: impl Into<String>) -> Self {
        Term {
            field: None,
            text: text.into(),
        }
    }

    pub fn with_field(text: impl Into<String>, field: impl Into<String>) -> Self {
        Term {
            field: Some(field.into()),
            text: text.into(),
        }
    }

    /// True when this term belongs to the given field.
    pub fn in_field(&self, field: &str) -> bool {
        self.field.as_deref() == Some(field)
    }
}

impl PartialOrd for Term {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Term {
    fn cmp(&self, other: &Self) -> Ordering {
        self.field
            .cmp(&other.field)
            .then_with(|| self.text.as_bytes().cmp(other.text.as_bytes()))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{}:{}", field, self.text),
            None => write!(f, "{}", self.text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_structural() {
        assert_eq!(
            Term::with_field("abc", "title"),
            Term::with_field("abc", "title")
        );
        assert_ne!(
            Term::with_field("abc", "title"),
            Term::with_field("abc", "body")
        );
        assert_ne!(Term::new("abc"), Term::with_field("abc", "title"));
    }

    #[test]
    fn ordering_is_bytewise_on_text() {
        let a = Term::with_field("apple", "f");
        let b = Term::with_field("apricot", "f");
        let z = Term::with_field("zebra", "f");
        assert!(a < b);
        assert!(b < z);
        // Empty text sorts before everything in the field
        assert!(Term::with_field("", "f") < a);
    }

    #[test]
    fn display_renders_field_prefix() {
        assert_eq!(Term::with_field("rust", "title").to_string(), "title:rust");
        assert_eq!(Term::new("rust").to_string(), "rust");
    }
}
