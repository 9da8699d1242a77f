use crate::analysis::filter::TokenFilter;
use crate::analysis::filters::lowercase::LowercaseFilter;
use crate::analysis::token::Token;
use crate::analysis::tokenizer::{StandardTokenizer, Tokenizer};
use parking_lot::RwLock;
use std::sync::Arc;

/// Text analysis pipeline
pub struct Analyzer {
    pub tokenizer: Box<dyn Tokenizer>,
    pub filters: Vec<Box<dyn TokenFilter>>,
    pub name: String,
}

impl Analyzer {
    pub fn new(name: String, tokenizer: Box<dyn Tokenizer>) -> Self {
        Analyzer {
            tokenizer,
            filters: Vec::new(),
            name,
        }
    }

    pub fn add_filter(mut self, filter: Box<dyn TokenFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn analyze(&self, text: &str) -> Vec<Token> {
        let mut tokens = self.tokenizer.tokenize(text);

        for filter in &self.filters {
            tokens = filter.filter(tokens);
        }

        tokens
    }

    /// Standard analyzer: Unicode word tokenizer plus lowercasing.
    pub fn standard() -> Self {
        Analyzer::new(
            "standard".to_string(),
            Box::new(StandardTokenizer::default()),
        )
        .add_filter(Box::new(LowercaseFilter))
    }
}

static DEFAULT_ANALYZER: RwLock<Option<Arc<Analyzer>>> = RwLock::new(None);

/// Process-wide default analyzer, used by query highlighting.
///
/// Lazily initialized to the standard analyzer on first use.
pub fn default_analyzer() -> Arc<Analyzer> {
    if let Some(analyzer) = DEFAULT_ANALYZER.read().as_ref() {
        return analyzer.clone();
    }

    let mut slot = DEFAULT_ANALYZER.write();
    slot.get_or_insert_with(|| Arc::new(Analyzer::standard()))
        .clone()
}

/// Replace the process-wide default analyzer.
pub fn set_default_analyzer(analyzer: Arc<Analyzer>) {
    *DEFAULT_ANALYZER.write() = Some(analyzer);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_analyzer_lowercases() {
        let tokens = Analyzer::standard().analyze("Rust Programming");
        let texts: Vec<&str> = tokens.iter().map(|t| t.term_text()).collect();
        assert_eq!(texts, ["rust", "programming"]);
    }

    #[test]
    fn default_analyzer_is_standard() {
        assert!(!default_analyzer().analyze("one two").is_empty());
    }
}
