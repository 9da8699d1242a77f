use crate::analysis::token::Token;
use unicode_segmentation::UnicodeSegmentation;

pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<Token>;

    fn name(&self) -> &str;

    fn clone_box(&self) -> Box<dyn Tokenizer>;
}

/// Standard Unicode tokenizer
#[derive(Clone)]
pub struct StandardTokenizer {
    pub max_token_length: usize,
}

impl Default for StandardTokenizer {
    fn default() -> Self {
        StandardTokenizer {
            max_token_length: 255,
        }
    }
}

impl Tokenizer for StandardTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut position = 0u32;

        // unicode_words yields word boundaries per UAX #29
        for (offset, word) in text.unicode_word_indices() {
            if word.len() <= self.max_token_length {
                tokens.push(Token::new(word.to_string(), position, offset));
                position += 1;
            }
        }

        tokens
    }

    fn name(&self) -> &str {
        "standard"
    }

    fn clone_box(&self) -> Box<dyn Tokenizer> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_word_boundaries() {
        let tokens = StandardTokenizer::default().tokenize("Hello, brave new world!");
        let texts: Vec<&str> = tokens.iter().map(|t| t.term_text()).collect();
        assert_eq!(texts, ["Hello", "brave", "new", "world"]);
    }

    #[test]
    fn records_positions_and_offsets() {
        let tokens = StandardTokenizer::default().tokenize("ab cd");
        assert_eq!(tokens[0].position, 0);
        assert_eq!(tokens[1].position, 1);
        assert_eq!(tokens[1].offset, 3);
    }
}
