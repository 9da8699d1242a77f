use serde::{Deserialize, Serialize};

/// Token representation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub text: String,  // The token text
    pub position: u32, // Position in document
    pub offset: usize, // Byte offset in original text
    pub length: usize, // Token length in bytes
}

impl Token {
    pub fn new(text: String, position: u32, offset: usize) -> Self {
        let length = text.len();
        Token {
            text,
            position,
            offset,
            length,
        }
    }

    pub fn term_text(&self) -> &str {
        &self.text
    }
}
