/// Consumer of matched words during highlighting.
///
/// The highlighter owns the document being highlighted; queries tokenize
/// its body, select the tokens they match, and hand the selected words
/// back through [`highlight`](Highlighter::highlight).
pub trait Highlighter {
    /// UTF-8 text of the document body field.
    fn document_body(&self) -> &str;

    /// Mark occurrences of the given words in the document.
    fn highlight(&mut self, words: &[String]);
}
