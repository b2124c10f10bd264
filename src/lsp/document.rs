use tower_lsp::lsp_types::{Position, Range, TextEdit};

/// State for each open document
#[derive(Debug)]
pub struct DocumentState {
    pub content: String,
}

/// Range spanning the entire document, in LSP (line, UTF-16 column) terms
pub fn full_document_range(text: &str) -> Range {
    let mut line = 0u32;
    let mut character = 0u32;
    for c in text.chars() {
        if c == '\n' {
            line += 1;
            character = 0;
        } else {
            character += c.len_utf16() as u32;
        }
    }
    Range::new(Position::new(0, 0), Position::new(line, character))
}

/// Single edit replacing the whole document with the formatted text
pub fn replace_all_edit(original: &str, formatted: String) -> TextEdit {
    TextEdit {
        range: full_document_range(original),
        new_text: formatted,
    }
}
