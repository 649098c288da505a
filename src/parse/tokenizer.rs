//! logos-based delimiter scanner for the tag stream.
//!
//! The tag stream has three delimiters, `]`, `[` and `,`, each of which can
//! be escaped with a backslash. The scanner only finds unescaped delimiters;
//! the text between them is handed back as slices of the input, escapes
//! still in place, to be decoded once a value is used.

use logos::Logos;

/// Token produced by the scanner.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// `[`, between a tag name and its description.
    #[token("[")]
    Open,

    /// `]`, ending a tag.
    #[token("]")]
    Close,

    /// `,`, between arguments.
    #[token(",")]
    Comma,

    /// A backslash and the character it escapes.
    #[regex(r"\\.")]
    Escaped,

    /// A run of ordinary characters.
    #[regex(r"[^\[\],\\]+")]
    Text,
}

/// Split `input` on every unescaped occurrence of `delimiter`.
///
/// Always returns at least one part. Bytes the scanner cannot match (a lone
/// trailing backslash) are kept as text.
pub fn split_unescaped(input: &str, delimiter: Token) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    for (token, span) in Token::lexer(input).spanned() {
        if token == Ok(delimiter) {
            parts.push(&input[start..span.start]);
            start = span.end;
        }
    }
    parts.push(&input[start..]);
    parts
}

/// Split a whole formspec into `]`-terminated fragments.
pub fn fragments(source: &str) -> Vec<&str> {
    split_unescaped(source, Token::Close)
}
