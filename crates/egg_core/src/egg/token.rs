//! Token types and spans.

use std::fmt;

/// Location of the character that started a token.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Span {
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, counted in characters.
    pub column: usize,
}

impl Span {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Token with kind and source span.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// Location in source text.
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Token kinds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// `<TypeName>`
    EntryOpen(String),
    /// The name between `>` and `{`, possibly empty.
    EntryName(String),
    /// Scalar values of a `{ ... }` body, up to the next nested entry or `}`.
    EntryContent(Vec<String>),
    /// A double-quoted literal right after `{`.
    FilePath(String),
    /// `}`
    EntryClose,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::EntryOpen(type_name) => write!(f, "<{}>", type_name),
            TokenKind::EntryName(name) => write!(f, "name {:?}", name),
            TokenKind::EntryContent(values) => write!(f, "content ({} values)", values.len()),
            TokenKind::FilePath(path) => write!(f, "file path {:?}", path),
            TokenKind::EntryClose => write!(f, "'}}'"),
        }
    }
}
