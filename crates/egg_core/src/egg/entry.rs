//! Generic entry tree built from the token stream.
//!
//! Every `<Type> Name { ... }` block becomes one [`Entry`], nested exactly
//! as in the document. Nothing here knows what the entry types mean; that is
//! the binder's job.

use super::error::{ParseError, ParseResult};
use super::token::{Span, Token, TokenKind};

/// A generic EGG entry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Entry {
    /// Entry type, the text between `<` and `>`
    pub type_name: String,

    /// Entry name (may be empty)
    pub name: String,

    /// Quoted path found at the start of the body (may be empty)
    pub filepath: String,

    /// Scalar values of the body
    pub values: Vec<String>,

    /// Nested entries, in document order
    pub children: Vec<Entry>,

    /// Line the entry was opened on
    pub line: usize,
}

impl Entry {
    /// Create an empty entry of the given type.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            ..Default::default()
        }
    }

    /// First child of the given type.
    pub fn child(&self, type_name: &str) -> Option<&Entry> {
        self.children.iter().find(|c| c.type_name == type_name)
    }

    /// First child of the given type and name.
    pub fn named_child(&self, type_name: &str, name: &str) -> Option<&Entry> {
        self.children
            .iter()
            .find(|c| c.type_name == type_name && c.name == name)
    }

    /// All children of the given type, in document order.
    pub fn children_of<'a>(&'a self, type_name: &'a str) -> impl Iterator<Item = &'a Entry> + 'a {
        self.children.iter().filter(move |c| c.type_name == type_name)
    }

    /// First scalar value, if any.
    pub fn first_value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }
}

/// Options for building the entry tree.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuildOptions {
    /// Return a partially built entry when the token stream ends before its
    /// closing brace, instead of failing with [`ParseError::UnclosedEntry`].
    pub allow_unclosed: bool,
}

/// Forward-only cursor over a token stream.
pub struct TokenCursor {
    tokens: std::vec::IntoIter<Token>,
    current: Option<Token>,
}

impl TokenCursor {
    pub fn new(tokens: Vec<Token>) -> Self {
        let mut tokens = tokens.into_iter();
        let current = tokens.next();
        Self { tokens, current }
    }

    /// The token under the cursor.
    pub fn peek(&self) -> Option<&Token> {
        self.current.as_ref()
    }

    /// Take the token under the cursor and move to the next one.
    pub fn advance(&mut self) -> Option<Token> {
        std::mem::replace(&mut self.current, self.tokens.next())
    }

    pub fn is_exhausted(&self) -> bool {
        self.current.is_none()
    }
}

/// Builds [`Entry`] trees from tokens.
pub struct EntryTreeBuilder {
    cursor: TokenCursor,
    options: BuildOptions,
}

impl EntryTreeBuilder {
    pub fn new(tokens: Vec<Token>, options: BuildOptions) -> Self {
        Self {
            cursor: TokenCursor::new(tokens),
            options,
        }
    }

    /// Build all top-level entries.
    pub fn build(mut self) -> ParseResult<Vec<Entry>> {
        let mut entries = Vec::new();

        while let Some(token) = self.cursor.advance() {
            match token.kind {
                TokenKind::EntryOpen(type_name) => {
                    entries.push(self.build_entry(type_name, token.span)?);
                }
                other => return Err(unexpected(other, token.span)),
            }
        }

        log::debug!("Built {} top-level entries", entries.len());
        Ok(entries)
    }

    /// Build one entry whose `EntryOpen` has just been consumed.
    fn build_entry(&mut self, type_name: String, span: Span) -> ParseResult<Entry> {
        log::trace!("Building <{}> from line {}", type_name, span.line);

        let mut entry = Entry {
            type_name,
            line: span.line,
            ..Default::default()
        };

        loop {
            let Some(token) = self.cursor.advance() else {
                if self.options.allow_unclosed {
                    log::warn!(
                        "<{}> opened at line {} is never closed",
                        entry.type_name,
                        entry.line
                    );
                    return Ok(entry);
                }
                return Err(ParseError::UnclosedEntry {
                    type_name: entry.type_name,
                    line: entry.line,
                });
            };

            match token.kind {
                TokenKind::EntryClose => return Ok(entry),
                TokenKind::EntryName(name) => entry.name = name,
                TokenKind::EntryContent(values) => entry.values = values,
                TokenKind::FilePath(path) => entry.filepath = path,
                TokenKind::EntryOpen(child_type) => {
                    let child = self.build_entry(child_type, token.span)?;
                    entry.children.push(child);
                }
            }
        }
    }
}

fn unexpected(kind: TokenKind, span: Span) -> ParseError {
    ParseError::UnexpectedToken {
        line: span.line,
        column: span.column,
        found: kind.to_string(),
    }
}

/// Build the entry tree for a token stream with default options.
pub fn build(tokens: Vec<Token>) -> ParseResult<Vec<Entry>> {
    build_with(tokens, BuildOptions::default())
}

/// Build the entry tree for a token stream.
pub fn build_with(tokens: Vec<Token>, options: BuildOptions) -> ParseResult<Vec<Entry>> {
    EntryTreeBuilder::new(tokens, options).build()
}
