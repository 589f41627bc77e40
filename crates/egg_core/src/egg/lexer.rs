//! EGG lexer.
//!
//! Turns document text into a flat token stream in a single forward pass.
//! The grammar is context-sensitive, so the lexer decides what to read next
//! from the character it is looking at and from the entry header it has just
//! read:
//!
//! - `<Type>` opens an entry and is followed by a name up to `{`, except for
//!   the nameless `<CoordinateSystem>` and `<Comment>` entries
//! - `{` starts a body; a quoted file path may come first, then the scalar
//!   values up to the next nested `<` or the closing `}`
//! - `}` closes the innermost entry
//! - `/` starts a comment that runs to the end of the line

use std::iter::Peekable;
use std::str::Chars;

use super::error::{ParseError, ParseResult};
use super::token::{Span, Token, TokenKind};

/// Entry types (lower-cased) that never carry a name.
const ENTRIES_WITHOUT_NAMES: [&str; 2] = ["coordinatesystem", "comment"];

/// EGG lexer.
pub struct Lexer<'src> {
    chars: Peekable<Chars<'src>>,
    line: usize,
    column: usize,
    tokens: Vec<Token>,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source text.
    pub fn new(source: &'src str) -> Self {
        Self {
            chars: source.chars().peekable(),
            line: 1,
            column: 1,
            tokens: Vec::new(),
        }
    }

    /// Tokenize the entire source.
    ///
    /// Fails on the first character that cannot start a token; nothing is
    /// returned for the part scanned so far.
    pub fn tokenize(mut self) -> ParseResult<Vec<Token>> {
        while let Some(c) = self.peek() {
            let span = self.span();
            match c {
                c if c.is_whitespace() => {
                    self.bump();
                }
                '<' => self.scan_entry_header(span)?,
                '{' => self.scan_entry_body(span)?,
                '}' => {
                    self.bump();
                    self.push(TokenKind::EntryClose, span);
                }
                '/' => self.skip_comment(),
                other => {
                    return Err(ParseError::Format {
                        line: span.line,
                        column: span.column,
                        message: format!("unrecognized token {:?}", other),
                    });
                }
            }
        }

        log::debug!("Tokenized {} tokens over {} lines", self.tokens.len(), self.line);
        Ok(self.tokens)
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn span(&self) -> Span {
        Span::new(self.line, self.column)
    }

    fn push(&mut self, kind: TokenKind, span: Span) {
        log::trace!("{}:{} {}", span.line, span.column, kind);
        self.tokens.push(Token::new(kind, span));
    }

    fn unexpected_eof(&self, context: &str) -> ParseError {
        ParseError::Format {
            line: self.line,
            column: self.column,
            message: format!("unexpected end of input {}", context),
        }
    }

    /// Read `<Type>` and, unless the type is nameless, the name up to `{`.
    fn scan_entry_header(&mut self, span: Span) -> ParseResult<()> {
        self.bump(); // consume '<'

        let mut type_name = String::new();
        loop {
            match self.bump() {
                Some('>') => break,
                Some(c) => type_name.push(c),
                None => return Err(self.unexpected_eof("inside entry header")),
            }
        }

        let nameless = ENTRIES_WITHOUT_NAMES.contains(&type_name.to_lowercase().as_str());
        self.push(TokenKind::EntryOpen(type_name), span);
        if nameless {
            return Ok(());
        }

        let name_span = self.span();
        let mut name = String::new();
        loop {
            match self.peek() {
                // The brace is left for the body scanner
                Some('{') => break,
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some(c) => {
                    name.push(c);
                    self.bump();
                }
                None => return Err(self.unexpected_eof("before '{'")),
            }
        }
        self.push(TokenKind::EntryName(name), name_span);

        Ok(())
    }

    /// Read `{`, an optional leading quoted path, and the scalar values that
    /// precede the first nested entry or the closing brace.
    fn scan_entry_body(&mut self, span: Span) -> ParseResult<()> {
        self.bump(); // consume '{'

        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }

        if self.peek() == Some('"') {
            let path_span = self.span();
            self.bump();

            let mut path = String::new();
            loop {
                match self.bump() {
                    Some('"') => break,
                    Some(c) => path.push(c),
                    None => return Err(self.unexpected_eof("inside quoted file path")),
                }
            }
            self.push(TokenKind::FilePath(path), path_span);
        }

        let mut raw = String::new();
        while let Some(c) = self.peek() {
            if c == '<' || c == '}' {
                break;
            }
            raw.push(c);
            self.bump();
        }
        self.push(TokenKind::EntryContent(split_scalars(&raw)), span);

        Ok(())
    }

    /// Skip a comment through the end of the line; the newline stays.
    fn skip_comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' || c == '\r' {
                break;
            }
            self.bump();
        }
    }
}

/// Split raw body text into scalar values.
///
/// Values are separated by whitespace; stray braces are dropped and empty
/// segments discarded.
pub fn split_scalars(raw: &str) -> Vec<String> {
    raw.split_whitespace()
        .map(|word| word.chars().filter(|c| *c != '{' && *c != '}').collect::<String>())
        .filter(|value| !value.is_empty())
        .collect()
}

/// Tokenize an EGG document.
pub fn scan(text: &str) -> ParseResult<Vec<Token>> {
    Lexer::new(text).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<TokenKind> {
        scan(text).unwrap().into_iter().map(|t| t.kind).collect()
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_scan_single_vertex() {
        let tokens = kinds("<Vertex> 0 { 1.0 2.0 3.0 }");

        assert_eq!(
            tokens,
            vec![
                TokenKind::EntryOpen("Vertex".to_string()),
                TokenKind::EntryName("0".to_string()),
                TokenKind::EntryContent(strings(&["1.0", "2.0", "3.0"])),
                TokenKind::EntryClose,
            ]
        );
    }

    #[test]
    fn test_scan_nameless_entries() {
        let tokens = kinds("<CoordinateSystem> { Y-Up }\n<Comment> { \"exported\" }");

        assert_eq!(
            tokens,
            vec![
                TokenKind::EntryOpen("CoordinateSystem".to_string()),
                TokenKind::EntryContent(strings(&["Y-Up"])),
                TokenKind::EntryClose,
                TokenKind::EntryOpen("Comment".to_string()),
                TokenKind::FilePath("exported".to_string()),
                TokenKind::EntryContent(Vec::new()),
                TokenKind::EntryClose,
            ]
        );
    }

    #[test]
    fn test_nameless_check_ignores_case() {
        let tokens = kinds("<COMMENT> { x }");
        assert_eq!(tokens[1], TokenKind::EntryContent(strings(&["x"])));
    }

    #[test]
    fn test_scan_empty_name() {
        let tokens = kinds("<Polygon> { }");

        assert_eq!(tokens[1], TokenKind::EntryName(String::new()));
        assert_eq!(tokens[2], TokenKind::EntryContent(Vec::new()));
    }

    #[test]
    fn test_name_drops_embedded_whitespace() {
        let tokens = kinds("<Group> my group\n{ }");
        assert_eq!(tokens[1], TokenKind::EntryName("mygroup".to_string()));
    }

    #[test]
    fn test_scan_texture_filepath() {
        let tokens = kinds("<Texture> tex {\n  \"maps/wood.png\"\n  <Scalar> wrapu { repeat }\n}");

        assert_eq!(
            tokens,
            vec![
                TokenKind::EntryOpen("Texture".to_string()),
                TokenKind::EntryName("tex".to_string()),
                TokenKind::FilePath("maps/wood.png".to_string()),
                TokenKind::EntryContent(Vec::new()),
                TokenKind::EntryOpen("Scalar".to_string()),
                TokenKind::EntryName("wrapu".to_string()),
                TokenKind::EntryContent(strings(&["repeat"])),
                TokenKind::EntryClose,
                TokenKind::EntryClose,
            ]
        );
    }

    #[test]
    fn test_content_stops_at_nested_entry() {
        let tokens = kinds("<VertexRef> { 0 1 2 <Ref> { pool1 } }");

        assert_eq!(tokens[2], TokenKind::EntryContent(strings(&["0", "1", "2"])));
        assert_eq!(tokens[3], TokenKind::EntryOpen("Ref".to_string()));
    }

    #[test]
    fn test_quoted_name_with_angle_brackets() {
        let tokens = kinds("<Table> \"<skeleton>\" { }");
        assert_eq!(tokens[1], TokenKind::EntryName("\"<skeleton>\"".to_string()));
    }

    #[test]
    fn test_skip_comments() {
        let tokens = kinds("// header comment\n<Group> G { } // trailing\r\n");

        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[0], TokenKind::EntryOpen("Group".to_string()));
    }

    #[test]
    fn test_unrecognized_character() {
        let err = scan("<Group> G { }\n# not a comment").unwrap_err();

        match err {
            ParseError::Format { line, column, message } => {
                assert_eq!(line, 2);
                assert_eq!(column, 1);
                assert!(message.contains('#'));
            }
            other => panic!("Expected format error, got {:?}", other),
        }
    }

    #[test]
    fn test_unterminated_header() {
        let err = scan("<Vertex").unwrap_err();
        assert!(matches!(err, ParseError::Format { .. }));
    }

    #[test]
    fn test_missing_body() {
        let err = scan("<Vertex> 0").unwrap_err();
        assert!(matches!(err, ParseError::Format { .. }));
    }

    #[test]
    fn test_unterminated_filepath() {
        let err = scan("<Texture> t { \"maps/wood.png }").unwrap_err();
        assert!(matches!(err, ParseError::Format { .. }));
    }

    #[test]
    fn test_token_spans() {
        let tokens = scan("<Group> G {\n  <Vertex> 1 { 0 0 0 }\n}").unwrap();

        assert_eq!(tokens[0].span, Span::new(1, 1));
        assert_eq!(tokens[3].span, Span::new(2, 3));
        assert_eq!(tokens.last().unwrap().span, Span::new(3, 1));
    }

    #[test]
    fn test_split_scalars() {
        assert_eq!(split_scalars("  1 \t2\r\n 3 "), strings(&["1", "2", "3"]));
        assert_eq!(split_scalars("{ a{b } }"), strings(&["ab"]));
        assert!(split_scalars(" \n ").is_empty());
    }

    #[test]
    fn test_empty_document() {
        assert!(scan("").unwrap().is_empty());
        assert!(scan("  // only a comment").unwrap().is_empty());
    }
}
