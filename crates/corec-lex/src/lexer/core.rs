//! Core lexer struct and dispatch (spec.md §4.1).

use corec_util::{DiagnosticBuilder, Handler, SourceFile, Span};

use crate::cursor::Cursor;
use crate::keywords::is_symbol_start;
use crate::token::{Token, TokenKind};

/// Produces one [`Token`] per call to [`Lexer::next_token`]; after
/// end-of-stream it returns `eof` repeatedly (spec.md invariant 1).
///
/// Lexical trouble is always a warning (spec.md §4.1), never an error, so
/// the lexer keeps its own [`Handler`] rather than sharing the parser's —
/// there is no ordering dependency between the two to coordinate, and this
/// keeps the `Iterator` impl's signature a plain `next(&mut self)`. The
/// driver merges `lexer.handler()`'s diagnostics into the final report.
pub struct Lexer<'a> {
    pub(crate) cursor: Cursor<'a>,
    pub(crate) source: &'a SourceFile,
    pub(crate) handler: Handler,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a SourceFile) -> Self {
        Self {
            cursor: Cursor::new(source.content()),
            source,
            handler: Handler::new(),
        }
    }

    /// The lexer's own diagnostics (warnings only — spec.md §4.1).
    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    pub fn into_handler(self) -> Handler {
        self.handler
    }

    /// Returns the next token, classifying the first non-whitespace,
    /// non-comment character per the priority list in spec.md §4.1.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();

        let line = self.cursor.line();
        if self.cursor.is_at_end() {
            return Token::eof(line);
        }

        let c = self.cursor.current_char();
        if c == '"' {
            self.lex_string()
        } else if c.is_ascii_digit() {
            self.lex_number()
        } else if c.is_ascii_alphabetic() {
            self.lex_identifier()
        } else if is_symbol_start(c) {
            self.lex_symbol()
        } else {
            self.warn(format!("invalid character '{c}'"), line);
            self.cursor.advance();
            self.next_token()
        }
    }

    pub(crate) fn warn(&mut self, message: String, line: u32) {
        DiagnosticBuilder::warning(message, Span::new(line))
            .with_source(self.source)
            .emit(&mut self.handler);
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            None
        } else {
            Some(token)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corec_util::SourceFile;

    fn lex_all(src: &str) -> Vec<Token> {
        let source = SourceFile::from_string("t.src".into(), src.to_string());
        let lexer = Lexer::new(&source);
        lexer.collect()
    }

    #[test]
    fn eof_is_idempotent() {
        let source = SourceFile::from_string("t.src".into(), String::new());
        let mut lexer = Lexer::new(&source);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    }

    #[test]
    fn skips_whitespace() {
        let tokens = lex_all("  x   y  ");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].value, "x");
        assert_eq!(tokens[1].value, "y");
    }

    #[test]
    fn invalid_character_is_a_warning_not_fatal() {
        let source = SourceFile::from_string("t.src".into(), "x @ y".to_string());
        let mut lexer = Lexer::new(&source);
        let tokens: Vec<_> = (&mut lexer).collect();
        assert_eq!(tokens.len(), 2);
        assert_eq!(lexer.handler().warning_count(), 1);
        assert!(!lexer.handler().has_errors());
    }
}
