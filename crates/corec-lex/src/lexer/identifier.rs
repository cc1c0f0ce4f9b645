//! Identifier and keyword lexing (spec.md §4.1).

use crate::keywords::is_keyword;
use crate::lexer::core::Lexer;
use crate::token::{Token, TokenKind};

impl<'a> Lexer<'a> {
    /// `[a-zA-Z][a-zA-Z0-9_]*`, classified as `keyword` when it matches the
    /// reserved word list and `identifier` otherwise.
    pub(crate) fn lex_identifier(&mut self) -> Token {
        let line = self.cursor.line();
        let mut value = String::new();

        while !self.cursor.is_at_end() {
            let c = self.cursor.current_char();
            if c.is_ascii_alphanumeric() || c == '_' {
                value.push(c);
                self.cursor.advance();
            } else {
                break;
            }
        }

        if is_keyword(&value) {
            Token::new(TokenKind::Keyword, value, line)
        } else {
            Token::new(TokenKind::Identifier, value, line)
        }
    }
}
