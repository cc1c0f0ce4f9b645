//! String literal lexing (spec.md §4.1).
//!
//! A string runs from `"` to the next `"` on the same line. If the line
//! ends first, that is a warning (not fatal): the value is everything up
//! to the newline. Any character outside `[A-Za-z0-9 _,;:.']` is replaced
//! with a space, with one warning per bad character. The value excludes
//! the surrounding quotes.

use crate::lexer::core::Lexer;
use crate::token::{Token, TokenKind};

fn is_allowed_string_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || " _,;:.'".contains(c)
}

impl<'a> Lexer<'a> {
    pub(crate) fn lex_string(&mut self) -> Token {
        let line = self.cursor.line();
        self.cursor.advance(); // opening quote
        let mut value = String::new();

        loop {
            if self.cursor.is_at_end() || self.cursor.current_char() == '\n' {
                self.warn("unclosed string literal".to_string(), line);
                break;
            }

            let c = self.cursor.current_char();
            if c == '"' {
                self.cursor.advance();
                break;
            }

            if is_allowed_string_char(c) {
                value.push(c);
            } else {
                self.warn(format!("invalid character '{c}' in string literal"), line);
                value.push(' ');
            }
            self.cursor.advance();
        }

        Token::new(TokenKind::String, value, line)
    }
}
