//! Symbol lexing (spec.md §4.1): greedy longest-match over `SYMBOLS`.
//!
//! Two-character symbols (`:=`, `<=`, `>=`, `==`, `!=`) are tried before
//! falling back to the one-character symbol at the same position. `!` is
//! valid only as the first character of `!=`; a lone `!` is not in
//! `SYMBOLS` and falls through to the invalid-character path.

use crate::keywords::is_symbol;
use crate::lexer::core::Lexer;
use crate::token::{Token, TokenKind};

impl<'a> Lexer<'a> {
    pub(crate) fn lex_symbol(&mut self) -> Token {
        let line = self.cursor.line();
        let one = self.cursor.current_char();
        let two: String = [one, self.cursor.peek_char(1)].iter().collect();

        if is_symbol(&two) {
            self.cursor.advance();
            self.cursor.advance();
            return Token::new(TokenKind::Symbol, two, line);
        }

        let one_str = one.to_string();
        if is_symbol(&one_str) {
            self.cursor.advance();
            return Token::new(TokenKind::Symbol, one_str, line);
        }

        // Valid symbol-start character (e.g. a lone `!`) that didn't form a
        // real symbol: consume it and report as an invalid character.
        self.cursor.advance();
        self.warn(format!("invalid character '{one}'"), line);
        self.next_token()
    }
}
